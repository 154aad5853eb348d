//! Logging, evaluation reports and the TUI dashboard.

mod dashboard;
mod logging;
mod report;

pub use dashboard::{Dashboard, DashboardState};
pub use logging::setup_logging;
pub use report::{EvaluationReport, HoldingLine, BETA_TARGET_BAND};
