//! Exposure decision engine.
//!
//! A single pure pipeline: drawdown tier, valuation, risk ratios, decision.
//! Nothing here performs I/O or keeps state between evaluations.

mod decision;
mod pipeline;
mod ratios;
mod tiers;
mod valuation;

pub use decision::{resolve, Decision, DecisionPolicy, Severity, Tone};
pub use pipeline::{evaluate, Evaluation, RiskEngine};
pub use ratios::{compute_metrics, RiskMetrics, MAINTENANCE_RATIO_SENTINEL};
pub use tiers::{classify, drawdown_pct, Tier, TIERS};
pub use valuation::{value_portfolio, PositionValue, Valuation};
