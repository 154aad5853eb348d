//! Core types and traits for the riskdesk exposure engine.
//!
//! This crate provides the foundational building blocks including:
//! - Asset universe and holding types (AssetSpec, AssetHolding, Category)
//! - The per-evaluation portfolio snapshot and the market data feeding it
//! - The price provider trait implemented by market-data collaborators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DataError, RiskDeskError, RiskDeskResult};
pub use types::*;
pub use traits::*;
