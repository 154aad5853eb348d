//! Core data types for the riskdesk system.

mod asset;
mod market;
mod snapshot;

pub use asset::{AssetHolding, AssetSpec, Category};
pub use market::{MarketData, PriceMap};
pub use snapshot::PortfolioSnapshot;
