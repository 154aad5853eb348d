//! Core traits for the riskdesk system.

mod price_provider;

pub use price_provider::PriceProvider;
