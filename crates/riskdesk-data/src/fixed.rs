//! Fixed fallback prices.

use async_trait::async_trait;
use riskdesk_core::error::DataError;
use riskdesk_core::traits::PriceProvider;
use riskdesk_core::types::PriceMap;
use rust_decimal::Decimal;

use crate::lookup_key;

/// Provider answering from a fixed table, typically the last line of a chain.
pub struct FixedPriceProvider {
    name: String,
    prices: PriceMap,
}

impl FixedPriceProvider {
    /// Create a provider from a price table.
    pub fn new(name: impl Into<String>, prices: PriceMap) -> Self {
        Self {
            name: name.into(),
            prices,
        }
    }

    /// Add or replace one price.
    pub fn with_price(mut self, key: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(key.into(), price);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceProvider for FixedPriceProvider {
    async fn lookup(&self, ticker: &str) -> Result<Option<Decimal>, DataError> {
        Ok(lookup_key(&self.prices, ticker).filter(|p| *p > Decimal::ZERO))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
