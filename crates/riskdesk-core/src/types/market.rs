//! Market data delivered by the price-fetching collaborator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest price per symbol. Absent entries are treated as price zero.
pub type PriceMap = BTreeMap<String, Decimal>;

/// One fetch of everything the engine needs from the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Latest price per display symbol
    pub prices: PriceMap,
    /// Current market index level (zero if unavailable)
    pub market_index: Decimal,
    /// All-time high of the market index (zero means unknown)
    pub ath_index: Decimal,
    /// When the data was fetched
    pub fetched_at: DateTime<Utc>,
}

impl MarketData {
    /// Create market data stamped with the current time.
    pub fn new(prices: PriceMap, market_index: Decimal, ath_index: Decimal) -> Self {
        Self {
            prices,
            market_index,
            ath_index,
            fetched_at: Utc::now(),
        }
    }

    /// Price for a symbol, zero when missing.
    pub fn price(&self, symbol: &str) -> Decimal {
        self.prices.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    /// Symbols the feed failed to price.
    pub fn missing_symbols<'a>(&self, symbols: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        symbols
            .into_iter()
            .filter(|s| self.price(s) <= Decimal::ZERO)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_price_is_zero() {
        let mut prices = PriceMap::new();
        prices.insert("00662".to_string(), dec!(102));
        let data = MarketData::new(prices, dec!(23000), dec!(32996));

        assert_eq!(data.price("00662"), dec!(102));
        assert_eq!(data.price("00713"), Decimal::ZERO);
        assert_eq!(data.missing_symbols(["00662", "00713"]), vec!["00713".to_string()]);
    }
}
