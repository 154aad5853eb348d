//! Portfolio snapshot evaluated by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssetHolding, AssetSpec, MarketData};

/// Everything one evaluation needs. Rebuilt from scratch for every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Holdings in universe order
    pub holdings: Vec<AssetHolding>,
    /// Outstanding pledged loan
    pub loan_amount: Decimal,
    /// Current market index level
    pub market_index: Decimal,
    /// All-time high of the index; zero means unknown
    pub ath_index: Decimal,
}

impl PortfolioSnapshot {
    /// Create a new snapshot. A negative loan is treated as no loan.
    pub fn new(
        holdings: Vec<AssetHolding>,
        loan_amount: Decimal,
        market_index: Decimal,
        ath_index: Decimal,
    ) -> Self {
        Self {
            holdings,
            loan_amount: loan_amount.max(Decimal::ZERO),
            market_index,
            ath_index,
        }
    }

    /// Empty snapshot: no holdings, no loan, unknown index.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }

    /// Build a snapshot from the asset universe, user share counts and a market fetch.
    ///
    /// Symbols the feed could not price get a zero price instead of failing the snapshot.
    pub fn assemble<'a>(
        positions: impl IntoIterator<Item = (&'a AssetSpec, u64)>,
        market: &MarketData,
        loan_amount: Decimal,
    ) -> Self {
        let holdings = positions
            .into_iter()
            .map(|(spec, shares)| {
                let price = market.price(&spec.symbol).max(Decimal::ZERO);
                AssetHolding::from_spec(spec, price, shares)
            })
            .collect();

        Self::new(holdings, loan_amount, market.market_index, market.ath_index)
    }

    /// Get a holding by symbol.
    pub fn holding(&self, symbol: &str) -> Option<&AssetHolding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Symbols whose price was missing or zero.
    pub fn unpriced_symbols(&self) -> Vec<&str> {
        self.holdings
            .iter()
            .filter(|h| !h.is_priced())
            .map(|h| h.symbol.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, PriceMap};
    use rust_decimal_macros::dec;

    fn universe() -> Vec<AssetSpec> {
        vec![
            AssetSpec::new("00675L", "00675L.TW", Category::Attack, dec!(1.6)),
            AssetSpec::new("00662", "00662.TW", Category::Core, dec!(1.0)),
        ]
    }

    #[test]
    fn test_assemble_keeps_universe_order() {
        let specs = universe();
        let mut prices = PriceMap::new();
        prices.insert("00662".to_string(), dec!(102));
        prices.insert("00675L".to_string(), dec!(185));
        let market = MarketData::new(prices, dec!(30000), dec!(32996));

        let snapshot = PortfolioSnapshot::assemble(
            specs.iter().zip([11000u64, 25840]),
            &market,
            dec!(2350000),
        );

        assert_eq!(snapshot.holdings.len(), 2);
        assert_eq!(snapshot.holdings[0].symbol, "00675L");
        assert_eq!(snapshot.holdings[0].price, dec!(185));
        assert_eq!(snapshot.holdings[1].shares, 25840);
        assert_eq!(snapshot.market_index, dec!(30000));
        assert_eq!(snapshot.ath_index, dec!(32996));
    }

    #[test]
    fn test_assemble_degrades_missing_price() {
        let specs = universe();
        let market = MarketData::new(PriceMap::new(), Decimal::ZERO, Decimal::ZERO);

        let snapshot = PortfolioSnapshot::assemble(specs.iter().zip([100u64, 200]), &market, dec!(0));

        assert_eq!(snapshot.holding("00675L").map(|h| h.price), Some(Decimal::ZERO));
        assert_eq!(snapshot.unpriced_symbols(), vec!["00675L", "00662"]);
    }

    #[test]
    fn test_negative_loan_clamped() {
        let snapshot = PortfolioSnapshot::new(Vec::new(), dec!(-10), dec!(1), dec!(1));
        assert_eq!(snapshot.loan_amount, Decimal::ZERO);
    }
}
