//! Asset universe and holding types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allocation bucket an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// High-beta leveraged funds
    Attack,
    /// Broad market core holding
    Core,
    /// Low-volatility dividend holding
    Defense,
    /// Bond reserve used as the rebalancing sink/source
    Ammo,
}

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Category; 4] = [
        Category::Attack,
        Category::Core,
        Category::Defense,
        Category::Ammo,
    ];

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Attack => "Attack",
            Category::Core => "Core",
            Category::Defense => "Defense",
            Category::Ammo => "Ammo",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of an asset in the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Display symbol (e.g. "00675L")
    pub symbol: String,
    /// Provider-facing ticker (e.g. "00675L.TW")
    pub ticker: String,
    /// Allocation category
    pub category: Category,
    /// Beta relative to the market index
    pub beta: Decimal,
}

impl AssetSpec {
    /// Create a new asset spec.
    pub fn new(
        symbol: impl Into<String>,
        ticker: impl Into<String>,
        category: Category,
        beta: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            ticker: ticker.into(),
            category,
            beta,
        }
    }
}

/// A priced position for one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHolding {
    pub symbol: String,
    /// Latest price, zero when the feed had nothing
    pub price: Decimal,
    pub shares: u64,
    pub beta: Decimal,
    pub category: Category,
}

impl AssetHolding {
    /// Create a new holding.
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        shares: u64,
        beta: Decimal,
        category: Category,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            shares,
            beta,
            category,
        }
    }

    /// Price a spec with the given share count.
    pub fn from_spec(spec: &AssetSpec, price: Decimal, shares: u64) -> Self {
        Self::new(spec.symbol.clone(), price, shares, spec.beta, spec.category)
    }

    /// Market value (price * shares). A non-positive price values the holding at zero.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn value(&self) -> Decimal {
        if self.price <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.price.saturating_mul(Decimal::from(self.shares))
    }

    /// Check whether the holding had a usable price.
    pub fn is_priced(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_holding_value() {
        let holding = AssetHolding::new("00675L", dec!(185), 11000, dec!(1.6), Category::Attack);
        assert_eq!(holding.value(), dec!(2035000));
        assert!(holding.is_priced());
    }

    #[test]
    fn test_unpriced_holding_is_worth_zero() {
        let holding = AssetHolding::new("00631L", Decimal::ZERO, 331, dec!(1.6), Category::Attack);
        assert_eq!(holding.value(), Decimal::ZERO);
        assert!(!holding.is_priced());

        let negative = AssetHolding::new("00631L", dec!(-5), 331, dec!(1.6), Category::Attack);
        assert_eq!(negative.value(), Decimal::ZERO);
    }

    #[test]
    fn test_huge_position_saturates() {
        let holding = AssetHolding::new("00675L", dec!(100000000000), u64::MAX, dec!(1.6), Category::Attack);
        assert_eq!(holding.value(), Decimal::MAX);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Ammo).unwrap();
        assert_eq!(json, "\"ammo\"");
        let parsed: Category = serde_json::from_str("\"defense\"").unwrap();
        assert_eq!(parsed, Category::Defense);
    }
}
