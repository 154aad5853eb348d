//! Market valuation of a snapshot.

use riskdesk_core::types::{Category, PortfolioSnapshot};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Valued position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionValue {
    pub symbol: String,
    pub category: Category,
    pub beta: Decimal,
    /// price * shares, zero if unpriced
    pub value: Decimal,
}

/// Category and total market values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub positions: Vec<PositionValue>,
    /// Always holds all four categories
    pub category_values: BTreeMap<Category, Decimal>,
    pub total_assets: Decimal,
    /// total_assets - loan, may be negative
    pub net_assets: Decimal,
}

impl Valuation {
    /// Value of one category.
    pub fn category_value(&self, category: Category) -> Decimal {
        self.category_values
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of value * beta across positions.
    pub fn beta_weighted_sum(&self) -> Decimal {
        self.positions.iter().fold(Decimal::ZERO, |acc, p| {
            acc.saturating_add(p.value.saturating_mul(p.beta))
        })
    }
}

/// Value every holding and aggregate by category.
pub fn value_portfolio(snapshot: &PortfolioSnapshot) -> Valuation {
    let positions: Vec<PositionValue> = snapshot
        .holdings
        .iter()
        .map(|h| PositionValue {
            symbol: h.symbol.clone(),
            category: h.category,
            beta: h.beta,
            value: h.value(),
        })
        .collect();

    let mut category_values: BTreeMap<Category, Decimal> =
        Category::ALL.iter().map(|c| (*c, Decimal::ZERO)).collect();
    for position in &positions {
        let value = category_values.entry(position.category).or_insert(Decimal::ZERO);
        *value = value.saturating_add(position.value);
    }

    let total_assets = category_values
        .values()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v));

    Valuation {
        positions,
        category_values,
        total_assets,
        net_assets: total_assets.saturating_sub(snapshot.loan_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskdesk_core::types::AssetHolding;
    use rust_decimal_macros::dec;

    fn holding(symbol: &str, price: Decimal, shares: u64, category: Category) -> AssetHolding {
        AssetHolding::new(symbol, price, shares, dec!(1), category)
    }

    #[test]
    fn test_category_aggregation() {
        let snapshot = PortfolioSnapshot::new(
            vec![
                holding("00675L", dec!(185), 11000, Category::Attack),
                holding("00631L", dec!(250), 331, Category::Attack),
                holding("00662", dec!(102), 25840, Category::Core),
                holding("00865B", dec!(47), 10000, Category::Ammo),
            ],
            dec!(1000000),
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let valuation = value_portfolio(&snapshot);
        assert_eq!(valuation.category_value(Category::Attack), dec!(2117750));
        assert_eq!(valuation.category_value(Category::Core), dec!(2635680));
        assert_eq!(valuation.category_value(Category::Defense), Decimal::ZERO);
        assert_eq!(valuation.category_value(Category::Ammo), dec!(470000));
        assert_eq!(valuation.total_assets, dec!(5223430));
        assert_eq!(valuation.net_assets, dec!(4223430));
    }

    #[test]
    fn test_total_equals_category_sum() {
        let snapshot = PortfolioSnapshot::new(
            vec![
                holding("A", dec!(1.5), 7, Category::Attack),
                holding("B", dec!(0), 100, Category::Core),
                holding("C", dec!(33.33), 3, Category::Defense),
                holding("D", dec!(10), 0, Category::Ammo),
                holding("E", dec!(2.25), 40, Category::Attack),
            ],
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let valuation = value_portfolio(&snapshot);
        let sum: Decimal = Category::ALL
            .iter()
            .map(|c| valuation.category_value(*c))
            .sum();
        assert_eq!(valuation.total_assets, sum);
        assert_eq!(valuation.category_values.len(), 4);
    }

    #[test]
    fn test_unpriced_holding_degrades_to_zero() {
        let snapshot = PortfolioSnapshot::new(
            vec![
                holding("00670L", Decimal::ZERO, 616, Category::Attack),
                holding("00713", dec!(52), 100, Category::Defense),
            ],
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let valuation = value_portfolio(&snapshot);
        assert_eq!(valuation.positions[0].value, Decimal::ZERO);
        assert_eq!(valuation.total_assets, dec!(5200));
    }

    #[test]
    fn test_oversized_holdings_saturate() {
        let snapshot = PortfolioSnapshot::new(
            vec![
                holding("00675L", dec!(100000000000), u64::MAX, Category::Attack),
                holding("00631L", dec!(100000000000), u64::MAX, Category::Attack),
                holding("00713", dec!(52), 100, Category::Defense),
            ],
            dec!(1000),
            Decimal::ZERO,
            Decimal::ZERO,
        );

        let valuation = value_portfolio(&snapshot);
        assert_eq!(valuation.category_value(Category::Attack), Decimal::MAX);
        assert_eq!(valuation.total_assets, Decimal::MAX);
        assert_eq!(valuation.beta_weighted_sum(), Decimal::MAX);
        assert!(valuation.net_assets > Decimal::ZERO);
    }

    #[test]
    fn test_negative_net_assets() {
        let snapshot = PortfolioSnapshot::new(
            vec![holding("00713", dec!(50), 10, Category::Defense)],
            dec!(1000),
            Decimal::ZERO,
            Decimal::ZERO,
        );
        assert_eq!(value_portfolio(&snapshot).net_assets, dec!(-500));
    }
}
