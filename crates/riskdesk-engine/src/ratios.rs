//! Risk ratios derived from a valuation.

use riskdesk_core::types::Category;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{Tier, Valuation};

/// Maintenance ratio reported when there is no loan.
pub const MAINTENANCE_RATIO_SENTINEL: Decimal = dec!(999);

/// Derived risk metrics for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    /// Index drawdown from ATH, in percent
    pub drawdown_pct: Decimal,
    pub category_values: BTreeMap<Category, Decimal>,
    pub total_assets: Decimal,
    pub net_assets: Decimal,
    pub loan_amount: Decimal,
    /// Value-weighted portfolio beta
    pub beta: Decimal,
    /// Total assets / loan, in percent
    pub maintenance_ratio: Decimal,
    /// Loan / total assets, in percent
    pub loan_ratio: Decimal,
    /// Attack value / total assets, in percent
    pub attack_exposure_pct: Decimal,
    /// Target attack exposure of the active tier, in percent
    pub target_exposure: Decimal,
    /// attack_exposure_pct - target_exposure
    pub gap: Decimal,
}

impl RiskMetrics {
    /// Value of one category.
    pub fn category_value(&self, category: Category) -> Decimal {
        self.category_values
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Current attack category value.
    pub fn attack_value(&self) -> Decimal {
        self.category_value(Category::Attack)
    }

    /// Attack value the active tier asks for.
    pub fn target_attack_value(&self) -> Decimal {
        match self.total_assets.checked_mul(self.target_exposure) {
            Some(scaled) => scaled / dec!(100),
            None => (self.total_assets / dec!(100)).saturating_mul(self.target_exposure),
        }
    }

    /// Share of total assets held in a category, in percent.
    pub fn category_pct(&self, category: Category) -> Decimal {
        ratio_pct(self.category_value(category), self.total_assets)
    }
}

/// numerator / denominator * 100 for a positive denominator, saturating at
/// `Decimal::MAX` (or `MIN` for a negative numerator) on overflow.
pub(crate) fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .and_then(|q| q.checked_mul(dec!(100)))
        .unwrap_or_else(|| saturated(numerator))
}

fn saturated(sign_of: Decimal) -> Decimal {
    if sign_of.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// numerator / denominator * 100, zero when the denominator is not positive.
fn ratio_pct(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        percent_of(numerator, denominator)
    } else {
        Decimal::ZERO
    }
}

/// Compute risk metrics from a valuation and the active tier.
pub fn compute_metrics(
    valuation: &Valuation,
    loan_amount: Decimal,
    drawdown_pct: Decimal,
    tier: &Tier,
) -> RiskMetrics {
    let total_assets = valuation.total_assets;

    let beta = if total_assets > Decimal::ZERO {
        let weighted = valuation.beta_weighted_sum();
        weighted
            .checked_div(total_assets)
            .unwrap_or_else(|| saturated(weighted))
    } else {
        Decimal::ZERO
    };

    let maintenance_ratio = if loan_amount > Decimal::ZERO {
        percent_of(total_assets, loan_amount)
    } else {
        MAINTENANCE_RATIO_SENTINEL
    };

    let loan_ratio = ratio_pct(loan_amount, total_assets);
    let attack_exposure_pct = ratio_pct(valuation.category_value(Category::Attack), total_assets);

    RiskMetrics {
        drawdown_pct,
        category_values: valuation.category_values.clone(),
        total_assets,
        net_assets: valuation.net_assets,
        loan_amount,
        beta,
        maintenance_ratio,
        loan_ratio,
        attack_exposure_pct,
        target_exposure: tier.target_exposure,
        gap: attack_exposure_pct.saturating_sub(tier.target_exposure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value_portfolio, TIERS};
    use riskdesk_core::types::{AssetHolding, PortfolioSnapshot};

    fn snapshot(holdings: Vec<AssetHolding>, loan: Decimal) -> PortfolioSnapshot {
        PortfolioSnapshot::new(holdings, loan, Decimal::ZERO, Decimal::ZERO)
    }

    #[test]
    fn test_ratios() {
        let snap = snapshot(
            vec![
                AssetHolding::new("ATK", dec!(100), 30, dec!(2), Category::Attack),
                AssetHolding::new("DEF", dec!(100), 70, dec!(0.5), Category::Defense),
            ],
            dec!(2500),
        );
        let valuation = value_portfolio(&snap);
        let metrics = compute_metrics(&valuation, snap.loan_amount, Decimal::ZERO, &TIERS[0]);

        assert_eq!(metrics.total_assets, dec!(10000));
        // (3000 * 2 + 7000 * 0.5) / 10000
        assert_eq!(metrics.beta, dec!(0.95));
        assert_eq!(metrics.maintenance_ratio, dec!(400));
        assert_eq!(metrics.loan_ratio, dec!(25));
        assert_eq!(metrics.attack_exposure_pct, dec!(30));
        assert_eq!(metrics.gap, dec!(7));
        assert_eq!(metrics.target_attack_value(), dec!(2300));
        assert_eq!(metrics.category_pct(Category::Defense), dec!(70));
    }

    #[test]
    fn test_zero_loan_uses_sentinel() {
        let snap = snapshot(
            vec![AssetHolding::new("ATK", dec!(10), 10, dec!(1.6), Category::Attack)],
            Decimal::ZERO,
        );
        let metrics = compute_metrics(&value_portfolio(&snap), Decimal::ZERO, Decimal::ZERO, &TIERS[0]);

        assert_eq!(metrics.maintenance_ratio, MAINTENANCE_RATIO_SENTINEL);
        assert_eq!(metrics.maintenance_ratio, dec!(999));
        assert_eq!(metrics.loan_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_zero_total_assets() {
        let snap = snapshot(
            vec![AssetHolding::new("ATK", Decimal::ZERO, 500, dec!(1.6), Category::Attack)],
            dec!(1000),
        );
        let metrics = compute_metrics(&value_portfolio(&snap), snap.loan_amount, Decimal::ZERO, &TIERS[0]);

        assert_eq!(metrics.total_assets, Decimal::ZERO);
        assert_eq!(metrics.beta, Decimal::ZERO);
        assert_eq!(metrics.loan_ratio, Decimal::ZERO);
        assert_eq!(metrics.attack_exposure_pct, Decimal::ZERO);
        assert_eq!(metrics.maintenance_ratio, Decimal::ZERO);
        assert_eq!(metrics.gap, dec!(-23));
        assert_eq!(metrics.category_pct(Category::Attack), Decimal::ZERO);
    }

    #[test]
    fn test_dust_loan_saturates_maintenance() {
        let snap = snapshot(
            vec![AssetHolding::new("00662", dec!(102), 25840, dec!(1.0), Category::Core)],
            dec!(0.0000000000000000000001),
        );
        let metrics = compute_metrics(&value_portfolio(&snap), snap.loan_amount, Decimal::ZERO, &TIERS[0]);

        assert_eq!(metrics.maintenance_ratio, Decimal::MAX);
        assert!(metrics.loan_ratio < dec!(0.000001));
    }

    #[test]
    fn test_target_value_of_saturated_total() {
        let snap = snapshot(
            vec![AssetHolding::new("00675L", dec!(100000000000), u64::MAX, dec!(1.6), Category::Attack)],
            dec!(1000),
        );
        let metrics = compute_metrics(&value_portfolio(&snap), snap.loan_amount, Decimal::ZERO, &TIERS[5]);

        assert_eq!(metrics.total_assets, Decimal::MAX);
        assert_eq!(metrics.attack_exposure_pct, dec!(100));
        assert!(metrics.target_attack_value() > Decimal::ZERO);
        assert!(metrics.target_attack_value() < Decimal::MAX);
    }

    #[test]
    fn test_negative_beta_asset() {
        let snap = snapshot(
            vec![AssetHolding::new("00948B", dec!(10), 100, dec!(-0.1), Category::Ammo)],
            Decimal::ZERO,
        );
        let metrics = compute_metrics(&value_portfolio(&snap), Decimal::ZERO, Decimal::ZERO, &TIERS[0]);
        assert_eq!(metrics.beta, dec!(-0.1));
    }
}
