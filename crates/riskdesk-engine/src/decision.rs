//! Rebalance decision resolver.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::RiskMetrics;

/// Safety gates and rebalance band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecisionPolicy {
    /// Maintenance ratio below which everything else is overridden
    pub red_alert_maintenance: Decimal,
    /// Maintenance ratio below which the structure counts as unsafe
    pub warning_maintenance: Decimal,
    /// Loan ratio above which the structure counts as unsafe
    pub max_loan_ratio: Decimal,
    /// Dead band around the target exposure, in percentage points
    pub rebalance_threshold: Decimal,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            red_alert_maintenance: dec!(250),
            warning_maintenance: dec!(300),
            max_loan_ratio: dec!(35),
            rebalance_threshold: dec!(3.0),
        }
    }
}

impl DecisionPolicy {
    /// Check whether both structural gates pass.
    pub fn is_structurally_safe(&self, metrics: &RiskMetrics) -> bool {
        metrics.maintenance_ratio >= self.warning_maintenance
            && metrics.loan_ratio <= self.max_loan_ratio
    }
}

/// The single instruction produced for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Decision {
    /// Maintenance ratio critical: stop buying, repay the loan
    RedAlert,
    /// Unsafe structure, but attack is over target: sell attack to repay
    RiskWarningWithOpportunity { sell_amount: Decimal },
    /// Unsafe structure: no rebalancing
    RiskWarning,
    /// Attack over target: move the excess to the ammo reserve
    SellSignal { sell_amount: Decimal },
    /// Attack under target: buy the shortfall
    BuySignal { buy_amount: Decimal },
    /// Within the dead band
    Hold,
}

/// How urgent a decision is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Success,
}

/// Display color for a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Red,
    Orange,
    Green,
}

impl Decision {
    pub fn severity(&self) -> Severity {
        match self {
            Decision::RedAlert => Severity::Critical,
            Decision::RiskWarningWithOpportunity { .. }
            | Decision::RiskWarning
            | Decision::SellSignal { .. } => Severity::Warning,
            Decision::BuySignal { .. } | Decision::Hold => Severity::Success,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Decision::RedAlert | Decision::SellSignal { .. } => Tone::Red,
            Decision::RiskWarningWithOpportunity { .. } | Decision::RiskWarning => Tone::Orange,
            Decision::BuySignal { .. } | Decision::Hold => Tone::Green,
        }
    }

    /// Amount to trade, if the decision carries one.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Decision::RiskWarningWithOpportunity { sell_amount }
            | Decision::SellSignal { sell_amount } => Some(*sell_amount),
            Decision::BuySignal { buy_amount } => Some(*buy_amount),
            Decision::RedAlert | Decision::RiskWarning | Decision::Hold => None,
        }
    }

    /// Short title.
    pub fn headline(&self) -> &'static str {
        match self {
            Decision::RedAlert => "RED ALERT",
            Decision::RiskWarningWithOpportunity { .. } => "RISK WARNING (deleverage opportunity)",
            Decision::RiskWarning => "RISK WARNING",
            Decision::SellSignal { .. } => "SELL SIGNAL",
            Decision::BuySignal { .. } => "BUY SIGNAL",
            Decision::Hold => "HOLD",
        }
    }

    /// One-line instruction for the operator.
    pub fn instruction(&self) -> String {
        match self {
            Decision::RedAlert => {
                "Maintenance ratio is critical. Do not buy; repay the loan now.".to_string()
            }
            Decision::RiskWarningWithOpportunity { sell_amount } => format!(
                "Weak structure (maintenance or loan ratio outside safe limits). Sell {:.0} of attack and repay the loan.",
                sell_amount
            ),
            Decision::RiskWarning => {
                "Weak structure (maintenance or loan ratio outside safe limits). No large additions.".to_string()
            }
            Decision::SellSignal { sell_amount } => format!(
                "Attack exposure too high. Sell {:.0} and move it to the ammo reserve.",
                sell_amount
            ),
            Decision::BuySignal { buy_amount } => {
                format!("Attack exposure too low. Buy {:.0} of attack.", buy_amount)
            }
            Decision::Hold => "On target and financially healthy. Keep holding.".to_string(),
        }
    }
}

/// Resolve the decision for a set of metrics. First matching rule wins.
pub fn resolve(metrics: &RiskMetrics, policy: &DecisionPolicy) -> Decision {
    if metrics.maintenance_ratio < policy.red_alert_maintenance {
        return Decision::RedAlert;
    }

    let excess = metrics.attack_value().saturating_sub(metrics.target_attack_value());

    if !policy.is_structurally_safe(metrics) {
        if metrics.gap > policy.rebalance_threshold {
            return Decision::RiskWarningWithOpportunity {
                sell_amount: excess,
            };
        }
        return Decision::RiskWarning;
    }

    if metrics.gap > policy.rebalance_threshold {
        Decision::SellSignal {
            sell_amount: excess,
        }
    } else if metrics.gap < -policy.rebalance_threshold {
        Decision::BuySignal {
            buy_amount: metrics.target_attack_value().saturating_sub(metrics.attack_value()),
        }
    } else {
        Decision::Hold
    }
}
