//! End-to-end evaluation of a snapshot.

use riskdesk_core::types::PortfolioSnapshot;
use serde::Serialize;
use tracing::debug;

use crate::{
    classify, compute_metrics, drawdown_pct, resolve, value_portfolio, Decision, DecisionPolicy,
    RiskMetrics, Tier,
};

/// Output of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub tier: Tier,
    pub metrics: RiskMetrics,
    pub decision: Decision,
}

/// Run the full pipeline: drawdown tier, valuation, ratios, decision.
pub fn evaluate(snapshot: &PortfolioSnapshot, policy: &DecisionPolicy) -> Evaluation {
    let drawdown = drawdown_pct(snapshot.market_index, snapshot.ath_index);
    let tier = classify(drawdown);
    let valuation = value_portfolio(snapshot);
    let metrics = compute_metrics(&valuation, snapshot.loan_amount, drawdown, tier);
    let decision = resolve(&metrics, policy);

    debug!(
        drawdown = %metrics.drawdown_pct,
        tier = tier.label,
        total_assets = %metrics.total_assets,
        maintenance_ratio = %metrics.maintenance_ratio,
        loan_ratio = %metrics.loan_ratio,
        attack_exposure = %metrics.attack_exposure_pct,
        gap = %metrics.gap,
        decision = decision.headline(),
        "Evaluated snapshot"
    );

    Evaluation {
        tier: *tier,
        metrics,
        decision,
    }
}

/// Engine bound to a decision policy.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    policy: DecisionPolicy,
}

impl RiskEngine {
    /// Create a new engine.
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    /// Evaluate a snapshot.
    pub fn evaluate(&self, snapshot: &PortfolioSnapshot) -> Evaluation {
        evaluate(snapshot, &self.policy)
    }

    /// Get the current policy.
    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }
}
