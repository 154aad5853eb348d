//! Evaluation report generation.

use chrono::{DateTime, Utc};
use riskdesk_core::error::RiskDeskResult;
use riskdesk_core::types::{Category, PortfolioSnapshot};
use riskdesk_engine::{DecisionPolicy, Evaluation, Tone, TIERS};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::path::Path;

/// Comfortable portfolio beta range shown next to the computed beta.
pub const BETA_TARGET_BAND: (Decimal, Decimal) = (dec!(1.05), dec!(1.2));

/// One holding as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingLine {
    pub symbol: String,
    pub category: Category,
    pub price: Decimal,
    pub shares: u64,
    pub value: Decimal,
    /// Share of total assets, in percent
    pub weight_pct: Decimal,
}

/// Complete evaluation report.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub generated_at: DateTime<Utc>,
    /// When the prices were fetched, if they came from a feed
    pub fetched_at: Option<DateTime<Utc>>,
    /// Where prices came from (e.g. "yahoo", "csv")
    pub source: String,
    pub market_index: Decimal,
    pub ath_index: Decimal,
    pub holdings: Vec<HoldingLine>,
    /// Symbols valued at zero for lack of a price
    pub unpriced: Vec<String>,
    /// Gates the decision was resolved against
    pub policy: DecisionPolicy,
    pub evaluation: Evaluation,
}

impl EvaluationReport {
    /// Build a report for an evaluated snapshot.
    pub fn new(snapshot: &PortfolioSnapshot, evaluation: Evaluation) -> Self {
        let total = evaluation.metrics.total_assets;
        let holdings = snapshot
            .holdings
            .iter()
            .map(|h| {
                let value = h.value();
                HoldingLine {
                    symbol: h.symbol.clone(),
                    category: h.category,
                    price: h.price,
                    shares: h.shares,
                    value,
                    weight_pct: if total > Decimal::ZERO {
                        value / total * dec!(100)
                    } else {
                        Decimal::ZERO
                    },
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            fetched_at: None,
            source: "manual".to_string(),
            market_index: snapshot.market_index,
            ath_index: snapshot.ath_index,
            holdings,
            unpriced: snapshot
                .unpriced_symbols()
                .into_iter()
                .filter(|s| snapshot.holding(s).is_some_and(|h| h.shares > 0))
                .map(str::to_string)
                .collect(),
            policy: DecisionPolicy::default(),
            evaluation,
        }
    }

    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(fetched_at);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Check whether the beta sits inside [`BETA_TARGET_BAND`].
    pub fn beta_in_band(&self) -> bool {
        let beta = self.evaluation.metrics.beta;
        beta >= BETA_TARGET_BAND.0 && beta <= BETA_TARGET_BAND.1
    }

    /// Band of the maintenance ratio against the policy gates.
    pub fn maintenance_tone(&self) -> Tone {
        let ratio = self.evaluation.metrics.maintenance_ratio;
        if ratio < self.policy.red_alert_maintenance {
            Tone::Red
        } else if ratio < self.policy.warning_maintenance {
            Tone::Orange
        } else {
            Tone::Green
        }
    }

    /// Ladder with the active tier marked.
    pub fn ladder(&self) -> String {
        let mut s = String::new();
        for tier in TIERS.iter() {
            let marker = if tier.index == self.evaluation.tier.index {
                ">>"
            } else {
                "  "
            };
            s.push_str(&format!(
                "{} {:<12} {:<12} target {:>3}%  ({})\n",
                marker,
                tier.label,
                tier.range_label(),
                tier.target_exposure,
                tier.description
            ));
        }
        s
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let m = &self.evaluation.metrics;
        let decision = &self.evaluation.decision;
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                  EXPOSURE CONTROL REPORT                   \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("MARKET\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Index:               {:.0}\n", self.market_index));
        s.push_str(&format!("  All-Time High:       {:.0}\n", self.ath_index));
        s.push_str(&format!("  Drawdown:            -{:.2}%\n", m.drawdown_pct));
        s.push_str(&format!(
            "  Tier:                {} ({})\n",
            self.evaluation.tier.label, self.evaluation.tier.description
        ));
        s.push_str(&format!("  Target Exposure:     {}%\n", m.target_exposure));
        s.push_str(&format!("  Price Source:        {}\n", self.source));
        if let Some(fetched_at) = self.fetched_at {
            s.push_str(&format!(
                "  Fetched At:          {}\n",
                fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        s.push('\n');

        s.push_str("LADDER\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&self.ladder());
        s.push('\n');

        s.push_str("PORTFOLIO\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Total Assets:        ${:.0}\n", m.total_assets));
        s.push_str(&format!("  Loan:                ${:.0}\n", m.loan_amount));
        s.push_str(&format!("  Net Assets:          ${:.0}\n", m.net_assets));
        for category in Category::ALL {
            s.push_str(&format!(
                "  {:<20} ${:.0} ({:.1}%)\n",
                format!("{}:", category),
                m.category_value(category),
                m.category_pct(category)
            ));
        }
        s.push('\n');

        s.push_str("RISK RATIOS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Beta:                {:.2} (target {}~{}{})\n",
            m.beta,
            BETA_TARGET_BAND.0,
            BETA_TARGET_BAND.1,
            if self.beta_in_band() { "" } else { ", outside" }
        ));
        s.push_str(&format!(
            "  Maintenance Ratio:   {:.0}% (alert < {}%, warn < {}%)\n",
            m.maintenance_ratio, self.policy.red_alert_maintenance, self.policy.warning_maintenance
        ));
        s.push_str(&format!("  Loan Ratio:          {:.1}%\n", m.loan_ratio));
        s.push_str(&format!(
            "  Attack Exposure:     {:.1}% (gap {:+.1} pts)\n",
            m.attack_exposure_pct, m.gap
        ));
        s.push('\n');

        s.push_str("HOLDINGS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for h in &self.holdings {
            s.push_str(&format!(
                "  {:<8} {:<8} {:>10.2} x {:>7} = ${:>12.0} ({:.1}%)\n",
                h.symbol,
                h.category.label(),
                h.price,
                h.shares,
                h.value,
                h.weight_pct
            ));
        }
        if !self.unpriced.is_empty() {
            s.push_str(&format!(
                "  Unpriced (valued at 0): {}\n",
                self.unpriced.join(", ")
            ));
        }
        s.push('\n');

        s.push_str("INSTRUCTION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  [{:?}] {}\n",
            decision.severity(),
            decision.headline()
        ));
        s.push_str(&format!("  {}\n", decision.instruction()));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export holdings to CSV.
    pub fn holdings_to_csv(&self) -> String {
        let mut csv = String::from("symbol,category,price,shares,value\n");
        for h in &self.holdings {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                h.symbol,
                h.category.label().to_lowercase(),
                h.price,
                h.shares,
                h.value
            ));
        }
        csv
    }

    /// Write the JSON report to a file.
    pub fn save_json(&self, path: &Path) -> RiskDeskResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Write the holdings CSV to a file.
    pub fn save_holdings_csv(&self, path: &Path) -> RiskDeskResult<()> {
        std::fs::write(path, self.holdings_to_csv())?;
        Ok(())
    }
}
