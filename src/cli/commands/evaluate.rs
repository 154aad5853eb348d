//! Evaluate command implementation.

use anyhow::{Context, Result};
use riskdesk_engine::RiskEngine;
use riskdesk_monitor::EvaluationReport;
use std::path::Path;
use tracing::info;

use super::{build_feed, load_or_default, snapshot};
use crate::cli::{EvaluateArgs, OutputFormat};

pub async fn run(args: EvaluateArgs, config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path)?;
    let (feed, source) = build_feed(&config, args.prices.as_deref(), args.offline)?;

    info!(providers = %source, assets = feed.universe().len(), "Fetching market data");
    let mut market = feed.fetch().await;
    if let Some(index) = args.index {
        market.market_index = index;
    }
    if let Some(ath) = args.ath {
        market.ath_index = ath;
    }

    let loan = args.loan.unwrap_or(config.portfolio.loan_amount);
    let snapshot = snapshot(&config, &market, loan);
    let engine = RiskEngine::new(config.policy.clone());
    let evaluation = engine.evaluate(&snapshot);
    info!(
        tier = evaluation.tier.label,
        decision = evaluation.decision.headline(),
        amount = ?evaluation.decision.amount(),
        "Evaluation complete"
    );

    let report = EvaluationReport::new(&snapshot, evaluation)
        .with_source(source)
        .with_fetched_at(market.fetched_at)
        .with_policy(engine.policy().clone());

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        report
            .save_json(save_path)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Report saved to {:?}", save_path);
    }

    if let Some(csv_path) = &args.holdings_csv {
        report
            .save_holdings_csv(csv_path)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;
        info!("Holdings saved to {:?}", csv_path);
    }

    Ok(())
}
