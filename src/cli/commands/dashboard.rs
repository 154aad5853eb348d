//! Dashboard command implementation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use riskdesk_data::PriceCache;
use riskdesk_engine::RiskEngine;
use riskdesk_monitor::{Dashboard, DashboardState, EvaluationReport};
use std::path::Path;
use tokio::runtime::Handle;
use tracing::info;

use super::{build_feed, load_or_default, snapshot};
use crate::cli::DashboardArgs;

const MAX_MESSAGES: usize = 50;

pub async fn run(args: DashboardArgs, config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path)?;
    let (feed, source) = build_feed(&config, args.prices.as_deref(), false)?;
    let engine = RiskEngine::new(config.policy.clone());
    let mut cache = PriceCache::new(chrono::Duration::seconds(
        i64::try_from(config.market.cache_ttl_secs).unwrap_or(i64::MAX),
    ));
    let refresh_ms = args.refresh_secs.max(1).saturating_mul(1000);
    let handle = Handle::current();

    info!(providers = %source, refresh_secs = args.refresh_secs, "Starting dashboard");

    let mut messages: Vec<String> = Vec::new();
    let mut last_fetch: Option<DateTime<Utc>> = None;

    tokio::task::spawn_blocking(move || {
        let dashboard = Dashboard::new(refresh_ms);
        dashboard.run(|| {
            let market = handle.block_on(feed.fetch_cached(&mut cache));
            let snapshot = snapshot(&config, &market, config.portfolio.loan_amount);
            let evaluation = engine.evaluate(&snapshot);

            if last_fetch != Some(market.fetched_at) {
                last_fetch = Some(market.fetched_at);
                messages.push(format!(
                    "{} {} priced {}/{} | {}",
                    market.fetched_at.format("%H:%M:%S"),
                    evaluation.tier.label,
                    market.prices.len(),
                    feed.universe().len(),
                    evaluation.decision.headline()
                ));
                if messages.len() > MAX_MESSAGES {
                    messages.remove(0);
                }
            }

            let report = EvaluationReport::new(&snapshot, evaluation)
                .with_source(source.clone())
                .with_fetched_at(market.fetched_at)
                .with_policy(engine.policy().clone());

            DashboardState {
                report: Some(report),
                messages: messages.clone(),
            }
        })
    })
    .await
    .context("Dashboard task failed")??;

    info!("Dashboard closed");
    Ok(())
}
