//! CLI command implementations.

pub mod dashboard;
pub mod evaluate;
pub mod init;
pub mod tiers;
pub mod validate;

use anyhow::{Context, Result};
use riskdesk_config::{load_config, AppConfig};
use riskdesk_core::error::RiskDeskResult;
use riskdesk_core::types::{MarketData, PortfolioSnapshot};
use riskdesk_data::{
    CsvPriceProvider, FixedPriceProvider, MarketFeed, ProviderChain, YahooConfig, YahooProvider,
};
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Load the configuration file, or the built-in defaults when it does not exist.
pub(crate) fn load_or_default(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Build the market feed from config.
///
/// Provider rank: manual CSV, then Yahoo, then configured fallback prices.
/// Returns the feed and a label naming the providers in rank order.
pub(crate) fn build_feed(
    config: &AppConfig,
    prices: Option<&Path>,
    offline: bool,
) -> RiskDeskResult<(MarketFeed, String)> {
    let timeout = Duration::from_secs(config.market.request_timeout_secs);
    let mut chain = ProviderChain::new(timeout);

    if let Some(path) = prices {
        let csv = CsvPriceProvider::from_path(path)?;
        info!(path = %path.display(), count = csv.prices().len(), "Loaded manual prices");
        chain.push(Arc::new(csv));
    }

    let yahoo = if config.market.use_yahoo && !offline {
        let yahoo = YahooProvider::new(YahooConfig {
            base_url: config.market.yahoo_base_url.clone(),
            request_timeout: timeout,
            ..Default::default()
        })?;
        Some(Arc::new(yahoo))
    } else {
        None
    };
    if let Some(yahoo) = &yahoo {
        chain.push(yahoo.clone());
    }

    let fallback = config.fallback_prices();
    if !fallback.is_empty() {
        chain.push(Arc::new(FixedPriceProvider::new("fallback", fallback)));
    }

    if chain.is_empty() {
        warn!("No price providers configured, every asset will be valued at 0");
    }
    let source = chain.names().join(" > ");

    let mut feed = MarketFeed::new(config.universe(), config.market.index_ticker.clone(), chain)
        .with_ath_fallback(config.market.ath_fallback)
        .with_history_timeout(timeout);
    if let Some(yahoo) = yahoo {
        feed = feed.with_history(yahoo, config.market.ath_range.clone());
    }

    Ok((feed, source))
}

/// Snapshot of the configured holdings at the fetched prices.
pub(crate) fn snapshot(config: &AppConfig, market: &MarketData, loan: Decimal) -> PortfolioSnapshot {
    let universe = config.universe();
    PortfolioSnapshot::assemble(
        universe.iter().zip(config.share_counts()),
        market,
        loan,
    )
}
