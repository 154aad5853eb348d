//! Market feed: one fetch of prices, index level and all-time high.

use async_trait::async_trait;
use chrono::Utc;
use riskdesk_core::error::DataError;
use riskdesk_core::types::{AssetSpec, MarketData, PriceMap};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::{PriceCache, ProviderChain};

/// Source of index history used to find the all-time high.
#[async_trait]
pub trait IndexHistory: Send + Sync {
    /// Highest daily high of `ticker` over `range` (e.g. "5y").
    async fn all_time_high(&self, ticker: &str, range: &str) -> Result<Option<Decimal>, DataError>;
}

/// Assembles [`MarketData`] for an asset universe.
pub struct MarketFeed {
    universe: Vec<AssetSpec>,
    index_ticker: String,
    chain: ProviderChain,
    history: Option<Arc<dyn IndexHistory>>,
    ath_range: String,
    ath_fallback: Decimal,
    history_timeout: Duration,
}

impl MarketFeed {
    /// Create a new feed.
    pub fn new(universe: Vec<AssetSpec>, index_ticker: impl Into<String>, chain: ProviderChain) -> Self {
        Self {
            universe,
            index_ticker: index_ticker.into(),
            chain,
            history: None,
            ath_range: "5y".to_string(),
            ath_fallback: Decimal::ZERO,
            history_timeout: Duration::from_secs(10),
        }
    }

    /// Use an index history source for the all-time high.
    pub fn with_history(mut self, history: Arc<dyn IndexHistory>, range: impl Into<String>) -> Self {
        self.history = Some(history);
        self.ath_range = range.into();
        self
    }

    /// All-time high used when history is unavailable. Zero means unknown.
    pub fn with_ath_fallback(mut self, ath: Decimal) -> Self {
        self.ath_fallback = ath;
        self
    }

    pub fn with_history_timeout(mut self, timeout: Duration) -> Self {
        self.history_timeout = timeout;
        self
    }

    /// Display symbols of the universe, the cache key.
    pub fn symbols(&self) -> Vec<String> {
        self.universe.iter().map(|s| s.symbol.clone()).collect()
    }

    pub fn universe(&self) -> &[AssetSpec] {
        &self.universe
    }

    /// Fetch everything. Never fails: unpriced assets are left out of the map,
    /// an unavailable index is zero and an unavailable ATH uses the fallback.
    pub async fn fetch(&self) -> MarketData {
        let mut tickers: Vec<String> = self.universe.iter().map(|s| s.ticker.clone()).collect();
        tickers.push(self.index_ticker.clone());

        let (quotes, ath) = tokio::join!(self.chain.resolve_many(&tickers), self.fetch_ath());

        let prices: PriceMap = self
            .universe
            .iter()
            .filter_map(|spec| {
                let price = quotes.get(&spec.ticker).copied().flatten()?;
                Some((spec.symbol.clone(), price))
            })
            .collect();

        let market_index = quotes
            .get(&self.index_ticker)
            .copied()
            .flatten()
            .unwrap_or_else(|| {
                warn!(ticker = %self.index_ticker, "Market index unavailable, using 0");
                Decimal::ZERO
            });

        let data = MarketData::new(prices, market_index, ath);
        let missing = data.missing_symbols(self.universe.iter().map(|s| s.symbol.as_str()));
        if !missing.is_empty() {
            warn!(?missing, "Unpriced assets will be valued at 0");
        }
        info!(
            priced = data.prices.len(),
            universe = self.universe.len(),
            %market_index,
            ath = %ath,
            "Market data fetched"
        );

        data
    }

    /// Fetch through a cache, refreshing it when stale.
    pub async fn fetch_cached(&self, cache: &mut PriceCache) -> MarketData {
        let symbols = self.symbols();
        if let Some(data) = cache.get(&symbols) {
            info!(fetched_at = %data.fetched_at, "Using cached market data");
            return data.clone();
        }

        let data = self.fetch().await;
        cache.evict_expired(Utc::now());
        cache.put(&symbols, data.clone());
        data
    }

    async fn fetch_ath(&self) -> Decimal {
        let Some(history) = &self.history else {
            return self.ath_fallback;
        };

        match timeout(
            self.history_timeout,
            history.all_time_high(&self.index_ticker, &self.ath_range),
        )
        .await
        {
            Ok(Ok(Some(ath))) if ath > Decimal::ZERO => ath,
            Ok(Ok(_)) => {
                warn!(ticker = %self.index_ticker, fallback = %self.ath_fallback, "No index history, using fallback ATH");
                self.ath_fallback
            }
            Ok(Err(e)) => {
                warn!(ticker = %self.index_ticker, error = %e, fallback = %self.ath_fallback, "ATH lookup failed, using fallback");
                self.ath_fallback
            }
            Err(_) => {
                warn!(ticker = %self.index_ticker, fallback = %self.ath_fallback, "ATH lookup timed out, using fallback");
                self.ath_fallback
            }
        }
    }
}
