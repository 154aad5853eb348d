//! Ranked provider chain.

use async_trait::async_trait;
use futures::future::join_all;
use riskdesk_core::error::DataError;
use riskdesk_core::traits::PriceProvider;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Providers tried in order until one returns a price.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn PriceProvider>>,
    timeout: Duration,
}

impl ProviderChain {
    /// Create an empty chain with a per-call timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            timeout,
        }
    }

    /// Append a provider at the lowest rank.
    pub fn with_provider(mut self, provider: Arc<dyn PriceProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Append a provider at the lowest rank.
    pub fn push(&mut self, provider: Arc<dyn PriceProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Provider names in rank order.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Look up one ticker, returning the price and the provider that answered.
    ///
    /// Errors, timeouts, empty answers and non-positive prices all fall through
    /// to the next provider.
    pub async fn resolve(&self, ticker: &str) -> Option<(Decimal, String)> {
        for provider in &self.providers {
            match timeout(self.timeout, provider.lookup(ticker)).await {
                Ok(Ok(Some(price))) if price > Decimal::ZERO => {
                    debug!(ticker, provider = provider.name(), %price, "Price resolved");
                    return Some((price, provider.name().to_string()));
                }
                Ok(Ok(Some(price))) => {
                    warn!(ticker, provider = provider.name(), %price, "Ignoring non-positive price");
                }
                Ok(Ok(None)) => {
                    debug!(ticker, provider = provider.name(), "No price from provider");
                }
                Ok(Err(e)) => {
                    warn!(ticker, provider = provider.name(), error = %e, "Price lookup failed");
                }
                Err(_) => {
                    let e = DataError::Timeout {
                        provider: provider.name().to_string(),
                        timeout_secs: self.timeout.as_secs(),
                    };
                    warn!(ticker, error = %e, "Price lookup timed out");
                }
            }
        }
        None
    }

    /// Look up many tickers concurrently. Every requested ticker is present in the result.
    pub async fn resolve_many(&self, tickers: &[String]) -> BTreeMap<String, Option<Decimal>> {
        let lookups = tickers.iter().map(|ticker| async move {
            let price = self.resolve(ticker).await.map(|(price, _)| price);
            (ticker.clone(), price)
        });
        join_all(lookups).await.into_iter().collect()
    }
}

#[async_trait]
impl PriceProvider for ProviderChain {
    async fn lookup(&self, ticker: &str) -> Result<Option<Decimal>, DataError> {
        Ok(self.resolve(ticker).await.map(|(price, _)| price))
    }

    fn name(&self) -> &str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedPriceProvider;
    use riskdesk_core::types::PriceMap;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceProvider for Failing {
        async fn lookup(&self, _ticker: &str) -> Result<Option<Decimal>, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DataError::ConnectionError("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Slow;

    #[async_trait]
    impl PriceProvider for Slow {
        async fn lookup(&self, _ticker: &str) -> Result<Option<Decimal>, DataError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some(dec!(1)))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct Quoting(Decimal);

    #[async_trait]
    impl PriceProvider for Quoting {
        async fn lookup(&self, _ticker: &str) -> Result<Option<Decimal>, DataError> {
            Ok(Some(self.0))
        }

        fn name(&self) -> &str {
            "quoting"
        }
    }

    fn fixed(name: &str, entries: &[(&str, Decimal)]) -> Arc<dyn PriceProvider> {
        let prices: PriceMap = entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        Arc::new(FixedPriceProvider::new(name, prices))
    }

    #[tokio::test]
    async fn test_first_provider_wins() {
        let chain = ProviderChain::new(Duration::from_secs(1))
            .with_provider(fixed("primary", &[("00675L.TW", dec!(185))]))
            .with_provider(fixed("secondary", &[("00675L.TW", dec!(180))]));

        assert_eq!(
            chain.resolve("00675L.TW").await,
            Some((dec!(185), "primary".to_string()))
        );
    }

    #[tokio::test]
    async fn test_falls_through_errors_and_misses() {
        let failing = Arc::new(Failing {
            calls: AtomicUsize::new(0),
        });
        let chain = ProviderChain::new(Duration::from_secs(1))
            .with_provider(failing.clone())
            .with_provider(fixed("secondary", &[]))
            .with_provider(fixed("defaults", &[("00713", dec!(52))]));

        assert_eq!(
            chain.resolve("00713.TW").await,
            Some((dec!(52), "defaults".to_string()))
        );
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(chain.names(), vec!["failing", "secondary", "defaults"]);
    }

    #[tokio::test]
    async fn test_timeout_moves_on() {
        let chain = ProviderChain::new(Duration::from_millis(50))
            .with_provider(Arc::new(Slow))
            .with_provider(fixed("defaults", &[("^TWII", dec!(28000))]));

        assert_eq!(
            chain.resolve("^TWII").await,
            Some((dec!(28000), "defaults".to_string()))
        );
    }

    #[tokio::test]
    async fn test_zero_and_negative_prices_fall_through() {
        let chain = ProviderChain::new(Duration::from_secs(1))
            .with_provider(Arc::new(Quoting(Decimal::ZERO)))
            .with_provider(Arc::new(Quoting(dec!(-3))))
            .with_provider(fixed("defaults", &[("00865B", dec!(47))]));

        assert_eq!(
            chain.resolve("00865B.TW").await,
            Some((dec!(47), "defaults".to_string()))
        );
    }

    #[tokio::test]
    async fn test_exhausted_chain_is_none() {
        let chain = ProviderChain::new(Duration::from_secs(1)).with_provider(fixed("empty", &[]));
        assert_eq!(chain.resolve("00948B.TW").await, None);
        assert_eq!(chain.lookup("00948B.TW").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_resolve_many_keeps_every_ticker() {
        let chain = ProviderChain::new(Duration::from_secs(1))
            .with_provider(fixed("defaults", &[("00662.TW", dec!(102))]));
        let tickers = vec!["00662.TW".to_string(), "00713.TW".to_string()];

        let prices = chain.resolve_many(&tickers).await;
        assert_eq!(prices.len(), 2);
        assert_eq!(prices["00662.TW"], Some(dec!(102)));
        assert_eq!(prices["00713.TW"], None);
    }
}
