//! Market data caching.

use chrono::{DateTime, Duration, Utc};
use riskdesk_core::types::MarketData;
use std::collections::HashMap;

struct CacheEntry {
    data: MarketData,
    stored_at: DateTime<Utc>,
}

/// In-memory market data cache with a time-to-live.
///
/// Keyed by the set of symbols requested, so changing the universe never
/// serves a stale subset.
pub struct PriceCache {
    cache: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl PriceCache {
    /// Create a new cache.
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: HashMap::new(),
            ttl,
        }
    }

    /// Generate cache key: sorted, de-duplicated symbols.
    fn cache_key<S: AsRef<str>>(symbols: &[S]) -> String {
        let mut keys: Vec<&str> = symbols.iter().map(|s| s.as_ref()).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.join(",")
    }

    /// Get cached data if it is still fresh at `now`.
    pub fn get_at<S: AsRef<str>>(&self, symbols: &[S], now: DateTime<Utc>) -> Option<&MarketData> {
        let key = Self::cache_key(symbols);
        self.cache
            .get(&key)
            .filter(|entry| now - entry.stored_at < self.ttl)
            .map(|entry| &entry.data)
    }

    /// Get cached data if it is still fresh.
    pub fn get<S: AsRef<str>>(&self, symbols: &[S]) -> Option<&MarketData> {
        self.get_at(symbols, Utc::now())
    }

    /// Store data fetched at `now`.
    pub fn put_at<S: AsRef<str>>(&mut self, symbols: &[S], data: MarketData, now: DateTime<Utc>) {
        let key = Self::cache_key(symbols);
        self.cache.insert(
            key,
            CacheEntry {
                data,
                stored_at: now,
            },
        );
    }

    /// Store freshly fetched data.
    pub fn put<S: AsRef<str>>(&mut self, symbols: &[S], data: MarketData) {
        self.put_at(symbols, data, Utc::now());
    }

    /// Drop expired entries.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.cache.retain(|_, entry| now - entry.stored_at < ttl);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
