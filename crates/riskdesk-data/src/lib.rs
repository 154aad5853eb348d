//! Market data for the riskdesk engine.
//!
//! Everything that talks to the outside world lives here: the Yahoo chart
//! client, manual CSV prices, fixed fallbacks, the ranked provider chain, the
//! TTL cache and the feed that assembles a full market fetch.

mod cache;
mod chain;
mod csv_source;
mod feed;
mod fixed;
mod yahoo;

pub use cache::PriceCache;
pub use chain::ProviderChain;
pub use csv_source::CsvPriceProvider;
pub use feed::{IndexHistory, MarketFeed};
pub use fixed::FixedPriceProvider;
pub use yahoo::{YahooConfig, YahooProvider};

use riskdesk_core::types::PriceMap;
use rust_decimal::Decimal;

/// Table lookup shared by the map-backed providers: exact key first, then the
/// part before the exchange suffix ("00675L.TW" -> "00675L").
pub(crate) fn lookup_key(prices: &PriceMap, ticker: &str) -> Option<Decimal> {
    prices
        .get(ticker)
        .or_else(|| {
            ticker
                .split_once('.')
                .and_then(|(base, _)| prices.get(base))
        })
        .copied()
}
