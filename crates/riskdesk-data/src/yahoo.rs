//! Yahoo Finance chart API client.

use async_trait::async_trait;
use reqwest::{header, Client};
use riskdesk_core::error::DataError;
use riskdesk_core::traits::PriceProvider;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::feed::IndexHistory;

/// Yahoo client configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0 (riskdesk)".to_string(),
        }
    }
}

/// Chart API response types
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Decimal::from_f64_retain(value).map(|d| d.round_dp(4))
}

impl ChartResponse {
    fn into_result(self, ticker: &str) -> Result<Option<ChartResult>, DataError> {
        if let Some(err) = self.chart.error {
            if err.code == "Not Found" {
                return Ok(None);
            }
            return Err(DataError::ApiError(format!(
                "{}: {} {}",
                ticker, err.code, err.description
            )));
        }
        Ok(self.chart.result.and_then(|r| r.into_iter().next()))
    }
}

impl ChartResult {
    fn series(&self) -> Option<&QuoteSeries> {
        self.indicators.as_ref().and_then(|i| i.quote.first())
    }

    /// Regular market price, or the last non-null close.
    fn latest_price(&self) -> Option<Decimal> {
        self.meta
            .regular_market_price
            .and_then(to_decimal)
            .or_else(|| {
                self.series()
                    .and_then(|s| s.close.iter().rev().flatten().next().copied())
                    .and_then(to_decimal)
            })
    }

    /// Highest daily high in the series.
    fn highest_high(&self) -> Option<Decimal> {
        self.series()
            .and_then(|s| {
                s.high
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|h| h.is_finite())
                    .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))))
            })
            .and_then(to_decimal)
    }
}

fn parse_chart(body: &str, ticker: &str) -> Result<Option<ChartResult>, DataError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::ParseError(e.to_string()))?;
    response.into_result(ticker)
}

/// Yahoo Finance price provider.
pub struct YahooProvider {
    config: YahooConfig,
    client: Client,
}

impl YahooProvider {
    /// Create a new Yahoo client.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| DataError::ConnectionError(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Fetch a chart body for a ticker.
    async fn get_chart(&self, ticker: &str, range: &str) -> Result<String, DataError> {
        let url = format!("{}/v8/finance/chart/{}", self.config.base_url, ticker);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        // Unknown tickers come back as 404 with a chart error body.
        if !resp.status().is_success() && resp.status() != reqwest::StatusCode::NOT_FOUND {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DataError::ApiError(format!("{}: {}", status, text)));
        }

        resp.text()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn lookup(&self, ticker: &str) -> Result<Option<Decimal>, DataError> {
        let body = self.get_chart(ticker, "1d").await?;
        let price = parse_chart(&body, ticker)?.and_then(|r| r.latest_price());
        debug!(ticker, price = ?price, "Yahoo quote");
        Ok(price)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[async_trait]
impl IndexHistory for YahooProvider {
    async fn all_time_high(&self, ticker: &str, range: &str) -> Result<Option<Decimal>, DataError> {
        let body = self.get_chart(ticker, range).await?;
        let high = parse_chart(&body, ticker)?.and_then(|r| r.highest_high());
        debug!(ticker, range, high = ?high, "Yahoo history high");
        Ok(high)
    }
}
