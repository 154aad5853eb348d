//! Manually entered prices from CSV.

use async_trait::async_trait;
use csv::ReaderBuilder;
use riskdesk_core::error::DataError;
use riskdesk_core::traits::PriceProvider;
use riskdesk_core::types::PriceMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::lookup_key;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker")]
    symbol: String,
    #[serde(alias = "Price", alias = "close", alias = "Close")]
    price: Decimal,
}

/// Price provider backed by a `symbol,price` CSV file.
pub struct CsvPriceProvider {
    prices: PriceMap,
}

impl CsvPriceProvider {
    /// Load prices from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        let file = std::fs::File::open(path)
            .map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(file)
    }

    /// Load prices from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut prices = PriceMap::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            if record.price < Decimal::ZERO {
                return Err(DataError::NegativePrice {
                    symbol: record.symbol,
                    price: record.price,
                });
            }
            prices.insert(record.symbol, record.price);
        }

        Ok(Self { prices })
    }

    /// All loaded prices.
    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn lookup(&self, ticker: &str) -> Result<Option<Decimal>, DataError> {
        Ok(lookup_key(&self.prices, ticker))
    }

    fn name(&self) -> &str {
        "csv"
    }
}
