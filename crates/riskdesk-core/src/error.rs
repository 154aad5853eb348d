//! Error types for the riskdesk system.
//!
//! The decision engine itself never fails; these errors belong to the
//! collaborators around it (price retrieval, configuration, I/O).

use thiserror::Error;

/// Top-level riskdesk error.
#[derive(Error, Debug)]
pub enum RiskDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RiskDeskError {
    fn from(err: serde_json::Error) -> Self {
        RiskDeskError::Serialization(err.to_string())
    }
}

/// Price and market data errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available for {0}")]
    NoDataAvailable(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Provider {provider} timed out after {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },

    #[error("Negative price {price} for {symbol}")]
    NegativePrice {
        symbol: String,
        price: rust_decimal::Decimal,
    },
}

/// Result type alias for riskdesk operations.
pub type RiskDeskResult<T> = Result<T, RiskDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_converts_to_top_level() {
        let err: RiskDeskError = DataError::NoDataAvailable("prices.csv".to_string()).into();
        assert_eq!(err.to_string(), "Data error: No data available for prices.csv");
    }

    #[test]
    fn test_io_error_converts_to_top_level() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RiskDeskError = io.into();
        assert!(matches!(err, RiskDeskError::Io(_)));
    }

    #[test]
    fn test_timeout_message() {
        let err = DataError::Timeout {
            provider: "yahoo".to_string(),
            timeout_secs: 10,
        };
        assert_eq!(err.to_string(), "Provider yahoo timed out after 10s");
    }
}
