//! Price provider trait definition.

use crate::error::DataError;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// A source of latest prices.
///
/// `Ok(None)` means the provider is healthy but has no price for the ticker;
/// `Err` means the lookup itself failed. Callers chaining several providers
/// treat both as "try the next one".
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Look up the latest price for a provider ticker.
    async fn lookup(&self, ticker: &str) -> Result<Option<Decimal>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Constant(Decimal);

    #[async_trait]
    impl PriceProvider for Constant {
        async fn lookup(&self, _ticker: &str) -> Result<Option<Decimal>, DataError> {
            Ok(Some(self.0))
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[tokio::test]
    async fn test_provider_as_trait_object() {
        let provider: Box<dyn PriceProvider> = Box::new(Constant(dec!(42)));
        assert_eq!(provider.lookup("ANY").await.unwrap(), Some(dec!(42)));
        assert_eq!(provider.name(), "constant");
    }
}
