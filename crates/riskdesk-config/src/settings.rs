//! Configuration structures.

use riskdesk_core::error::{RiskDeskError, RiskDeskResult};
use riskdesk_core::types::{AssetSpec, Category, PriceMap};
use riskdesk_engine::DecisionPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub market: MarketSettings,
    #[serde(default)]
    pub policy: DecisionPolicy,
    #[serde(default)]
    pub portfolio: PortfolioSettings,
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            market: MarketSettings::default(),
            policy: DecisionPolicy::default(),
            portfolio: PortfolioSettings::default(),
            assets: default_assets(),
        }
    }
}

impl AppConfig {
    /// Asset universe in configured order.
    pub fn universe(&self) -> Vec<AssetSpec> {
        self.assets.iter().map(AssetSettings::spec).collect()
    }

    /// Configured share count per asset, in universe order.
    pub fn share_counts(&self) -> Vec<u64> {
        self.assets.iter().map(|a| a.shares).collect()
    }

    /// Fallback prices keyed by symbol, plus the index fallback if configured.
    pub fn fallback_prices(&self) -> PriceMap {
        let mut prices: PriceMap = self
            .assets
            .iter()
            .filter_map(|a| a.fallback_price.map(|p| (a.symbol.clone(), p)))
            .collect();
        if let Some(index) = self.market.index_fallback {
            prices.insert(self.market.index_ticker.clone(), index);
        }
        prices
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> RiskDeskResult<()> {
        let mut seen = HashSet::new();
        for asset in &self.assets {
            if !seen.insert(asset.symbol.as_str()) {
                return Err(RiskDeskError::Validation(format!(
                    "duplicate asset symbol: {}",
                    asset.symbol
                )));
            }
            if asset.fallback_price.is_some_and(|p| p < Decimal::ZERO) {
                return Err(RiskDeskError::Validation(format!(
                    "negative fallback price for {}",
                    asset.symbol
                )));
            }
        }

        if self.portfolio.loan_amount < Decimal::ZERO {
            return Err(RiskDeskError::Validation("loan_amount must be >= 0".to_string()));
        }
        if self.policy.red_alert_maintenance > self.policy.warning_maintenance {
            return Err(RiskDeskError::Validation(
                "policy.red_alert_maintenance must not exceed policy.warning_maintenance".to_string(),
            ));
        }
        if self.policy.rebalance_threshold < Decimal::ZERO {
            return Err(RiskDeskError::Validation(
                "policy.rebalance_threshold must be >= 0".to_string(),
            ));
        }
        if self.market.cache_ttl_secs == 0 {
            return Err(RiskDeskError::Validation("market.cache_ttl_secs must be > 0".to_string()));
        }
        Ok(())
    }

    /// Default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "riskdesk".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Market data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub index_ticker: String,
    /// ATH used when index history cannot be fetched
    pub ath_fallback: Decimal,
    /// Lookback for the ATH search
    pub ath_range: String,
    /// Index level used when no provider answers
    pub index_fallback: Option<Decimal>,
    pub use_yahoo: bool,
    pub yahoo_base_url: String,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            index_ticker: "^TWII".to_string(),
            ath_fallback: dec!(32996),
            ath_range: "5y".to_string(),
            index_fallback: None,
            use_yahoo: true,
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            request_timeout_secs: 10,
            cache_ttl_secs: 60,
        }
    }
}

/// Account settings entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioSettings {
    /// Outstanding pledged loan
    pub loan_amount: Decimal,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            loan_amount: dec!(2350000),
        }
    }
}

/// One asset of the universe with the user's share count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSettings {
    pub symbol: String,
    pub ticker: String,
    pub category: Category,
    pub beta: Decimal,
    #[serde(default)]
    pub shares: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_price: Option<Decimal>,
}

impl AssetSettings {
    fn new(symbol: &str, category: Category, beta: Decimal, shares: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            ticker: format!("{}.TW", symbol),
            category,
            beta,
            shares,
            fallback_price: None,
        }
    }

    pub fn spec(&self) -> AssetSpec {
        AssetSpec::new(self.symbol.clone(), self.ticker.clone(), self.category, self.beta)
    }
}

fn default_assets() -> Vec<AssetSettings> {
    vec![
        AssetSettings::new("00675L", Category::Attack, dec!(1.6), 11000),
        AssetSettings::new("00631L", Category::Attack, dec!(1.6), 331),
        AssetSettings::new("00670L", Category::Attack, dec!(2.0), 616),
        AssetSettings::new("00662", Category::Core, dec!(1.0), 25840),
        AssetSettings::new("00713", Category::Defense, dec!(0.6), 66000),
        AssetSettings::new("00865B", Category::Ammo, dec!(0.0), 10000),
        AssetSettings::new("00948B", Category::Ammo, dec!(-0.1), 0),
    ]
}
