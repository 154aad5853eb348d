//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, AssetSettings, LoggingConfig, MarketSettings, PortfolioSettings,
};

use config::{Config, ConfigError, Environment, File, FileFormat};
use riskdesk_core::error::{RiskDeskError, RiskDeskResult};
use std::path::Path;

fn environment() -> Environment {
    Environment::with_prefix("RISKDESK")
        .separator("__")
        .try_parsing(true)
}

fn config_error(err: ConfigError) -> RiskDeskError {
    RiskDeskError::Config(err.to_string())
}

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> RiskDeskResult<AppConfig> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()
        .map_err(config_error)?;

    let config: AppConfig = config.try_deserialize().map_err(config_error)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from a TOML string (no environment overlay).
pub fn parse_config(toml: &str) -> RiskDeskResult<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .map_err(config_error)?;

    let config: AppConfig = config.try_deserialize().map_err(config_error)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, RiskDeskError::Config(_)));
    }

    #[test]
    fn test_bad_category_is_config_error() {
        let toml = r#"
            [[assets]]
            symbol = "X"
            ticker = "X.TW"
            category = "offense"
            beta = 1
        "#;
        assert!(matches!(parse_config(toml), Err(RiskDeskError::Config(_))));
    }
}
