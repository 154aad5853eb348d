//! Validate configuration command.

use anyhow::Result;
use riskdesk_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Index: {} (fallback ATH {})", config.market.index_ticker, config.market.ath_fallback);
            println!("Yahoo enabled: {}", config.market.use_yahoo);
            println!("Cache TTL: {}s", config.market.cache_ttl_secs);
            println!("Loan: {}", config.portfolio.loan_amount);
            println!(
                "Gates: red alert < {}%, warning < {}%, loan ratio > {}%",
                config.policy.red_alert_maintenance,
                config.policy.warning_maintenance,
                config.policy.max_loan_ratio
            );
            println!("Rebalance threshold: {} pts", config.policy.rebalance_threshold);
            println!("Assets:");
            for asset in &config.assets {
                println!(
                    "  {:<8} {:<10} {:<8} beta {:>5}  shares {}",
                    asset.symbol,
                    asset.ticker,
                    asset.category.label(),
                    asset.beta,
                    asset.shares
                );
            }
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
