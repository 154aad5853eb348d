//! Exposure control CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use riskdesk_config::load_config;
use riskdesk_monitor::setup_logging;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings from the config file, if it loads; errors surface later.
    let logging = load_config(&cli.config)
        .map(|config| config.logging)
        .unwrap_or_default();
    let json_logs = cli.json_logs || logging.format == "json";

    // The dashboard owns the terminal, so its logs go to a file.
    let log_file = match &cli.command {
        Commands::Dashboard(args) => Some(args.log_file.clone()),
        _ => logging.file.map(PathBuf::from),
    };
    let level = cli.log_level_or(&logging.level);
    let _guard = setup_logging(level, json_logs, log_file.as_deref());

    match cli.command {
        Commands::Evaluate(args) => cli::commands::evaluate::run(args, &cli.config).await,
        Commands::Tiers(args) => cli::commands::tiers::run(args).await,
        Commands::Dashboard(args) => cli::commands::dashboard::run(args, &cli.config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
        Commands::InitConfig(args) => cli::commands::init::run(args, &cli.config).await,
    }
}
