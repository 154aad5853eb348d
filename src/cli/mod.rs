//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "riskdesk")]
#[command(author, version, about = "Drawdown-laddered exposure control for leveraged portfolios")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to `[logging].level` from the config)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The `--log-level` flag if given, otherwise the configured level.
    pub fn log_level_or<'a>(&self, configured: &'a str) -> &'a str {
        self.log_level.as_ref().map_or(configured, |level| level.as_str())
    }
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch prices and evaluate the configured portfolio
    Evaluate(EvaluateArgs),
    /// Print the drawdown ladder
    Tiers(TiersArgs),
    /// Start the live dashboard
    Dashboard(DashboardArgs),
    /// Validate configuration
    ValidateConfig,
    /// Write a default configuration file
    InitConfig(InitArgs),
}

#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Manual prices (CSV with symbol,price), tried before the live feed
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// Do not query Yahoo, use only the CSV and configured fallbacks
    #[arg(long)]
    pub offline: bool,

    /// Override the market index level
    #[arg(long)]
    pub index: Option<Decimal>,

    /// Override the all-time high of the index
    #[arg(long)]
    pub ath: Option<Decimal>,

    /// Override the loan amount
    #[arg(long)]
    pub loan: Option<Decimal>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Save the priced holdings as CSV
    #[arg(long)]
    pub holdings_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct TiersArgs {
    /// Mark the tier for this drawdown (percent, e.g. 12.5)
    #[arg(short, long)]
    pub drawdown: Option<Decimal>,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    /// Seconds between refreshes
    #[arg(short, long, default_value = "60")]
    pub refresh_secs: u64,

    /// Manual prices (CSV with symbol,price)
    #[arg(short, long)]
    pub prices: Option<PathBuf>,

    /// Log file (the terminal is taken by the dashboard)
    #[arg(long, default_value = "logs/riskdesk.log")]
    pub log_file: PathBuf,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
