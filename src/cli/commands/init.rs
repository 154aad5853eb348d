//! Init configuration command.

use anyhow::{bail, Context, Result};
use riskdesk_config::AppConfig;
use std::path::Path;
use tracing::info;

use crate::cli::InitArgs;

pub async fn run(args: InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let toml = AppConfig::default_toml().context("Failed to render default config")?;
    std::fs::write(config_path, toml)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    info!(path = %config_path.display(), "Default configuration written");
    println!("Wrote {}", config_path.display());
    Ok(())
}
