//! Tiers command implementation.

use anyhow::Result;
use riskdesk_engine::{classify, TIERS};

use crate::cli::TiersArgs;

pub async fn run(args: TiersArgs) -> Result<()> {
    let active = args.drawdown.map(|d| classify(d).index);

    println!("Drawdown ladder:");
    println!();
    for tier in TIERS.iter() {
        let marker = if Some(tier.index) == active { ">>" } else { "  " };
        println!(
            "{} {:<12} {:<12} target {:>3}%  {}",
            marker,
            tier.label,
            tier.range_label(),
            tier.target_exposure,
            tier.description
        );
    }

    if let Some(drawdown) = args.drawdown {
        let tier = classify(drawdown);
        println!();
        println!(
            "Drawdown {}% falls in {}: target attack exposure {}%",
            drawdown, tier.label, tier.target_exposure
        );
    }

    Ok(())
}
