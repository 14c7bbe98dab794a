//! # Config CLI — Validate a scoring rule set.
//!
//! ```bash
//! airt config check
//! airt --config custom-rules.json config check
//! ```

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use airt_registry::SystemRecord;
use airt_scoring::{RiskTier, ScoredEntity};

use crate::inputs::load_config;

/// Config subcommand arguments.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Load the config, run every completeness check, and print its shape.
    Check,
}

/// Execute the config subcommand.
pub fn run_config(args: &ConfigArgs, config_path: &Path) -> Result<u8> {
    match args.command {
        ConfigCommand::Check => run_check(config_path),
    }
}

fn run_check(config_path: &Path) -> Result<u8> {
    let config = load_config(config_path)?;
    config.ensure_covers(SystemRecord::DIMENSIONS)?;

    let thresholds = config.tier_thresholds();
    println!("config:          {}", config_path.display());
    println!("app_version:     {}", config.app_version());
    println!("scoring_version: {}", config.scoring_version());
    println!(
        "thresholds:      TIER_1 >= {}, TIER_2 >= {}",
        thresholds.tier1_min, thresholds.tier2_min
    );
    println!();
    println!("dimensions:");
    for (dimension, values) in config.point_mappings() {
        let rendered: Vec<String> = values.iter().map(|(v, p)| format!("{v}={p}")).collect();
        println!("  {dimension:<22} {}", rendered.join(", "));
    }
    println!();
    println!("dependency bands:");
    let deps = config.dependency_scoring();
    for band in &deps.bands {
        println!("  {:<8} >= {:<3} {} pts", band.name, band.min_count, band.points);
    }
    println!(
        "  opaque vendor bonus {} ({})",
        deps.opaque_vendor_bonus,
        deps.opaque_keywords.join(", ")
    );
    println!();
    for tier in RiskTier::ALL {
        println!("{tier}: {} default controls", config.default_controls_for(tier).len());
    }
    println!();
    println!("OK");
    Ok(crate::EXIT_OK)
}
