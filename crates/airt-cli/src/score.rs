//! # Score CLI — Assess an inventory file.
//!
//! Prints one row per system with its total score and tier. Systems that
//! cannot be scored are listed after the table with the reason.
//!
//! ```bash
//! airt score --inventory data/sample_systems.json
//! airt score --inventory data/sample_systems.json --all-or-nothing
//! airt score --inventory data/sample_systems.json --json
//! ```
//!
//! Exit code 2 when a best-effort batch has failures.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use airt_core::Timestamp;
use airt_registry::SystemRecord;
use airt_scoring::{assess_batch, BatchMode, BatchOutcome, ScoringConfig};

use crate::inputs::{load_config, load_systems};

/// Score subcommand arguments.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Inventory file (JSON array of system records).
    #[arg(long)]
    pub inventory: PathBuf,

    /// Abort on the first system that cannot be scored.
    #[arg(long)]
    pub all_or_nothing: bool,

    /// Print the full results as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Timestamp recorded on every result (RFC 3339, UTC). Defaults to now.
    #[arg(long)]
    pub computed_at: Option<String>,
}

/// Execute the score subcommand.
pub fn run_score(args: &ScoreArgs, config_path: &Path) -> Result<u8> {
    let config = load_config(config_path)?;
    let systems = load_systems(&args.inventory)?;
    let computed_at = match &args.computed_at {
        Some(s) => Timestamp::parse(s).context("invalid --computed-at")?,
        None => Timestamp::now(),
    };
    let mode = if args.all_or_nothing {
        BatchMode::AllOrNothing
    } else {
        BatchMode::BestEffort
    };

    let outcome = score_inventory(&systems, &config, computed_at, mode)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.results)?);
    } else {
        print_table(&systems, &outcome);
    }

    Ok(crate::check_exit_code(outcome.is_complete()))
}

/// Assess `systems` under `config`.
pub fn score_inventory(
    systems: &[SystemRecord],
    config: &ScoringConfig,
    computed_at: Timestamp,
    mode: BatchMode,
) -> Result<BatchOutcome> {
    assess_batch(systems, config, computed_at, mode).context("scoring failed")
}

fn print_table(systems: &[SystemRecord], outcome: &BatchOutcome) {
    println!("{:<36}  {:<32}  {:>5}  TIER", "SYSTEM_ID", "NAME", "SCORE");
    for result in &outcome.results {
        let name = systems
            .iter()
            .find(|s| s.system_id == result.system_id())
            .map(|s| s.name.as_str())
            .unwrap_or("");
        println!(
            "{:<36}  {:<32}  {:>5}  {}",
            result.system_id(),
            truncate(name, 32),
            result.total_score(),
            result.risk_tier()
        );
    }
    if !outcome.failures.is_empty() {
        println!();
        println!("{} system(s) could not be scored:", outcome.failures.len());
        for failure in &outcome.failures {
            println!("  {failure}");
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}~")
    }
}
