//! # airt CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use airt_cli::config::{run_config, ConfigArgs};
use airt_cli::package::{run_package, PackageArgs};
use airt_cli::score::{run_score, ScoreArgs};
use airt_cli::verify::{run_verify, VerifyArgs};
use airt_cli::{exit_code, DEFAULT_CONFIG_PATH};

/// AI risk tiering and evidence packaging.
///
/// Scores AI systems against a versioned rule set and produces
/// tamper-evident evidence packages for audit.
#[derive(Parser, Debug)]
#[command(name = "airt", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to the scoring config (YAML or JSON).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scoring config operations.
    Config(ConfigArgs),

    /// Assess an inventory and print each system's tier.
    Score(ScoreArgs),

    /// Build and write a tamper-evident evidence package.
    Package(PackageArgs),

    /// Verify an evidence package against its manifest.
    Verify(VerifyArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(config = %cli.config.display(), "airt CLI starting");

    let result = match &cli.command {
        Commands::Config(args) => run_config(args, &cli.config),
        Commands::Score(args) => run_score(args, &cli.config),
        Commands::Package(args) => run_package(args, &cli.config),
        Commands::Verify(args) => run_verify(args),
    };

    if let Err(e) = &result {
        tracing::error!("{e:#}");
        eprintln!("error: {e:#}");
    }
    ExitCode::from(exit_code(&result))
}
