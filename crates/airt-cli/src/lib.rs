//! # airt-cli — CLI Tool for AI Risk Tiering
//!
//! Provides the `airt` command-line interface over the scoring engine,
//! the in-memory registry, and the evidence pipeline.
//!
//! ## Subcommands
//!
//! - `airt config check` — Load and validate a scoring rule set.
//! - `airt score` — Assess an inventory file and print a tier table.
//! - `airt package` — Build and write a tamper-evident evidence package.
//! - `airt verify` — Check an evidence package against its manifest.
//!
//! ```bash
//! airt config check
//! airt score --inventory data/sample_systems.json
//! airt package --inventory data/sample_systems.json --risks data/sample_risks.json \
//!     --out-dir out --package-id 2026-q1
//! airt verify out/case1_2026-q1.zip
//! ```
//!
//! Every handler returns `anyhow::Result<u8>`; the binary maps the value to
//! the process exit code.

pub mod config;
pub mod inputs;
pub mod package;
pub mod score;
pub mod verify;

/// Default scoring config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/scoring-v1.yaml";

/// Exit code for success.
pub const EXIT_OK: u8 = 0;
/// Exit code for an operational error.
pub const EXIT_ERROR: u8 = 1;
/// Exit code for a package that failed verification, or an incomplete batch.
pub const EXIT_FAILED_CHECK: u8 = 2;

/// Exit code for a command that ran to completion: `passed` is whether the
/// package verified or the batch scored every system.
pub fn check_exit_code(passed: bool) -> u8 {
    if passed {
        EXIT_OK
    } else {
        EXIT_FAILED_CHECK
    }
}

/// Process exit code for a handler outcome.
pub fn exit_code(outcome: &anyhow::Result<u8>) -> u8 {
    match outcome {
        Ok(code) => *code,
        Err(_) => EXIT_ERROR,
    }
}
