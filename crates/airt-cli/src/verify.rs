//! # Verify CLI — Check an evidence package against its manifest.
//!
//! ```bash
//! airt verify out/case1_2026-q1.zip
//! airt verify out/case1_2026-q1.zip --json
//! ```
//!
//! Exit code 0 when intact, 2 when any check fails, 1 when the archive cannot
//! be read at all.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use airt_evidence::{verify_package, VerificationReport};

/// Verify subcommand arguments.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the package archive.
    pub archive: PathBuf,

    /// Print the full report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the verify subcommand.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let report = verify_package(&args.archive)
        .with_context(|| format!("failed to verify {}", args.archive.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(crate::check_exit_code(report.is_intact()))
}

fn status(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "FAIL"
    }
}

fn print_report(report: &VerificationReport) {
    println!("archive:    {}", report.archive.display());
    println!("package_id: {}", report.package_id);
    println!();
    for check in &report.artifacts {
        let detail = if check.is_missing() {
            "MISSING".to_string()
        } else {
            status(check.is_ok()).to_string()
        };
        println!("  {:<40} {detail}", check.name);
    }
    for name in &report.unexpected {
        println!("  {name:<40} UNEXPECTED");
    }
    println!();
    println!("inputs_hash:     {}", status(report.inputs_hash.is_ok()));
    println!("outputs_hash:    {}", status(report.outputs_hash.is_ok()));
    println!("config_snapshot: {}", status(report.config_snapshot.is_ok()));
    println!("scoring_version: {}", status(report.scoring_version.is_ok()));
    match &report.systems_count {
        Some(check) => println!("systems_count:   {}", status(check.is_ok())),
        None => println!("systems_count:   no inventory export"),
    }
    println!();
    if report.is_intact() {
        println!("Package intact.");
    } else {
        println!("Package FAILED verification.");
    }
}
