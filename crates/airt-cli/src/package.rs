//! # Package CLI — Build and write an evidence package.
//!
//! Loads the inventory and risk register into a fresh registry, scores every
//! system, snapshots the registry, and writes
//! `<out-dir>/<case>_<package-id>.zip`. The manifest is printed on success.
//!
//! ```bash
//! airt package --inventory data/sample_systems.json \
//!     --risks data/sample_risks.json \
//!     --out-dir out --package-id 2026-q1 \
//!     --generated-at 2026-03-01T12:00:00Z
//! ```
//!
//! Scoring is all-or-nothing here: a package never silently omits a system.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use airt_core::{PackageId, Timestamp};
use airt_evidence::{build_package, PackageAssembler, PackageRequest};
use airt_registry::SnapshotSource;
use airt_scoring::BatchMode;

use crate::inputs::{load_config, load_risks, load_systems, populate_registry};
use crate::score::score_inventory;

/// Package subcommand arguments.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Inventory file (JSON array of system records).
    #[arg(long)]
    pub inventory: PathBuf,

    /// Risk register file (JSON array of lifecycle risk entries).
    #[arg(long)]
    pub risks: Option<PathBuf>,

    /// Directory the archive is written to. Created if absent.
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Package identifier. Generated when omitted.
    #[arg(long)]
    pub package_id: Option<String>,

    /// Case label; prefixes the archive and summary names.
    #[arg(long, default_value = "case1")]
    pub case: String,

    /// Recorded as the package author.
    #[arg(long, default_value = "AI Product Engineer")]
    pub generated_by: String,

    /// Generation timestamp (RFC 3339, UTC). Defaults to now. Fix it to get
    /// byte-identical archives from identical inputs.
    #[arg(long)]
    pub generated_at: Option<String>,
}

/// Execute the package subcommand.
pub fn run_package(args: &PackageArgs, config_path: &Path) -> Result<u8> {
    let path = write_package(args, config_path)?;
    let report = airt_evidence::verify_package(&path)
        .with_context(|| format!("failed to reopen written package: {}", path.display()))?;
    if !report.is_intact() {
        anyhow::bail!("written package {} does not verify", path.display());
    }
    Ok(crate::EXIT_OK)
}

/// Build and write the package; returns the archive path.
pub fn write_package(args: &PackageArgs, config_path: &Path) -> Result<PathBuf> {
    let config = load_config(config_path)?;
    let package_id = match &args.package_id {
        Some(id) => PackageId::new(id.as_str()).context("invalid --package-id")?,
        None => PackageId::generate(),
    };
    let generated_at = match &args.generated_at {
        Some(s) => Timestamp::parse(s).context("invalid --generated-at")?,
        None => Timestamp::now(),
    };

    let systems = load_systems(&args.inventory)?;
    let risks = match &args.risks {
        Some(path) => load_risks(path)?,
        None => Vec::new(),
    };

    let outcome = score_inventory(&systems, &config, generated_at, BatchMode::AllOrNothing)?;
    let registry = populate_registry(systems, risks)?;
    for result in outcome.results {
        registry
            .put_tiering(result)
            .context("failed to store tiering result")?;
    }

    let request = PackageRequest::new(
        package_id,
        args.case.as_str(),
        args.generated_by.as_str(),
        generated_at,
    );
    let snapshot = registry.snapshot();
    let package = build_package(&snapshot, &config, &request).context("failed to build package")?;
    let path = PackageAssembler::new(&args.out_dir)
        .write(&package)
        .context("failed to write package")?;

    println!("{}", serde_json::to_string_pretty(package.manifest())?);
    println!();
    println!("written: {}", path.display());
    Ok(path)
}
