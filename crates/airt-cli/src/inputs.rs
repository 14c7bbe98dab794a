//! Input files: scoring config, system inventory, and risk register.
//!
//! Inventory and risk files are JSON arrays of `SystemRecord` and
//! `LifecycleRiskEntry`. Risk severity is recomputed on load, so the file's
//! `severity` field may be omitted.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use airt_registry::{LifecycleRiskEntry, Registry, SystemRecord};
use airt_scoring::ScoringConfig;

/// Load and validate the scoring config at `path`.
pub fn load_config(path: &Path) -> Result<ScoringConfig> {
    ScoringConfig::load(path)
        .with_context(|| format!("failed to load scoring config: {}", path.display()))
}

fn read_json_array<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what} file: {}", path.display()))
}

/// Read an inventory file.
pub fn load_systems(path: &Path) -> Result<Vec<SystemRecord>> {
    read_json_array(path, "inventory")
}

/// Read a risk register file.
pub fn load_risks(path: &Path) -> Result<Vec<LifecycleRiskEntry>> {
    read_json_array(path, "risk register")
}

/// Build a registry from loaded systems and risks.
///
/// Systems are registered in file order, which becomes inventory order.
pub fn populate_registry(
    systems: Vec<SystemRecord>,
    risks: Vec<LifecycleRiskEntry>,
) -> Result<Registry> {
    let registry = Registry::new();
    for system in systems {
        let id = system.system_id;
        registry
            .register_system(system)
            .with_context(|| format!("failed to register system {id}"))?;
    }
    for risk in risks {
        let id = risk.risk_id;
        registry
            .record_risk(risk)
            .with_context(|| format!("failed to record risk {id}"))?;
    }
    tracing::debug!(systems = registry.len(), "registry populated");
    Ok(registry)
}
