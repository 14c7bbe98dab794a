//! # Package Verification
//!
//! Reopens an archive and checks it against its own manifest:
//!
//! - every listed artifact is present, with the recorded digest and size;
//! - no unlisted entry is present;
//! - `outputs_hash` recomputed from the digests of the bytes actually in the
//!   archive matches the recorded value;
//! - `inputs_hash` recomputed from the manifest's recorded input facts
//!   matches the recorded value;
//! - those facts agree with the archive: `config_snapshot_hash` is the digest
//!   of the config snapshot entry as stored, that snapshot parses as a rule
//!   set of the recorded `scoring_version`, and `systems_count` equals the
//!   inventory's data rows.
//!
//! Flipping one byte of one artifact fails that artifact and `outputs_hash`
//! and nothing else, unless the artifact is one the input facts point at.
//!
//! Entries larger than [`MAX_ENTRY_BYTES`] are refused. A name that appears
//! twice in the archive is reported as unexpected.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use airt_core::{ContentDigest, PackageId};
use airt_scoring::ScoringConfig;
use serde::Serialize;
use zip::ZipArchive;

use crate::artifact::MANIFEST_NAME;
use crate::csv::count_data_rows;
use crate::error::EvidenceError;
use crate::export::ExportKind;
use crate::manifest::{outputs_hash, EvidenceManifest, ManifestEntry};

/// Largest archive entry `verify_package()` will read.
pub const MAX_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// Result of checking one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactCheck {
    pub name: String,
    pub recorded_sha256: String,
    pub recorded_bytes: u64,
    /// `None` when the entry is absent from the archive.
    pub actual_sha256: Option<String>,
    pub actual_bytes: Option<u64>,
}

impl ArtifactCheck {
    pub fn is_ok(&self) -> bool {
        self.actual_sha256.as_deref() == Some(self.recorded_sha256.as_str())
            && self.actual_bytes == Some(self.recorded_bytes)
    }

    pub fn is_missing(&self) -> bool {
        self.actual_sha256.is_none()
    }
}

/// Recorded versus recomputed aggregate hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashCheck {
    pub recorded: String,
    pub actual: String,
}

impl HashCheck {
    pub fn is_ok(&self) -> bool {
        self.recorded == self.actual
    }
}

/// A recorded input fact against what the archive content says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactCheck<T> {
    pub recorded: T,
    /// `None` when the archive has no single entry to derive it from.
    pub actual: Option<T>,
}

impl<T: PartialEq> FactCheck<T> {
    pub fn is_ok(&self) -> bool {
        self.actual.as_ref() == Some(&self.recorded)
    }
}

/// Outcome of `verify_package()`.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub archive: PathBuf,
    pub package_id: PackageId,
    /// One check per manifest entry, in manifest order.
    pub artifacts: Vec<ArtifactCheck>,
    /// Archive entries the manifest does not list.
    pub unexpected: Vec<String>,
    pub inputs_hash: HashCheck,
    pub outputs_hash: HashCheck,
    /// `config_snapshot_hash` against the stored snapshot's digest.
    pub config_snapshot: FactCheck<String>,
    /// `scoring_version` against the version inside the stored snapshot.
    pub scoring_version: FactCheck<String>,
    /// `systems_count` against the inventory's data rows; `None` when the
    /// package carries no inventory export.
    pub systems_count: Option<FactCheck<u64>>,
}

impl VerificationReport {
    /// Whether every check passed.
    pub fn is_intact(&self) -> bool {
        self.artifacts.iter().all(ArtifactCheck::is_ok)
            && self.unexpected.is_empty()
            && self.inputs_hash.is_ok()
            && self.outputs_hash.is_ok()
            && self.input_facts_ok()
    }

    /// Whether the recorded input facts match the archive content.
    pub fn input_facts_ok(&self) -> bool {
        self.config_snapshot.is_ok()
            && self.scoring_version.is_ok()
            && self.systems_count.as_ref().map_or(true, FactCheck::is_ok)
    }

    /// Names of artifacts that are missing or whose content changed.
    pub fn failed_artifacts(&self) -> Vec<&str> {
        self.artifacts
            .iter()
            .filter(|c| !c.is_ok())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Archive content keyed by entry name.
#[derive(Debug, Default)]
struct ArchiveEntries {
    files: BTreeMap<String, Vec<u8>>,
    /// Names seen more than once; only the first occurrence is kept.
    duplicates: Vec<String>,
}

impl ArchiveEntries {
    fn insert(&mut self, name: String, content: Vec<u8>) {
        if self.files.contains_key(&name) {
            self.duplicates.push(name);
        } else {
            self.files.insert(name, content);
        }
    }
}

fn read_entries(path: &Path, limit: u64) -> Result<ArchiveEntries, EvidenceError> {
    let io_err = |source| EvidenceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let archive_err = |source| EvidenceError::Archive {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut archive = ZipArchive::new(file).map_err(archive_err)?;
    let mut entries = ArchiveEntries::default();
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(archive_err)?;
        let name = entry.name().to_string();
        let too_large = || EvidenceError::EntryTooLarge {
            name: name.clone(),
            limit,
        };
        if entry.size() > limit {
            return Err(too_large());
        }
        let mut content = Vec::new();
        entry.take(limit + 1).read_to_end(&mut content).map_err(io_err)?;
        if content.len() as u64 > limit {
            return Err(too_large());
        }
        entries.insert(name, content);
    }
    Ok(entries)
}

/// The only entry of `kind`, if there is exactly one.
fn sole_entry(manifest: &EvidenceManifest, kind: ExportKind) -> Option<&ManifestEntry> {
    let mut matching = manifest.entries_of(kind);
    match (matching.next(), matching.next()) {
        (Some(entry), None) => Some(entry),
        _ => None,
    }
}

fn check_input_facts(
    manifest: &EvidenceManifest,
    files: &BTreeMap<String, Vec<u8>>,
) -> (FactCheck<String>, FactCheck<String>, Option<FactCheck<u64>>) {
    let snapshot = sole_entry(manifest, ExportKind::ConfigSnapshot)
        .and_then(|entry| files.get(&entry.name));
    let config_snapshot = FactCheck {
        recorded: manifest.config_snapshot_hash.clone(),
        actual: snapshot.map(|bytes| ContentDigest::of_bytes(bytes).to_hex()),
    };
    let scoring_version = FactCheck {
        recorded: manifest.scoring_version.clone(),
        actual: snapshot
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|json| ScoringConfig::from_json_str(json).ok())
            .map(|config| config.scoring_version().to_string()),
    };

    let inventories: Vec<&ManifestEntry> = manifest.entries_of(ExportKind::Inventory).collect();
    let systems_count = match inventories.as_slice() {
        [] => None,
        [entry] => Some(FactCheck {
            recorded: manifest.systems_count,
            actual: files
                .get(&entry.name)
                .and_then(|bytes| std::str::from_utf8(bytes).ok())
                .and_then(count_data_rows),
        }),
        _ => Some(FactCheck {
            recorded: manifest.systems_count,
            actual: None,
        }),
    };
    (config_snapshot, scoring_version, systems_count)
}

/// Verify the archive at `path` against its embedded manifest.
///
/// Returns `Err` only when the archive cannot be read or has no readable
/// manifest. Content mismatches are reported in the `VerificationReport`.
pub fn verify_package(path: &Path) -> Result<VerificationReport, EvidenceError> {
    verify_with_limit(path, MAX_ENTRY_BYTES)
}

fn verify_with_limit(path: &Path, limit: u64) -> Result<VerificationReport, EvidenceError> {
    let ArchiveEntries {
        files: mut entries,
        duplicates,
    } = read_entries(path, limit)?;
    let manifest_bytes = entries
        .remove(MANIFEST_NAME)
        .ok_or_else(|| EvidenceError::MissingArtifact(MANIFEST_NAME.into()))?;
    let manifest: EvidenceManifest = serde_json::from_slice(&manifest_bytes)
        .map_err(|e| EvidenceError::MalformedManifest(e.to_string()))?;

    let artifacts: Vec<ArtifactCheck> = manifest
        .artifacts
        .iter()
        .map(|recorded| {
            let actual = entries.get(&recorded.name);
            ArtifactCheck {
                name: recorded.name.clone(),
                recorded_sha256: recorded.sha256.clone(),
                recorded_bytes: recorded.bytes,
                actual_sha256: actual.map(|bytes| ContentDigest::of_bytes(bytes).to_hex()),
                actual_bytes: actual.map(|bytes| bytes.len() as u64),
            }
        })
        .collect();

    let mut unexpected: Vec<String> = entries
        .keys()
        .filter(|name| manifest.entry(name).is_none())
        .cloned()
        .collect();
    unexpected.extend(duplicates);

    let (config_snapshot, scoring_version, systems_count) = check_input_facts(&manifest, &entries);

    let fresh_outputs = outputs_hash(
        artifacts
            .iter()
            .filter_map(|c| c.actual_sha256.as_deref().map(|h| (c.name.as_str(), h))),
    );

    let report = VerificationReport {
        archive: path.to_path_buf(),
        package_id: manifest.package_id.clone(),
        inputs_hash: HashCheck {
            recorded: manifest.inputs_hash.clone(),
            actual: manifest.recompute_inputs_hash()?,
        },
        outputs_hash: HashCheck {
            recorded: manifest.outputs_hash.clone(),
            actual: fresh_outputs,
        },
        config_snapshot,
        scoring_version,
        systems_count,
        artifacts,
        unexpected,
    };

    if report.is_intact() {
        tracing::info!(
            archive = %path.display(),
            package_id = %report.package_id,
            "evidence package verified"
        );
    } else {
        tracing::warn!(
            archive = %path.display(),
            package_id = %report.package_id,
            failed = ?report.failed_artifacts(),
            unexpected = ?report.unexpected,
            inputs_ok = report.inputs_hash.is_ok(),
            outputs_ok = report.outputs_hash.is_ok(),
            input_facts_ok = report.input_facts_ok(),
            "evidence package failed verification"
        );
    }
    Ok(report)
}
