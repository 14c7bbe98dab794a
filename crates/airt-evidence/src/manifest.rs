//! # Evidence Manifest
//!
//! The manifest is the authoritative record of a package: which artifacts it
//! holds, their SHA-256 digests and sizes, and two aggregate hashes.
//!
//! ## Aggregate hashes
//!
//! ```text
//! inputs_hash  = sha256(canonical({case, config_snapshot_hash, systems_count}))
//! outputs_hash = sha256(hex(a_1) ‖ hex(a_2) ‖ … ‖ hex(a_n))   a_i sorted by name
//! ```
//!
//! Digests are concatenated as lowercase hex text, so any consumer with a
//! SHA-256 tool and the manifest can reproduce `outputs_hash`.
//!
//! ## Self-exclusion
//!
//! The manifest is hashed only after it is complete. Its own digest never
//! feeds `outputs_hash`, and no artifact may use the manifest's file name.
//!
//! Each entry records the `ExportKind` it was rendered from, so a verifier
//! can find the config snapshot and inventory whatever they were named.

use std::collections::BTreeSet;

use airt_core::{sha256_hex, CanonicalBytes, ContentDigest, DigestAlgorithm, PackageId, Timestamp};
use airt_scoring::ScoringConfig;
use serde::{Deserialize, Serialize};

use crate::artifact::{Artifact, MANIFEST_NAME};
use crate::error::EvidenceError;
use crate::export::{validate_case_label, ExportKind, ExportRequest};

/// One artifact as listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub kind: ExportKind,
    /// Lowercase hex SHA-256 of the artifact bytes.
    pub sha256: String,
    /// Size in bytes.
    pub bytes: u64,
}

/// The facts `inputs_hash` commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFacts<'a> {
    pub case: &'a str,
    pub systems_count: u64,
    pub config_snapshot_hash: &'a str,
}

impl InputFacts<'_> {
    /// `sha256(canonical(self))` as hex.
    pub fn digest(&self) -> Result<String, EvidenceError> {
        Ok(sha256_hex(&CanonicalBytes::new(self)?))
    }
}

/// `sha256` over the hex digests of `entries`, concatenated in name order.
pub fn outputs_hash<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut sorted: Vec<(&str, &str)> = entries.into_iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let concatenated: String = sorted.iter().map(|(_, hash)| *hash).collect();
    ContentDigest::of_bytes(concatenated.as_bytes()).to_hex()
}

/// Authoritative description of one evidence package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceManifest {
    pub package_id: PackageId,
    pub generated_at: Timestamp,
    pub generated_by: String,
    pub app_version: String,
    pub scoring_version: String,
    pub case: String,
    pub systems_count: u64,
    pub config_snapshot_hash: String,
    pub inputs_hash: String,
    pub outputs_hash: String,
    pub hash_algorithm: DigestAlgorithm,
    /// Sorted by name; never includes the manifest itself.
    pub artifacts: Vec<ManifestEntry>,
}

impl EvidenceManifest {
    pub fn input_facts(&self) -> InputFacts<'_> {
        InputFacts {
            case: &self.case,
            systems_count: self.systems_count,
            config_snapshot_hash: &self.config_snapshot_hash,
        }
    }

    /// `inputs_hash` recomputed from the recorded input facts.
    pub fn recompute_inputs_hash(&self) -> Result<String, EvidenceError> {
        self.input_facts().digest()
    }

    /// `outputs_hash` recomputed from the recorded artifact list.
    pub fn recompute_outputs_hash(&self) -> String {
        outputs_hash(self.artifacts.iter().map(|a| (a.name.as_str(), a.sha256.as_str())))
    }

    pub fn entry(&self, name: &str) -> Option<&ManifestEntry> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Entries rendered from `kind`, in name order.
    pub fn entries_of(&self, kind: ExportKind) -> impl Iterator<Item = &ManifestEntry> {
        self.artifacts.iter().filter(move |a| a.kind == kind)
    }

    /// Canonical JSON rendering, stored in the package as `evidence_manifest.json`.
    pub fn to_artifact(&self) -> Result<Artifact, EvidenceError> {
        Artifact::canonical_json(MANIFEST_NAME, self)
    }
}

/// Builds a manifest over a complete artifact set.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    package_id: PackageId,
    generated_at: Timestamp,
    generated_by: String,
    case: String,
}

impl ManifestBuilder {
    pub fn new(
        package_id: PackageId,
        generated_at: Timestamp,
        generated_by: impl Into<String>,
        case: impl Into<String>,
    ) -> Self {
        Self {
            package_id,
            generated_at,
            generated_by: generated_by.into(),
            case: case.into(),
        }
    }

    /// Check every artifact against its recorded digest, then compute both
    /// aggregate hashes and assemble the manifest.
    ///
    /// `exports` are the requests the artifacts were rendered from; every
    /// artifact must answer exactly one of them. `systems_count` is the
    /// inventory size at snapshot time.
    pub fn build(
        &self,
        artifacts: &[Artifact],
        exports: &[ExportRequest],
        config: &ScoringConfig,
        systems_count: usize,
    ) -> Result<EvidenceManifest, EvidenceError> {
        validate_case_label(&self.case)?;

        let mut names = BTreeSet::new();
        for artifact in artifacts {
            if artifact.name() == MANIFEST_NAME {
                return Err(EvidenceError::ReservedArtifactName(MANIFEST_NAME.into()));
            }
            if !names.insert(artifact.name()) {
                return Err(EvidenceError::DuplicateArtifact(artifact.name().to_string()));
            }
            artifact.verify()?;
        }

        let snapshot_request = exports
            .iter()
            .find(|r| r.kind == ExportKind::ConfigSnapshot)
            .ok_or(EvidenceError::MissingExport(ExportKind::ConfigSnapshot))?;
        let config_snapshot_hash = artifacts
            .iter()
            .find(|a| a.name() == snapshot_request.name)
            .map(Artifact::sha256)
            .ok_or_else(|| EvidenceError::MissingArtifact(snapshot_request.name.clone()))?;

        let mut entries = artifacts
            .iter()
            .map(|a| {
                let request = exports
                    .iter()
                    .find(|r| r.name == a.name())
                    .ok_or_else(|| EvidenceError::UnrequestedArtifact(a.name().to_string()))?;
                Ok(ManifestEntry {
                    name: a.name().to_string(),
                    kind: request.kind,
                    sha256: a.sha256(),
                    bytes: a.size(),
                })
            })
            .collect::<Result<Vec<_>, EvidenceError>>()?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let systems_count = systems_count as u64;
        let inputs_hash = InputFacts {
            case: &self.case,
            systems_count,
            config_snapshot_hash: &config_snapshot_hash,
        }
        .digest()?;
        let outputs_hash = outputs_hash(entries.iter().map(|e| (e.name.as_str(), e.sha256.as_str())));

        tracing::info!(
            package_id = %self.package_id,
            artifacts = entries.len(),
            inputs_hash = %inputs_hash,
            outputs_hash = %outputs_hash,
            "evidence manifest built"
        );

        Ok(EvidenceManifest {
            package_id: self.package_id.clone(),
            generated_at: self.generated_at,
            generated_by: self.generated_by.clone(),
            app_version: config.app_version().to_string(),
            scoring_version: config.scoring_version().to_string(),
            case: self.case.clone(),
            systems_count,
            config_snapshot_hash,
            inputs_hash,
            outputs_hash,
            hash_algorithm: DigestAlgorithm::Sha256,
            artifacts: entries,
        })
    }
}
