//! # Package Build
//!
//! Snapshot → collect → manifest. Produces an in-memory `EvidencePackage`;
//! nothing touches the filesystem until `PackageAssembler::write()`.

use airt_core::{PackageId, Timestamp};
use airt_registry::SnapshotSource;
use airt_scoring::ScoringConfig;

use crate::artifact::Artifact;
use crate::collector::EvidenceCollector;
use crate::error::EvidenceError;
use crate::export::{validate_case_label, ExportRequest};
use crate::manifest::{EvidenceManifest, ManifestBuilder};
use crate::summary::SummaryContext;

/// Parameters of one package build.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub package_id: PackageId,
    /// Case label; prefixes the summary and archive names.
    pub case: String,
    pub generated_by: String,
    /// Recorded in the manifest and summary. Fixing it makes the package
    /// byte-reproducible.
    pub generated_at: Timestamp,
    pub exports: Vec<ExportRequest>,
}

impl PackageRequest {
    /// Request the default export set.
    pub fn new(
        package_id: PackageId,
        case: impl Into<String>,
        generated_by: impl Into<String>,
        generated_at: Timestamp,
    ) -> Self {
        let case = case.into();
        Self {
            exports: ExportRequest::defaults(&case),
            package_id,
            case,
            generated_by: generated_by.into(),
            generated_at,
        }
    }
}

/// A complete package held in memory.
#[derive(Debug, Clone)]
pub struct EvidencePackage {
    artifacts: Vec<Artifact>,
    manifest: EvidenceManifest,
    manifest_artifact: Artifact,
}

impl EvidencePackage {
    /// Content artifacts, sorted by name. Excludes the manifest.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn manifest(&self) -> &EvidenceManifest {
        &self.manifest
    }

    /// The manifest as written into the archive.
    pub fn manifest_artifact(&self) -> &Artifact {
        &self.manifest_artifact
    }

    pub fn case(&self) -> &str {
        &self.manifest.case
    }

    pub fn package_id(&self) -> &PackageId {
        &self.manifest.package_id
    }

    /// Every archive entry (content artifacts then manifest).
    pub fn entries(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().chain(std::iter::once(&self.manifest_artifact))
    }
}

/// Take one snapshot from `source` and build a package from it.
pub fn build_package<S: SnapshotSource>(
    source: &S,
    config: &ScoringConfig,
    request: &PackageRequest,
) -> Result<EvidencePackage, EvidenceError> {
    validate_case_label(&request.case)?;
    let snapshot = source.snapshot();
    tracing::info!(
        package_id = %request.package_id,
        case = %request.case,
        taken_at = %snapshot.taken_at(),
        systems = snapshot.systems().len(),
        "building evidence package"
    );

    let context = SummaryContext {
        case: request.case.clone(),
        package_id: request.package_id.clone(),
        generated_at: request.generated_at,
        generated_by: request.generated_by.clone(),
        app_version: config.app_version().to_string(),
        scoring_version: config.scoring_version().to_string(),
    };
    let mut artifacts = EvidenceCollector::new(config, &context).collect(&snapshot, &request.exports)?;
    artifacts.sort_by(|a, b| a.name().cmp(b.name()));

    let manifest = ManifestBuilder::new(
        request.package_id.clone(),
        request.generated_at,
        request.generated_by.clone(),
        request.case.clone(),
    )
    .build(&artifacts, &request.exports, config, snapshot.systems().len())?;
    let manifest_artifact = manifest.to_artifact()?;

    Ok(EvidencePackage {
        artifacts,
        manifest,
        manifest_artifact,
    })
}
