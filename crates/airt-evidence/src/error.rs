//! # Evidence Errors
//!
//! Variants name the artifact, export kind, system, or path involved. `ManifestIntegrity`
//! aborts a package build before anything is written.

use std::path::PathBuf;

use airt_core::{AirtError, SerializationError, SystemId};
use airt_registry::StoreError;
use thiserror::Error;

use crate::export::ExportKind;

/// Failure while collecting, hashing, packaging, or verifying evidence.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// An artifact's content no longer matches the digest recorded when it
    /// was collected.
    #[error("artifact {artifact:?} changed after hashing: recorded sha256 {recorded}, actual {actual}")]
    ManifestIntegrity {
        /// Artifact name.
        artifact: String,
        /// Digest recorded at collection time.
        recorded: String,
        /// Digest of the current content.
        actual: String,
    },

    /// Two artifacts in one package share a name.
    #[error("duplicate artifact name {0:?}")]
    DuplicateArtifact(String),

    /// An artifact name is empty, too long, or could escape the archive root.
    #[error("unsafe artifact name {0:?}: expected [A-Za-z0-9][A-Za-z0-9._-]* without '..'")]
    UnsafeArtifactName(String),

    /// An artifact uses a name reserved for the manifest itself.
    #[error("artifact name {0:?} is reserved")]
    ReservedArtifactName(String),

    /// The case label cannot be embedded in file names.
    #[error("invalid case label {0:?}: expected [A-Za-z0-9][A-Za-z0-9_-]*")]
    InvalidCaseLabel(String),

    /// A required artifact is absent.
    #[error("required artifact {0:?} is missing")]
    MissingArtifact(String),

    /// The export set lacks a kind every package needs.
    #[error("no {0:?} export requested")]
    MissingExport(ExportKind),

    /// The export set requests one kind twice.
    #[error("{0:?} export requested more than once")]
    DuplicateExport(ExportKind),

    /// An artifact handed to the manifest builder answers no export request.
    #[error("artifact {0:?} was not requested")]
    UnrequestedArtifact(String),

    /// A stored tiering result was scored under a different rule set than the
    /// one being packaged.
    #[error("tiering result for system {system_id} was scored under version {result_version}, package uses {config_version}")]
    ScoringVersionMismatch {
        /// System whose current result is stale.
        system_id: SystemId,
        /// Version recorded in the result.
        result_version: String,
        /// Version of the packaged config.
        config_version: String,
    },

    /// An archive entry is larger than verification will read.
    #[error("archive entry {name:?} exceeds {limit} bytes")]
    EntryTooLarge {
        /// Entry name.
        name: String,
        /// Byte limit.
        limit: u64,
    },

    /// The manifest inside an archive cannot be parsed.
    #[error("malformed evidence manifest: {0}")]
    MalformedManifest(String),

    /// A package with this name already exists at the destination.
    #[error("package {path} already exists; package ids are write-once")]
    PackageExists {
        /// The existing archive.
        path: PathBuf,
    },

    /// Canonical serialization failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// A registry collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A core validation failed.
    #[error(transparent)]
    Core(#[from] AirtError),

    /// Filesystem failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The archive library rejected a read or write.
    #[error("archive error at {path}: {source}")]
    Archive {
        /// Archive path.
        path: PathBuf,
        /// Underlying error.
        source: zip::result::ZipError,
    },
}
