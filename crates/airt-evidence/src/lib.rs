//! # airt-evidence — Tamper-Evident Evidence Packages
//!
//! Turns a registry snapshot and a scoring config into a self-describing
//! archive whose contents anyone can re-hash and check.
//!
//! - **Artifact** (`artifact.rs`): named bytes plus the SHA-256 digest taken
//!   at creation. Names are validated against path traversal.
//!
//! - **Exports** (`export.rs`, `csv.rs`, `summary.rs`): the five standard
//!   artifacts. Structured exports go through the canonical serializer.
//!
//! - **Collector** (`collector.rs`): renders every export from one captured
//!   view of a snapshot.
//!
//! - **Manifest** (`manifest.rs`): per-artifact digests, `inputs_hash`,
//!   `outputs_hash`. Re-verifies each artifact before building.
//!
//! - **Package** (`package.rs`, `assembler.rs`): in-memory package build and
//!   atomic, reproducible ZIP write.
//!
//! - **Verify** (`verify.rs`): reopen an archive and check it against its
//!   manifest, including the input facts behind `inputs_hash`.
//!
//! ## Crate Policy
//!
//! - The generation timestamp is always an input. Nothing in this crate reads
//!   the clock.
//! - No partially written archive is ever visible at its final path.

pub mod artifact;
pub mod assembler;
pub mod collector;
pub mod csv;
pub mod error;
pub mod export;
pub mod manifest;
pub mod package;
pub mod summary;
pub mod verify;

pub use artifact::{validate_artifact_name, Artifact, MANIFEST_NAME};
pub use assembler::{archive_name, PackageAssembler};
pub use collector::{EvidenceCollector, ExportView};
pub use error::EvidenceError;
pub use export::{
    validate_case_label, ExportKind, ExportRequest, CONFIG_SNAPSHOT_NAME, INVENTORY_NAME,
    RISK_MAP_NAME, TIERING_NAME,
};
pub use manifest::{outputs_hash, EvidenceManifest, InputFacts, ManifestBuilder, ManifestEntry};
pub use package::{build_package, EvidencePackage, PackageRequest};
pub use summary::{render_summary, Summary, SummaryContext};
pub use verify::{
    verify_package, ArtifactCheck, FactCheck, HashCheck, VerificationReport, MAX_ENTRY_BYTES,
};
