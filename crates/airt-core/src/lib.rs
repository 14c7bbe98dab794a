//! # airt-core — Foundational Types for Risk Tiering Evidence
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! every other crate relies on to make scoring results and evidence packages
//! reproducible and tamper-evident.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** Every structured artifact and every
//!    aggregate hash input flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for anything that gets hashed.
//!
//! 2. **One hash algorithm.** SHA-256, rendered as 64 lowercase hex chars.
//!    Structured content is digested via [`sha256_digest()`]; opaque artifact
//!    bytes (CSV, Markdown) via [`ContentDigest::of_bytes()`].
//!
//! 3. **Newtype identifiers.** `SystemId`, `RiskId`, `PackageId` cannot be
//!    confused with each other or with free text.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is always `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `airt-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{AirtError, SerializationError};
pub use identity::{PackageId, RiskId, SystemId};
pub use temporal::Timestamp;
