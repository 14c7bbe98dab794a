//! # airt-scoring — Deterministic Risk Tiering
//!
//! Maps an AI system's categorical attributes to a numeric score and a
//! discrete tier under a versioned, externally loaded rule set.
//!
//! - **Config** (`config.rs`): `ScoringConfig`, validated for completeness at
//!   load time. New categories are data changes, not code changes.
//!
//! - **Entity** (`entity.rs`): the `ScoredEntity` trait, the read-only view
//!   the engine scores.
//!
//! - **Engine** (`engine.rs`): pure `score()`; per-dimension point lookup plus
//!   dependency band and opaque-vendor bonus.
//!
//! - **Tier** (`tier.rs`): pure `classify()`; `>=` comparisons, Tier 1 first.
//!
//! - **Result** (`result.rs`): immutable `ScoringResult` and `assess()`.
//!
//! - **Batch** (`batch.rs`): multi-entity assessment, best-effort or
//!   all-or-nothing.
//!
//! ## Crate Policy
//!
//! - No clock reads, no randomness, no I/O on the scoring path. The only
//!   I/O in this crate is `ScoringConfig::load()`.
//! - Unknown categorical values are errors, never zero.

pub mod batch;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod result;
pub mod tier;

pub use batch::{assess_batch, BatchMode, BatchOutcome};
pub use config::{DependencyBand, DependencyScoring, ScoringConfig, ScoringConfigDocument, TierThresholds};
pub use engine::{score, ScoreBreakdown, EXTERNAL_DEPENDENCIES};
pub use entity::ScoredEntity;
pub use error::{ConfigurationError, ScoringError};
pub use result::{assess, ScoringResult};
pub use tier::{classify, RiskTier, TierAssignment};
