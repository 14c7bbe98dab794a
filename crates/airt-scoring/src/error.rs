//! # Scoring Errors
//!
//! `ConfigurationError` is fatal and surfaces before any entity is scored.
//! `ScoringError::UnknownCategoricalValue` is fatal for one entity only;
//! batch callers decide whether it aborts the rest.

use std::path::PathBuf;

use airt_core::SystemId;
use thiserror::Error;

use crate::tier::RiskTier;

/// A malformed or incomplete rule set.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The rule set has no version identifier.
    #[error("scoring_version must not be empty")]
    EmptyVersion,

    /// `point_mappings` has no dimensions.
    #[error("point_mappings must define at least one dimension")]
    NoDimensions,

    /// A dimension maps no categorical values.
    #[error("dimension {dimension:?} has no categorical values")]
    EmptyMapping {
        /// The dimension with an empty mapping.
        dimension: String,
    },

    /// A dimension uses the name reserved for dependency scoring.
    #[error("dimension name {0:?} is reserved for dependency scoring")]
    ReservedDimension(String),

    /// The config scores a dimension the entity type does not expose.
    #[error("config scores dimension {dimension:?}, which the scored entity type does not expose")]
    UnknownDimension {
        /// The configured dimension.
        dimension: String,
    },

    /// The entity type exposes a dimension the config does not map.
    #[error("entity dimension {dimension:?} has no point mapping")]
    MissingMapping {
        /// The unmapped dimension.
        dimension: String,
    },

    /// No dependency bands are configured.
    #[error("external_dependencies.bands must not be empty")]
    NoDependencyBands,

    /// The first band does not cover a count of zero.
    #[error("first dependency band must start at count 0, got {0}")]
    BandsDoNotStartAtZero(u32),

    /// Band starts are not strictly increasing.
    #[error("dependency band {name:?} starts at {min_count}, which is not above the previous band start {previous}")]
    BandsNotIncreasing {
        /// Offending band name.
        name: String,
        /// Its start count.
        min_count: u32,
        /// The previous band's start count.
        previous: u32,
    },

    /// A band has a blank name.
    #[error("dependency band at position {index} has a blank name")]
    BlankBandName {
        /// Position of the band in the list.
        index: usize,
    },

    /// An opaque-vendor keyword is blank, which would match every dependency.
    #[error("opaque keyword at position {index} is blank")]
    BlankOpaqueKeyword {
        /// Position of the keyword in the list.
        index: usize,
    },

    /// `tier1_min < tier2_min`.
    #[error("tier thresholds not well-ordered: tier1_min {tier1_min} < tier2_min {tier2_min}")]
    ThresholdsNotOrdered {
        /// Configured Tier 1 threshold.
        tier1_min: u32,
        /// Configured Tier 2 threshold.
        tier2_min: u32,
    },

    /// A tier has no default control list.
    #[error("no default controls configured for {0}")]
    MissingControls(RiskTier),

    /// The highest attainable total does not fit in a `u32`.
    #[error("maximum attainable score overflows u32; reduce point values")]
    ScoreRangeOverflow,

    /// The config file could not be read.
    #[error("failed to read scoring config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config document is not valid YAML/JSON for the expected shape.
    #[error("failed to parse scoring config {origin}: {message}")]
    Parse {
        /// File path or `<inline>`.
        origin: String,
        /// Parser message.
        message: String,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported scoring config format {0:?}; expected .yaml, .yml, or .json")]
    UnsupportedFormat(String),
}

/// Failure to score one entity.
#[derive(Error, Debug)]
pub enum ScoringError {
    /// The entity carries a value that has no entry in the dimension's mapping.
    #[error("system {entity_id}: unknown value {value:?} for dimension {dimension:?}")]
    UnknownCategoricalValue {
        /// The entity being scored.
        entity_id: SystemId,
        /// The dimension being looked up.
        dimension: String,
        /// The offending value.
        value: String,
    },

    /// The entity exposes no value for a configured dimension.
    #[error("system {entity_id}: no value for dimension {dimension:?}")]
    MissingDimension {
        /// The entity being scored.
        entity_id: SystemId,
        /// The configured dimension.
        dimension: String,
    },

    /// The rule set cannot score this entity type at all.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl ScoringError {
    /// The entity this error is about, if it is entity-specific.
    pub fn entity_id(&self) -> Option<SystemId> {
        match self {
            Self::UnknownCategoricalValue { entity_id, .. }
            | Self::MissingDimension { entity_id, .. } => Some(*entity_id),
            Self::Configuration(_) => None,
        }
    }
}
