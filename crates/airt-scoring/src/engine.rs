//! # Scoring Engine
//!
//! `score()` maps one entity and one rule set to a per-dimension breakdown
//! and a total.
//!
//! ## Algorithm
//!
//! 1. For every configured dimension (sorted by name), look up the entity's
//!    categorical value. A value with no mapping entry is an error.
//! 2. Pick the dependency band for the number of dependencies.
//! 3. Add the opaque-vendor bonus once if any dependency contains any opaque
//!    keyword, case-insensitively.
//! 4. Record (2) + (3) under the synthetic `external_dependencies` key.
//!
//! ## Invariant
//!
//! `total == breakdown.values().sum()`, and identical inputs yield identical
//! output. There is no clock, randomness, or hidden state on this path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::entity::ScoredEntity;
use crate::error::ScoringError;

/// Breakdown key for the dependency band plus opaque-vendor bonus.
pub const EXTERNAL_DEPENDENCIES: &str = "external_dependencies";

/// Per-dimension points and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    points: BTreeMap<String, u32>,
    total: u32,
}

impl ScoreBreakdown {
    fn from_points(points: BTreeMap<String, u32>) -> Self {
        // Config validation bounds the maximum attainable total to u32.
        let total = points.values().fold(0u32, |acc, p| acc.saturating_add(*p));
        Self { points, total }
    }

    /// Dimension name → points, including `external_dependencies`.
    pub fn points(&self) -> &BTreeMap<String, u32> {
        &self.points
    }

    /// Sum of every breakdown entry.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Points for one dimension.
    pub fn get(&self, dimension: &str) -> Option<u32> {
        self.points.get(dimension).copied()
    }
}

/// Score `entity` under `config`.
pub fn score<E: ScoredEntity>(entity: &E, config: &ScoringConfig) -> Result<ScoreBreakdown, ScoringError> {
    let entity_id = entity.entity_id();
    let mut points = BTreeMap::new();

    for (dimension, mapping) in config.point_mappings() {
        let value = entity
            .dimension_value(dimension)
            .ok_or_else(|| ScoringError::MissingDimension {
                entity_id,
                dimension: dimension.clone(),
            })?;
        let pts = mapping
            .get(value)
            .copied()
            .ok_or_else(|| ScoringError::UnknownCategoricalValue {
                entity_id,
                dimension: dimension.clone(),
                value: value.to_string(),
            })?;
        points.insert(dimension.clone(), pts);
    }

    let deps = config.dependency_scoring();
    let dependencies = entity.dependencies();
    let band_points = deps.band_for(dependencies.len()).map_or(0, |band| band.points);
    let opaque = deps.opaque_match(dependencies);
    let bonus = if opaque.is_some() { deps.opaque_vendor_bonus } else { 0 };
    points.insert(EXTERNAL_DEPENDENCIES.to_string(), band_points + bonus);

    let breakdown = ScoreBreakdown::from_points(points);
    tracing::debug!(
        system_id = %entity_id,
        total = breakdown.total,
        dependencies = dependencies.len(),
        opaque_keyword = opaque.map(|(_, kw)| kw),
        "scored system"
    );
    Ok(breakdown)
}
