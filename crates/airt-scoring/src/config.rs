//! # Scoring Configuration — Versioned Rule Set
//!
//! `ScoringConfig` is pure data: point mappings per dimension, dependency
//! bands, the opaque-vendor bonus, tier thresholds, and default control
//! lists. It is loaded from YAML or JSON and validated for completeness
//! before it can exist as a value.
//!
//! ## Invariants
//!
//! - `scoring_version` is non-empty.
//! - Every dimension maps at least one categorical value; no dimension is
//!   named `external_dependencies`.
//! - Dependency bands start at count 0 and strictly increase, so every
//!   count falls in exactly one band.
//! - `tier1_min >= tier2_min`.
//! - Every tier has a default control list.
//! - The highest attainable total fits in `u32`, so scoring never overflows.
//!
//! Deserializing a `ScoringConfig` directly (e.g. as a field of a larger
//! document) runs the same validation through `#[serde(try_from)]`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::EXTERNAL_DEPENDENCIES;
use crate::error::ConfigurationError;
use crate::tier::RiskTier;

/// One dependency-count band.
///
/// A band covers counts from `min_count` up to the next band's
/// `min_count - 1`; the last band is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyBand {
    /// Band label (e.g. `none`, `few`, `many`).
    pub name: String,
    /// Smallest dependency count in this band.
    pub min_count: u32,
    /// Points awarded for a count in this band.
    pub points: u32,
}

/// Dependency scoring rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyScoring {
    /// Bands ordered by `min_count`, starting at 0.
    pub bands: Vec<DependencyBand>,
    /// Added once per entity when any dependency matches any keyword.
    pub opaque_vendor_bonus: u32,
    /// Case-insensitive substrings that mark a dependency as opaque.
    pub opaque_keywords: Vec<String>,
}

impl DependencyScoring {
    /// The band covering `count` dependencies.
    ///
    /// Validation guarantees a band starting at zero, so this always finds one.
    pub fn band_for(&self, count: usize) -> Option<&DependencyBand> {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        self.bands.iter().rev().find(|band| band.min_count <= count)
    }

    /// The first `(dependency, keyword)` pair that marks the entity as using
    /// an opaque vendor, if any.
    pub fn opaque_match<'a>(&'a self, dependencies: &'a [String]) -> Option<(&'a str, &'a str)> {
        dependencies.iter().find_map(|dep| {
            let dep_lower = dep.to_lowercase();
            self.opaque_keywords
                .iter()
                .find(|kw| dep_lower.contains(&kw.to_lowercase()))
                .map(|kw| (dep.as_str(), kw.as_str()))
        })
    }
}

/// Score thresholds for Tier 1 and Tier 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Totals at or above this are Tier 1.
    pub tier1_min: u32,
    /// Totals at or above this (and below `tier1_min`) are Tier 2.
    pub tier2_min: u32,
}

impl TierThresholds {
    /// Tier for a total score. `>=` comparisons, Tier 1 checked first.
    pub fn tier_for(&self, total_score: u32) -> RiskTier {
        if total_score >= self.tier1_min {
            RiskTier::Tier1
        } else if total_score >= self.tier2_min {
            RiskTier::Tier2
        } else {
            RiskTier::Tier3
        }
    }
}

/// The unvalidated on-disk shape of a rule set.
///
/// Convert with `ScoringConfig::try_from()`; there is no other way to obtain
/// a `ScoringConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfigDocument {
    /// Version of the application that produces evidence with this config.
    pub app_version: String,
    /// Rule-set version recorded in every result scored under it.
    pub scoring_version: String,
    /// Tier thresholds.
    pub tier_thresholds: TierThresholds,
    /// Dimension name → categorical value → points.
    pub point_mappings: BTreeMap<String, BTreeMap<String, u32>>,
    /// Dependency bands and opaque-vendor rules.
    pub external_dependencies: DependencyScoring,
    /// Tier → ordered default controls.
    pub default_controls: BTreeMap<RiskTier, Vec<String>>,
}

/// A validated, immutable scoring rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScoringConfigDocument")]
pub struct ScoringConfig {
    app_version: String,
    scoring_version: String,
    tier_thresholds: TierThresholds,
    point_mappings: BTreeMap<String, BTreeMap<String, u32>>,
    external_dependencies: DependencyScoring,
    default_controls: BTreeMap<RiskTier, Vec<String>>,
}

impl TryFrom<ScoringConfigDocument> for ScoringConfig {
    type Error = ConfigurationError;

    fn try_from(doc: ScoringConfigDocument) -> Result<Self, Self::Error> {
        if doc.scoring_version.trim().is_empty() {
            return Err(ConfigurationError::EmptyVersion);
        }

        if doc.point_mappings.is_empty() {
            return Err(ConfigurationError::NoDimensions);
        }
        for (dimension, mapping) in &doc.point_mappings {
            if dimension == EXTERNAL_DEPENDENCIES {
                return Err(ConfigurationError::ReservedDimension(dimension.clone()));
            }
            if mapping.is_empty() {
                return Err(ConfigurationError::EmptyMapping {
                    dimension: dimension.clone(),
                });
            }
        }

        validate_dependency_scoring(&doc.external_dependencies)?;

        let TierThresholds { tier1_min, tier2_min } = doc.tier_thresholds;
        if tier1_min < tier2_min {
            return Err(ConfigurationError::ThresholdsNotOrdered { tier1_min, tier2_min });
        }

        for tier in RiskTier::ALL {
            if !doc.default_controls.contains_key(&tier) {
                return Err(ConfigurationError::MissingControls(tier));
            }
        }

        max_attainable_score(&doc.point_mappings, &doc.external_dependencies)
            .ok_or(ConfigurationError::ScoreRangeOverflow)?;

        Ok(Self {
            app_version: doc.app_version,
            scoring_version: doc.scoring_version,
            tier_thresholds: doc.tier_thresholds,
            point_mappings: doc.point_mappings,
            external_dependencies: doc.external_dependencies,
            default_controls: doc.default_controls,
        })
    }
}

fn validate_dependency_scoring(deps: &DependencyScoring) -> Result<(), ConfigurationError> {
    let first = deps.bands.first().ok_or(ConfigurationError::NoDependencyBands)?;
    if first.min_count != 0 {
        return Err(ConfigurationError::BandsDoNotStartAtZero(first.min_count));
    }
    for (index, band) in deps.bands.iter().enumerate() {
        if band.name.trim().is_empty() {
            return Err(ConfigurationError::BlankBandName { index });
        }
    }
    for pair in deps.bands.windows(2) {
        if pair[1].min_count <= pair[0].min_count {
            return Err(ConfigurationError::BandsNotIncreasing {
                name: pair[1].name.clone(),
                min_count: pair[1].min_count,
                previous: pair[0].min_count,
            });
        }
    }
    for (index, kw) in deps.opaque_keywords.iter().enumerate() {
        if kw.trim().is_empty() {
            return Err(ConfigurationError::BlankOpaqueKeyword { index });
        }
    }
    Ok(())
}

fn max_attainable_score(
    point_mappings: &BTreeMap<String, BTreeMap<String, u32>>,
    deps: &DependencyScoring,
) -> Option<u32> {
    let dimensions = point_mappings.values().try_fold(0u32, |acc, mapping| {
        acc.checked_add(mapping.values().copied().max().unwrap_or(0))
    })?;
    let band = deps.bands.iter().map(|b| b.points).max().unwrap_or(0);
    dimensions
        .checked_add(band)?
        .checked_add(deps.opaque_vendor_bonus)
}

impl ScoringConfig {
    /// Parse and validate a YAML rule set.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigurationError> {
        let doc: ScoringConfigDocument =
            serde_yaml::from_str(yaml).map_err(|e| ConfigurationError::Parse {
                origin: "<inline>".into(),
                message: e.to_string(),
            })?;
        Self::try_from(doc)
    }

    /// Parse and validate a JSON rule set.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let doc: ScoringConfigDocument =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Parse {
                origin: "<inline>".into(),
                message: e.to_string(),
            })?;
        Self::try_from(doc)
    }

    /// Load a rule set from disk. The format is chosen by extension:
    /// `.yaml`/`.yml` or `.json`.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let with_origin = |err: ConfigurationError| match err {
            ConfigurationError::Parse { message, .. } => ConfigurationError::Parse {
                origin: path.display().to_string(),
                message,
            },
            other => other,
        };
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text).map_err(with_origin)?,
            "json" => Self::from_json_str(&text).map_err(with_origin)?,
            other => return Err(ConfigurationError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(
            path = %path.display(),
            scoring_version = %config.scoring_version,
            dimensions = config.point_mappings.len(),
            "loaded scoring config"
        );
        Ok(config)
    }

    /// Fail unless the configured dimensions are exactly `entity_dimensions`.
    ///
    /// Run once before scoring a batch so a mismatched rule set is reported
    /// as a configuration error instead of one failure per entity.
    pub fn ensure_covers(&self, entity_dimensions: &[&str]) -> Result<(), ConfigurationError> {
        let exposed: BTreeSet<&str> = entity_dimensions.iter().copied().collect();
        if let Some(dimension) = self
            .point_mappings
            .keys()
            .find(|dim| !exposed.contains(dim.as_str()))
        {
            return Err(ConfigurationError::UnknownDimension {
                dimension: dimension.clone(),
            });
        }
        if let Some(dimension) = entity_dimensions
            .iter()
            .find(|dim| !self.point_mappings.contains_key(**dim))
        {
            return Err(ConfigurationError::MissingMapping {
                dimension: (*dimension).to_string(),
            });
        }
        Ok(())
    }

    /// Application version recorded in manifests.
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Rule-set version.
    pub fn scoring_version(&self) -> &str {
        &self.scoring_version
    }

    /// Tier thresholds.
    pub fn tier_thresholds(&self) -> TierThresholds {
        self.tier_thresholds
    }

    /// Dimension name → categorical value → points.
    pub fn point_mappings(&self) -> &BTreeMap<String, BTreeMap<String, u32>> {
        &self.point_mappings
    }

    /// Names of the scored dimensions, sorted.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.point_mappings.keys().map(String::as_str)
    }

    /// Dependency scoring rules.
    pub fn dependency_scoring(&self) -> &DependencyScoring {
        &self.external_dependencies
    }

    /// The shared default control list for `tier`.
    pub fn default_controls_for(&self, tier: RiskTier) -> &[String] {
        self.default_controls
            .get(&tier)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
