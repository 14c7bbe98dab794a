//! # Scoring Result
//!
//! `ScoringResult` is a value object. Nothing mutates a result after
//! `assess()` returns it; customizing controls produces a new result via
//! `supersede_with_controls()`, and the tiering store decides which one is
//! current.

use std::collections::BTreeMap;

use airt_core::{SystemId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::engine::score;
use crate::entity::ScoredEntity;
use crate::error::ScoringError;
use crate::tier::{classify, RiskTier};

/// The outcome of scoring one entity under one rule set.
///
/// Serialized field names are part of the `risk_tiering.json` export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    system_id: SystemId,
    risk_tier: RiskTier,
    total_score: u32,
    score_breakdown: BTreeMap<String, u32>,
    justification: String,
    required_controls: Vec<String>,
    computed_at: Timestamp,
    scoring_version: String,
}

/// Score and classify `entity`, stamping the result with `computed_at`.
///
/// The timestamp is an input so that the score itself never depends on the
/// clock.
pub fn assess<E: ScoredEntity>(
    entity: &E,
    config: &ScoringConfig,
    computed_at: Timestamp,
) -> Result<ScoringResult, ScoringError> {
    let breakdown = score(entity, config)?;
    let assignment = classify(breakdown.total(), config);
    Ok(ScoringResult {
        system_id: entity.entity_id(),
        risk_tier: assignment.tier,
        total_score: breakdown.total(),
        score_breakdown: breakdown.points().clone(),
        justification: format!(
            "Automated tiering based on scoring version {}.",
            config.scoring_version()
        ),
        required_controls: assignment.controls,
        computed_at,
        scoring_version: config.scoring_version().to_string(),
    })
}

impl ScoringResult {
    pub fn system_id(&self) -> SystemId {
        self.system_id
    }

    pub fn risk_tier(&self) -> RiskTier {
        self.risk_tier
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn score_breakdown(&self) -> &BTreeMap<String, u32> {
        &self.score_breakdown
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }

    pub fn required_controls(&self) -> &[String] {
        &self.required_controls
    }

    pub fn computed_at(&self) -> Timestamp {
        self.computed_at
    }

    pub fn scoring_version(&self) -> &str {
        &self.scoring_version
    }

    /// Whether this result was produced under `config`'s rule-set version.
    pub fn is_comparable_with(&self, config: &ScoringConfig) -> bool {
        self.scoring_version == config.scoring_version()
    }

    /// A new result with `extra` controls appended and `note` appended to the
    /// justification. Score, tier, and version are carried over unchanged.
    pub fn supersede_with_controls<I>(&self, extra: I, note: &str, at: Timestamp) -> ScoringResult
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut required_controls = self.required_controls.clone();
        required_controls.extend(extra.into_iter().map(Into::into));
        let note = note.trim();
        let justification = if note.is_empty() {
            self.justification.clone()
        } else {
            format!("{} {}", self.justification, note)
        };
        ScoringResult {
            required_controls,
            justification,
            computed_at: at,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::reference_config;
    use crate::engine::tests::TestSystem;

    fn at(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn assess_reference_example() {
        let config = reference_config();
        let sys = TestSystem::credit_model(&["Bureau feed", "Core banking", "Fraud list"]);
        let result = assess(&sys, &config, at("2026-01-15T10:00:00Z")).unwrap();
        assert_eq!(result.system_id(), sys.id);
        assert_eq!(result.total_score(), 26);
        assert_eq!(result.risk_tier(), RiskTier::Tier1);
        assert_eq!(result.required_controls().len(), 8);
        assert_eq!(result.scoring_version(), "1.0");
        assert_eq!(
            result.justification(),
            "Automated tiering based on scoring version 1.0."
        );
        assert_eq!(
            result.score_breakdown().values().sum::<u32>(),
            result.total_score()
        );
        assert!(result.is_comparable_with(&config));
    }

    #[test]
    fn supersede_leaves_original_untouched() {
        let config = reference_config();
        let sys = TestSystem::credit_model(&["OpenAI API"]);
        let original = assess(&sys, &config, at("2026-01-15T10:00:00Z")).unwrap();
        let snapshot = original.clone();

        let updated = original.supersede_with_controls(
            ["Specific LLM prompt injection testing protocol"],
            "Added specific LLM controls.",
            at("2026-01-16T09:30:00Z"),
        );

        assert_eq!(original, snapshot);
        assert_eq!(updated.required_controls().len(), original.required_controls().len() + 1);
        assert_eq!(
            updated.required_controls().last().map(String::as_str),
            Some("Specific LLM prompt injection testing protocol")
        );
        assert_eq!(
            updated.justification(),
            "Automated tiering based on scoring version 1.0. Added specific LLM controls."
        );
        assert_eq!(updated.total_score(), original.total_score());
        assert_eq!(updated.risk_tier(), original.risk_tier());
        assert_eq!(updated.computed_at(), at("2026-01-16T09:30:00Z"));
    }

    #[test]
    fn blank_note_keeps_justification() {
        let config = reference_config();
        let sys = TestSystem::credit_model(&[]);
        let original = assess(&sys, &config, at("2026-01-15T10:00:00Z")).unwrap();
        let updated =
            original.supersede_with_controls(Vec::<String>::new(), "  ", original.computed_at());
        assert_eq!(updated, original);
    }

    #[test]
    fn serialized_field_names() {
        let config = reference_config();
        let sys = TestSystem::credit_model(&[]);
        let result = assess(&sys, &config, at("2026-01-15T10:00:00Z")).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "system_id",
            "risk_tier",
            "total_score",
            "score_breakdown",
            "justification",
            "required_controls",
            "computed_at",
            "scoring_version",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(value["risk_tier"], "TIER_1");
        assert_eq!(value["computed_at"], "2026-01-15T10:00:00Z");
    }

    #[test]
    fn different_version_is_not_comparable() {
        let config = reference_config();
        let sys = TestSystem::credit_model(&[]);
        let result = assess(&sys, &config, at("2026-01-15T10:00:00Z")).unwrap();

        let yaml = crate::config::tests::REFERENCE_YAML
            .replace("scoring_version: \"1.0\"", "scoring_version: \"1.1\"");
        let v11 = ScoringConfig::from_yaml_str(&yaml).unwrap();
        assert!(!result.is_comparable_with(&v11));
    }
}
