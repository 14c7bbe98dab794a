//! # Batch Assessment
//!
//! Scores many entities under one config. The config is checked against the
//! entity type once, up front, so a rule-set mismatch is a single
//! `ConfigurationError` instead of one error per entity.

use airt_core::Timestamp;

use crate::config::ScoringConfig;
use crate::entity::ScoredEntity;
use crate::error::ScoringError;
use crate::result::{assess, ScoringResult};

/// How per-entity failures affect the rest of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Record failures and keep scoring the remaining entities.
    #[default]
    BestEffort,
    /// Stop at the first failure and return no results.
    AllOrNothing,
}

/// Results and failures of a best-effort batch, each in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully assessed entities.
    pub results: Vec<ScoringResult>,
    /// Entities that could not be scored.
    pub failures: Vec<ScoringError>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Assess every entity in `entities`.
///
/// Under `AllOrNothing` the first failure is returned as the error. Under
/// `BestEffort` only a configuration mismatch is returned as an error.
pub fn assess_batch<'a, E, I>(
    entities: I,
    config: &ScoringConfig,
    computed_at: Timestamp,
    mode: BatchMode,
) -> Result<BatchOutcome, ScoringError>
where
    E: ScoredEntity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    config.ensure_covers(E::DIMENSIONS)?;

    let mut outcome = BatchOutcome::default();
    for entity in entities {
        match assess(entity, config, computed_at) {
            Ok(result) => outcome.results.push(result),
            Err(err) if mode == BatchMode::AllOrNothing => return Err(err),
            Err(err) => {
                tracing::warn!(
                    system_id = %entity.entity_id(),
                    error = %err,
                    "system skipped in best-effort batch"
                );
                outcome.failures.push(err);
            }
        }
    }
    tracing::info!(
        scored = outcome.results.len(),
        failed = outcome.failures.len(),
        scoring_version = %config.scoring_version(),
        "batch assessment finished"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::reference_config;
    use crate::engine::tests::TestSystem;
    use crate::error::ConfigurationError;
    use airt_core::SystemId;

    fn at() -> Timestamp {
        Timestamp::parse("2026-02-01T00:00:00Z").unwrap()
    }

    fn batch() -> Vec<TestSystem> {
        let good_a = TestSystem::credit_model(&["Bureau feed"]);
        let mut bad = TestSystem::credit_model(&[]);
        bad.values.insert("ai_type", "QUANTUM".into());
        let good_b = TestSystem::credit_model(&["OpenAI API"]);
        vec![good_a, bad, good_b]
    }

    #[test]
    fn best_effort_collects_failures() {
        let systems = batch();
        let outcome = assess_batch(&systems, &reference_config(), at(), BatchMode::BestEffort).unwrap();
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert!(!outcome.is_complete());
        assert_eq!(outcome.failures[0].entity_id(), Some(systems[1].id));
        assert_eq!(outcome.results[0].system_id(), systems[0].id);
        assert_eq!(outcome.results[1].system_id(), systems[2].id);
    }

    #[test]
    fn all_or_nothing_aborts() {
        let systems = batch();
        let err = assess_batch(&systems, &reference_config(), at(), BatchMode::AllOrNothing).unwrap_err();
        assert!(matches!(err, ScoringError::UnknownCategoricalValue { ref value, .. } if value == "QUANTUM"));
    }

    #[test]
    fn empty_batch_is_complete() {
        let systems: Vec<TestSystem> = Vec::new();
        let outcome = assess_batch(&systems, &reference_config(), at(), BatchMode::AllOrNothing).unwrap();
        assert!(outcome.is_complete());
        assert!(outcome.results.is_empty());
    }

    struct Narrow {
        id: SystemId,
    }

    impl ScoredEntity for Narrow {
        const DIMENSIONS: &'static [&'static str] = &["ai_type"];

        fn entity_id(&self) -> SystemId {
            self.id
        }

        fn dimension_value(&self, _dimension: &str) -> Option<&str> {
            Some("ML")
        }

        fn dependencies(&self) -> &[String] {
            &[]
        }
    }

    #[test]
    fn config_mismatch_fails_before_scoring() {
        let systems = vec![Narrow { id: SystemId::new() }];
        let err = assess_batch(&systems, &reference_config(), at(), BatchMode::BestEffort).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::Configuration(ConfigurationError::UnknownDimension { .. })
        ));
    }
}
