//! Read-only view of an entity for the scoring engine.

use airt_core::SystemId;

/// An entity the engine can score: one categorical value per dimension and a
/// list of free-text dependency identifiers.
///
/// Values are plain strings. Validating them against a rule set is
/// the engine's job, so an out-of-vocabulary value surfaces as
/// `ScoringError::UnknownCategoricalValue` instead of being lost at parse time.
pub trait ScoredEntity {
    /// The dimensions this entity type exposes. Checked against a config with
    /// `ScoringConfig::ensure_covers()`.
    const DIMENSIONS: &'static [&'static str];

    /// Identifier recorded in results and errors.
    fn entity_id(&self) -> SystemId;

    /// The categorical value for `dimension`, or `None` if not exposed.
    fn dimension_value(&self, dimension: &str) -> Option<&str>;

    /// Free-text dependency identifiers, in record order.
    fn dependencies(&self) -> &[String];
}
