//! Registry errors.

use thiserror::Error;

/// Failure of a registry operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with the given id.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind (`system`, `risk`).
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A record with the same id is already registered.
    #[error("{kind} {id} already exists")]
    Duplicate {
        /// Record kind.
        kind: &'static str,
        /// The duplicated id.
        id: String,
    },

    /// The record violates a field constraint.
    #[error("validation failed: {0}")]
    Validation(String),
}
