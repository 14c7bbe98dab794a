//! # Error Types
//!
//! Base error hierarchy shared by every crate in the workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Errors carry enough context (field, value, path) to locate the root cause
//! without inspecting internals.

use thiserror::Error;

/// Top-level error type for the foundational layer.
#[derive(Error, Debug)]
pub enum AirtError {
    /// An identifier or timestamp failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Error during canonical serialization.
///
/// Any of these indicates a data-model bug: the value handed to the
/// serializer cannot be rendered losslessly and deterministically.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// Finite floats are not permitted in canonical representations.
    /// Scores and counts must be integers; amounts must be strings.
    #[error("float values are not permitted in canonical representations; use an integer or string: {0}")]
    FloatRejected(f64),

    /// NaN and infinities have no lossless JSON form.
    #[error("non-finite float cannot be represented canonically: {0}")]
    NonFiniteFloat(f64),

    /// The value could not be converted into a JSON tree.
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The float check failed for a reason reported by the `Serialize` impl.
    #[error("serialization failed: {0}")]
    Custom(String),
}

impl serde::ser::Error for SerializationError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
