//! # Identity Newtypes
//!
//! Newtype wrappers for identifiers. You cannot pass a `RiskId` where a
//! `SystemId` is expected, and a `PackageId` is validated before it can be
//! used to name files inside or next to an archive.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AirtError;

/// Unique identifier for a registered AI system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub Uuid);

/// Unique identifier for a lifecycle risk register entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(pub Uuid);

impl SystemId {
    /// Generate a new random system identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SystemId {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskId {
    /// Generate a new random risk identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RiskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for RiskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one evidence package (a "run id").
///
/// Must match `^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$` so it can be embedded in
/// an archive file name without any path interpretation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageId(String);

impl PackageId {
    /// Validate and wrap a package identifier.
    pub fn new(s: impl Into<String>) -> Result<Self, AirtError> {
        let s = s.into();
        if s.is_empty() || s.len() > 128 {
            return Err(AirtError::Validation(format!(
                "package id must be 1-128 chars, got {}",
                s.len()
            )));
        }
        let mut chars = s.chars();
        if !chars.next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return Err(AirtError::Validation(format!(
                "package id must start with [A-Za-z0-9], got: {s:?}"
            )));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))) {
            return Err(AirtError::Validation(format!(
                "package id contains invalid character {bad:?}: must match [A-Za-z0-9._-]"
            )));
        }
        Ok(Self(s))
    }

    /// Generate a random package identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PackageId {
    type Error = AirtError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackageId> for String {
    fn from(id: PackageId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_id_serializes_as_bare_uuid() {
        let id = SystemId(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(SystemId::new(), SystemId::new());
        assert_ne!(RiskId::new(), RiskId::new());
    }

    #[test]
    fn package_id_accepts_run_labels() {
        for ok in ["run-2026-01-15", "Q3.audit_01", "a"] {
            assert!(PackageId::new(ok).is_ok(), "{ok} should be accepted");
        }
    }

    #[test]
    fn package_id_rejects_traversal_and_separators() {
        for bad in ["", "../etc", "a/b", "a\\b", ".hidden", "-flag", "with space"] {
            assert!(PackageId::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn package_id_rejects_overlong() {
        assert!(PackageId::new("a".repeat(129)).is_err());
        assert!(PackageId::new("a".repeat(128)).is_ok());
    }

    #[test]
    fn package_id_deserialization_validates() {
        let ok: Result<PackageId, _> = serde_json::from_str("\"run-1\"");
        assert!(ok.is_ok());
        let bad: Result<PackageId, _> = serde_json::from_str("\"../x\"");
        assert!(bad.is_err());
    }

    #[test]
    fn generated_package_id_is_valid() {
        let id = PackageId::generate();
        assert!(PackageId::new(id.as_str()).is_ok());
    }
}
