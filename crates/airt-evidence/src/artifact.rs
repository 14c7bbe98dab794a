//! # Artifacts
//!
//! An `Artifact` is one named file of an evidence package: its bytes and the
//! SHA-256 digest taken when it was created. Content is private and there is
//! no mutator; a changed export is a new artifact with a new digest.
//!
//! ## Name rules
//!
//! Names must match `^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$` and must not contain
//! `..`. No separators, no leading dot, so an archive entry can never land
//! outside the extraction root.

use airt_core::{CanonicalBytes, ContentDigest};
use serde::Serialize;

use crate::error::EvidenceError;

/// Manifest file name inside every package.
pub const MANIFEST_NAME: &str = "evidence_manifest.json";

const MAX_NAME_LEN: usize = 128;

/// Validate an artifact name.
pub fn validate_artifact_name(name: &str) -> Result<(), EvidenceError> {
    let unsafe_name = || EvidenceError::UnsafeArtifactName(name.to_string());
    if name.is_empty() || name.len() > MAX_NAME_LEN || name.contains("..") {
        return Err(unsafe_name());
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return Err(unsafe_name()),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        Ok(())
    } else {
        Err(unsafe_name())
    }
}

/// One named, hashed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    content: Vec<u8>,
    digest: ContentDigest,
}

impl Artifact {
    /// Wrap raw bytes, digesting them once.
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Result<Self, EvidenceError> {
        let name = name.into();
        validate_artifact_name(&name)?;
        let digest = ContentDigest::of_bytes(&content);
        Ok(Self { name, content, digest })
    }

    /// UTF-8 text artifact (summaries, CSV).
    pub fn text(name: impl Into<String>, content: String) -> Result<Self, EvidenceError> {
        Self::from_bytes(name, content.into_bytes())
    }

    /// Canonical JSON artifact.
    pub fn canonical_json(name: impl Into<String>, value: &impl Serialize) -> Result<Self, EvidenceError> {
        let canonical = CanonicalBytes::new(value)?;
        Self::from_bytes(name, canonical.into_bytes())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Digest recorded at creation.
    pub fn digest(&self) -> &ContentDigest {
        &self.digest
    }

    /// Lowercase hex of the recorded digest.
    pub fn sha256(&self) -> String {
        self.digest.to_hex()
    }

    /// Content length in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Re-digest the content and compare with the recorded digest.
    pub fn verify(&self) -> Result<(), EvidenceError> {
        let actual = ContentDigest::of_bytes(&self.content);
        if actual == self.digest {
            Ok(())
        } else {
            Err(EvidenceError::ManifestIntegrity {
                artifact: self.name.clone(),
                recorded: self.digest.to_hex(),
                actual: actual.to_hex(),
            })
        }
    }

    /// Flip one byte without re-digesting, to exercise integrity checks.
    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&mut self, index: usize) {
        if let Some(b) = self.content.get_mut(index) {
            *b ^= 0x01;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_package_names() {
        for name in [
            "model_inventory.csv",
            "risk_tiering.json",
            "case1_executive_summary.md",
            MANIFEST_NAME,
        ] {
            validate_artifact_name(name).unwrap();
        }
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for name in [
            "",
            "../etc/passwd",
            "a/b.json",
            "a\\b.json",
            ".hidden",
            "x..y",
            "/abs.json",
            "name with space.md",
            "caf\u{00e9}.md",
        ] {
            assert!(
                matches!(validate_artifact_name(name), Err(EvidenceError::UnsafeArtifactName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(validate_artifact_name(&"a".repeat(129)).is_err());
        assert!(validate_artifact_name(&"a".repeat(128)).is_ok());
    }

    #[test]
    fn digest_is_taken_once_and_verified() {
        let mut a = Artifact::text("notes.md", "# Notes\n".into()).unwrap();
        assert_eq!(a.size(), 8);
        a.verify().unwrap();
        let recorded = a.sha256();
        a.corrupt_for_test(0);
        match a.verify() {
            Err(EvidenceError::ManifestIntegrity { artifact, recorded: r, actual }) => {
                assert_eq!(artifact, "notes.md");
                assert_eq!(r, recorded);
                assert_ne!(actual, recorded);
            }
            other => panic!("expected integrity error, got {other:?}"),
        }
    }

    #[test]
    fn canonical_json_sorts_keys() {
        let a = Artifact::canonical_json("x.json", &serde_json::json!({"b": 1, "a": [2, 1]})).unwrap();
        assert_eq!(a.content(), br#"{"a":[2,1],"b":1}"#);
    }

    #[test]
    fn canonical_json_rejects_floats() {
        assert!(matches!(
            Artifact::canonical_json("x.json", &serde_json::json!({"avg": 1.5})),
            Err(EvidenceError::Serialization(_))
        ));
    }
}
