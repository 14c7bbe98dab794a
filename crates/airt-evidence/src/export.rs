//! Export requests: which artifacts a package contains and under what names.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::artifact::{validate_artifact_name, MANIFEST_NAME};
use crate::error::EvidenceError;

/// Name of the inventory export.
pub const INVENTORY_NAME: &str = "model_inventory.csv";
/// Name of the tiering export.
pub const TIERING_NAME: &str = "risk_tiering.json";
/// Name of the risk register export.
pub const RISK_MAP_NAME: &str = "lifecycle_risk_map.json";
/// Name of the config snapshot; its digest feeds `inputs_hash`.
pub const CONFIG_SNAPSHOT_NAME: &str = "config_snapshot.json";

/// The kind of content an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Tabular system inventory (CSV).
    Inventory,
    /// Current tiering result per system (canonical JSON).
    Tiering,
    /// Lifecycle risks grouped by system (canonical JSON).
    RiskRegister,
    /// Narrative summary (Markdown).
    Summary,
    /// The scoring config in force (canonical JSON).
    ConfigSnapshot,
}

/// One artifact to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub kind: ExportKind,
    pub name: String,
}

impl ExportRequest {
    pub fn new(kind: ExportKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// The standard five exports for `case`.
    pub fn defaults(case: &str) -> Vec<ExportRequest> {
        vec![
            Self::new(ExportKind::Inventory, INVENTORY_NAME),
            Self::new(ExportKind::Tiering, TIERING_NAME),
            Self::new(ExportKind::RiskRegister, RISK_MAP_NAME),
            Self::new(ExportKind::Summary, format!("{case}_executive_summary.md")),
            Self::new(ExportKind::ConfigSnapshot, CONFIG_SNAPSHOT_NAME),
        ]
    }
}

/// Validate a request list: safe, unique names, none reserved, at most one
/// request per kind.
pub fn validate_requests(requests: &[ExportRequest]) -> Result<(), EvidenceError> {
    let mut names = HashSet::new();
    let mut kinds = HashSet::new();
    for request in requests {
        validate_artifact_name(&request.name)?;
        if request.name == MANIFEST_NAME {
            return Err(EvidenceError::ReservedArtifactName(request.name.clone()));
        }
        if !names.insert(request.name.as_str()) {
            return Err(EvidenceError::DuplicateArtifact(request.name.clone()));
        }
        if !kinds.insert(request.kind) {
            return Err(EvidenceError::DuplicateExport(request.kind));
        }
    }
    Ok(())
}

/// Validate a case label. It becomes part of artifact and archive names.
pub fn validate_case_label(case: &str) -> Result<(), EvidenceError> {
    let mut chars = case.chars();
    let ok = case.len() <= 64
        && matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(EvidenceError::InvalidCaseLabel(case.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_case_in_summary_name() {
        let requests = ExportRequest::defaults("case1");
        assert_eq!(requests.len(), 5);
        assert!(requests
            .iter()
            .any(|r| r.kind == ExportKind::Summary && r.name == "case1_executive_summary.md"));
        validate_requests(&requests).unwrap();
    }

    #[test]
    fn duplicate_names_rejected() {
        let requests = vec![
            ExportRequest::new(ExportKind::Inventory, "a.csv"),
            ExportRequest::new(ExportKind::Summary, "a.csv"),
        ];
        assert!(matches!(
            validate_requests(&requests),
            Err(EvidenceError::DuplicateArtifact(n)) if n == "a.csv"
        ));
    }

    #[test]
    fn one_request_per_kind() {
        let requests = vec![
            ExportRequest::new(ExportKind::ConfigSnapshot, "a.json"),
            ExportRequest::new(ExportKind::ConfigSnapshot, "b.json"),
        ];
        assert!(matches!(
            validate_requests(&requests),
            Err(EvidenceError::DuplicateExport(ExportKind::ConfigSnapshot))
        ));
    }

    #[test]
    fn manifest_name_is_reserved() {
        let requests = vec![ExportRequest::new(ExportKind::Tiering, MANIFEST_NAME)];
        assert!(matches!(
            validate_requests(&requests),
            Err(EvidenceError::ReservedArtifactName(_))
        ));
    }

    #[test]
    fn case_labels() {
        validate_case_label("case1").unwrap();
        validate_case_label("Q3-2026_review").unwrap();
        for bad in ["", "-x", "a.b", "a/b", "a b"] {
            assert!(validate_case_label(bad).is_err(), "{bad:?}");
        }
    }
}
