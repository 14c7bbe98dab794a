//! # AI System Records
//!
//! `SystemRecord` is the inventory row. Categorical attributes are stored as
//! the strings the owner entered; the scoring engine decides whether each one
//! is a known category under the active rule set.

use airt_core::{SystemId, Timestamp};
use airt_scoring::ScoredEntity;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One registered AI system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub system_id: SystemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub domain: String,
    /// `ML`, `LLM`, `AGENT` under the reference rule set.
    pub ai_type: String,
    pub owner_role: String,
    /// `BATCH`, `REAL_TIME`, `HUMAN_IN_LOOP`, `INTERNAL_ONLY`.
    pub deployment_mode: String,
    /// `LOW`, `MEDIUM`, `HIGH`.
    pub decision_criticality: String,
    /// `ADVISORY`, `HUMAN_APPROVAL`, `FULLY_AUTOMATED`.
    pub automation_level: String,
    /// `PUBLIC`, `INTERNAL`, `CONFIDENTIAL`, `REGULATED_PII`.
    pub data_sensitivity: String,
    #[serde(default)]
    pub external_dependencies: Vec<String>,
    pub updated_at: Timestamp,
}

impl SystemRecord {
    /// Check free-text fields that must not be blank.
    pub fn validate(&self) -> Result<(), StoreError> {
        let required = [
            ("name", &self.name),
            ("domain", &self.domain),
            ("owner_role", &self.owner_role),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::Validation(format!(
                    "system {}: {field} must not be blank",
                    self.system_id
                )));
            }
        }
        if self.external_dependencies.iter().any(|d| d.trim().is_empty()) {
            return Err(StoreError::Validation(format!(
                "system {}: external dependency names must not be blank",
                self.system_id
            )));
        }
        Ok(())
    }
}

impl ScoredEntity for SystemRecord {
    const DIMENSIONS: &'static [&'static str] = &[
        "decision_criticality",
        "data_sensitivity",
        "automation_level",
        "ai_type",
        "deployment_mode",
    ];

    fn entity_id(&self) -> SystemId {
        self.system_id
    }

    fn dimension_value(&self, dimension: &str) -> Option<&str> {
        match dimension {
            "decision_criticality" => Some(&self.decision_criticality),
            "data_sensitivity" => Some(&self.data_sensitivity),
            "automation_level" => Some(&self.automation_level),
            "ai_type" => Some(&self.ai_type),
            "deployment_mode" => Some(&self.deployment_mode),
            _ => None,
        }
    }

    fn dependencies(&self) -> &[String] {
        &self.external_dependencies
    }
}
