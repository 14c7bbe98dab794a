//! # Lifecycle Risk Register Entries
//!
//! A risk entry places one risk statement at a lifecycle phase and a risk
//! vector, rated for impact and likelihood on a 1-5 scale.
//!
//! ## Invariant
//!
//! `severity == impact × likelihood` for every entry the register holds.
//! The register recomputes it whenever an entry is created or re-rated;
//! downstream consumers (evidence export, risk matrix) take it as given.

use airt_core::{RiskId, SystemId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Stage of the AI system lifecycle a risk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecyclePhase {
    Inception,
    Data,
    DesignBuild,
    Validation,
    Deployment,
    Operations,
    ChangeRetire,
}

impl LifecyclePhase {
    /// All phases in lifecycle order.
    pub const ALL: [LifecyclePhase; 7] = [
        Self::Inception,
        Self::Data,
        Self::DesignBuild,
        Self::Validation,
        Self::Deployment,
        Self::Operations,
        Self::ChangeRetire,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inception => "INCEPTION",
            Self::Data => "DATA",
            Self::DesignBuild => "DESIGN_BUILD",
            Self::Validation => "VALIDATION",
            Self::Deployment => "DEPLOYMENT",
            Self::Operations => "OPERATIONS",
            Self::ChangeRetire => "CHANGE_RETIRE",
        }
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of harm a risk describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskVector {
    Functional,
    Robustness,
    Security,
    BiasFairness,
    Interpretability,
    Operational,
    VendorOpacity,
    Compliance,
}

impl RiskVector {
    pub const ALL: [RiskVector; 8] = [
        Self::Functional,
        Self::Robustness,
        Self::Security,
        Self::BiasFairness,
        Self::Interpretability,
        Self::Operational,
        Self::VendorOpacity,
        Self::Compliance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "FUNCTIONAL",
            Self::Robustness => "ROBUSTNESS",
            Self::Security => "SECURITY",
            Self::BiasFairness => "BIAS_FAIRNESS",
            Self::Interpretability => "INTERPRETABILITY",
            Self::Operational => "OPERATIONAL",
            Self::VendorOpacity => "VENDOR_OPACITY",
            Self::Compliance => "COMPLIANCE",
        }
    }
}

impl std::fmt::Display for RiskVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An impact or likelihood rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, StoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(StoreError::Validation(format!(
                "rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = StoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> Self {
        r.0
    }
}

/// One row of the lifecycle risk register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRiskEntry {
    #[serde(default)]
    pub risk_id: RiskId,
    pub system_id: SystemId,
    pub lifecycle_phase: LifecyclePhase,
    pub risk_vector: RiskVector,
    pub risk_statement: String,
    pub impact: Rating,
    pub likelihood: Rating,
    /// `impact × likelihood`; recomputed by the register, ignored on input.
    #[serde(default)]
    pub severity: u8,
    #[serde(default)]
    pub mitigation: String,
    pub owner_role: String,
    #[serde(default)]
    pub evidence_links: Vec<String>,
    pub created_at: Timestamp,
}

impl LifecycleRiskEntry {
    /// `impact × likelihood`, in `1..=25`.
    pub fn computed_severity(&self) -> u8 {
        self.impact.value() * self.likelihood.value()
    }

    /// Recompute `severity` from the current ratings.
    pub(crate) fn refresh_severity(&mut self) {
        self.severity = self.computed_severity();
    }

    pub(crate) fn validate(&self) -> Result<(), StoreError> {
        if self.risk_statement.trim().is_empty() {
            return Err(StoreError::Validation(format!(
                "risk {}: risk_statement must not be blank",
                self.risk_id
            )));
        }
        if self.owner_role.trim().is_empty() {
            return Err(StoreError::Validation(format!(
                "risk {}: owner_role must not be blank",
                self.risk_id
            )));
        }
        Ok(())
    }
}
