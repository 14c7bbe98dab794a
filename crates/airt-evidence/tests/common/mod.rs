//! Shared fixture: the three-system sample portfolio with tiering results
//! and a handful of lifecycle risks.

#![allow(dead_code)]

use airt_core::{PackageId, RiskId, SystemId, Timestamp};
use airt_evidence::PackageRequest;
use airt_registry::{LifecyclePhase, LifecycleRiskEntry, Rating, Registry, RiskVector, SystemRecord};
use airt_scoring::{assess_batch, BatchMode, ScoringConfig};

pub fn config() -> ScoringConfig {
    ScoringConfig::from_yaml_str(include_str!("../../../../config/scoring-v1.yaml")).unwrap()
}

pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

fn id(s: &str) -> SystemId {
    serde_json::from_value(serde_json::Value::String(s.into())).unwrap()
}

fn risk_id(s: &str) -> RiskId {
    serde_json::from_value(serde_json::Value::String(s.into())).unwrap()
}

pub const FRAUD: &str = "0b8e7c7a-1f2d-4e55-9a0c-5d1b2f3e4a01";
pub const MARKETING: &str = "0b8e7c7a-1f2d-4e55-9a0c-5d1b2f3e4a02";
pub const HR: &str = "0b8e7c7a-1f2d-4e55-9a0c-5d1b2f3e4a03";

pub fn systems() -> Vec<SystemRecord> {
    let record = |sid: &str, name: &str, domain: &str, ai: &str, owner: &str, mode: &str, crit: &str, auto: &str, sens: &str, deps: &[&str]| SystemRecord {
        system_id: id(sid),
        name: name.into(),
        description: String::new(),
        domain: domain.into(),
        ai_type: ai.into(),
        owner_role: owner.into(),
        deployment_mode: mode.into(),
        decision_criticality: crit.into(),
        automation_level: auto.into(),
        data_sensitivity: sens.into(),
        external_dependencies: deps.iter().map(|d| d.to_string()).collect(),
        updated_at: ts("2026-01-10T08:00:00Z"),
    };
    vec![
        // 5+5+5+3+4 + few(2) = 24 -> TIER_1
        record(FRAUD, "Fraud Detection ML Model", "Finance", "ML", "Risk Management Team", "REAL_TIME", "HIGH", "FULLY_AUTOMATED", "REGULATED_PII", &["AWS SageMaker", "Stripe API"]),
        // 3+2+3+4+2 + few(2) + opaque(2) = 18 -> TIER_2
        record(MARKETING, "Marketing Copy Generator", "Marketing", "LLM", "Marketing Team", "HUMAN_IN_LOOP", "MEDIUM", "HUMAN_APPROVAL", "INTERNAL", &["OpenAI API (vendor)"]),
        // 1+4+1+5+4 + few(2) = 17 -> TIER_2
        record(HR, "HR Chatbot Agent", "Human Resources", "AGENT", "HR Operations", "REAL_TIME", "LOW", "ADVISORY", "CONFIDENTIAL", &["Zendesk API"]),
    ]
}

fn risk(rid: &str, sid: &str, phase: LifecyclePhase, vector: RiskVector, impact: u8, likelihood: u8, statement: &str) -> LifecycleRiskEntry {
    LifecycleRiskEntry {
        risk_id: risk_id(rid),
        system_id: id(sid),
        lifecycle_phase: phase,
        risk_vector: vector,
        risk_statement: statement.into(),
        impact: Rating::new(impact).unwrap(),
        likelihood: Rating::new(likelihood).unwrap(),
        severity: 0,
        mitigation: "Documented in control library.".into(),
        owner_role: "Model Risk Officer".into(),
        evidence_links: vec!["https://wiki.example.internal/mrm/controls".into()],
        created_at: ts("2026-01-12T09:00:00Z"),
    }
}

pub fn risks() -> Vec<LifecycleRiskEntry> {
    vec![
        risk("7c1d2e3f-0000-4000-8000-000000000001", FRAUD, LifecyclePhase::Data, RiskVector::BiasFairness, 5, 4, "Historical labels encode past review bias."),
        risk("7c1d2e3f-0000-4000-8000-000000000002", FRAUD, LifecyclePhase::Operations, RiskVector::Robustness, 4, 3, "Model drift after fraud pattern shifts."),
        risk("7c1d2e3f-0000-4000-8000-000000000003", MARKETING, LifecyclePhase::Deployment, RiskVector::VendorOpacity, 3, 3, "Vendor model updates change output tone."),
    ]
}

/// Registry with every system registered, scored, and its risks recorded.
pub fn populated_registry() -> Registry {
    let registry = Registry::new();
    let config = config();
    let systems = systems();
    for sys in &systems {
        registry.register_system(sys.clone()).unwrap();
    }
    let outcome = assess_batch(&systems, &config, ts("2026-01-15T10:00:00Z"), BatchMode::AllOrNothing).unwrap();
    for result in outcome.results {
        registry.put_tiering(result).unwrap();
    }
    for r in risks() {
        registry.record_risk(r).unwrap();
    }
    registry
}

pub fn request(package_id: &str) -> PackageRequest {
    PackageRequest::new(
        PackageId::new(package_id).unwrap(),
        "case1",
        "AI Product Engineer",
        ts("2026-03-01T12:00:00Z"),
    )
}
