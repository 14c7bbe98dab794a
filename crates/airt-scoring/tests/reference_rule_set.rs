//! Scoring against the shipped `config/scoring-v1.yaml` rule set, loaded from
//! disk the way the CLI loads it.

use std::path::PathBuf;

use airt_core::{SystemId, Timestamp};
use airt_scoring::{assess, assess_batch, BatchMode, RiskTier, ScoredEntity, ScoringConfig};

struct Record {
    id: SystemId,
    criticality: &'static str,
    sensitivity: &'static str,
    automation: &'static str,
    ai_type: &'static str,
    mode: &'static str,
    deps: Vec<String>,
}

impl ScoredEntity for Record {
    const DIMENSIONS: &'static [&'static str] = &[
        "decision_criticality",
        "data_sensitivity",
        "automation_level",
        "ai_type",
        "deployment_mode",
    ];

    fn entity_id(&self) -> SystemId {
        self.id
    }

    fn dimension_value(&self, dimension: &str) -> Option<&str> {
        match dimension {
            "decision_criticality" => Some(self.criticality),
            "data_sensitivity" => Some(self.sensitivity),
            "automation_level" => Some(self.automation),
            "ai_type" => Some(self.ai_type),
            "deployment_mode" => Some(self.mode),
            _ => None,
        }
    }

    fn dependencies(&self) -> &[String] {
        &self.deps
    }
}

fn reference_config() -> ScoringConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/scoring-v1.yaml");
    ScoringConfig::load(&path).expect("shipped config is valid")
}

fn now() -> Timestamp {
    Timestamp::parse("2026-03-01T12:00:00Z").unwrap()
}

#[test]
fn shipped_config_covers_the_five_dimensions() {
    reference_config().ensure_covers(Record::DIMENSIONS).unwrap();
}

#[test]
fn tier_distribution_over_sample_portfolio() {
    let config = reference_config();
    let portfolio = vec![
        // 5+5+5+3+4 + many(4) = 26
        Record {
            id: SystemId::new(),
            criticality: "HIGH",
            sensitivity: "REGULATED_PII",
            automation: "FULLY_AUTOMATED",
            ai_type: "ML",
            mode: "REAL_TIME",
            deps: vec!["Bureau".into(), "Core banking".into(), "Sanctions list".into()],
        },
        // 3+2+3+4+2 + few(2) + opaque(2) = 18
        Record {
            id: SystemId::new(),
            criticality: "MEDIUM",
            sensitivity: "INTERNAL",
            automation: "HUMAN_APPROVAL",
            ai_type: "LLM",
            mode: "HUMAN_IN_LOOP",
            deps: vec!["OpenAI GPT-4 API".into()],
        },
        // 1+1+1+3+1 + none(0) = 7
        Record {
            id: SystemId::new(),
            criticality: "LOW",
            sensitivity: "PUBLIC",
            automation: "ADVISORY",
            ai_type: "ML",
            mode: "INTERNAL_ONLY",
            deps: vec![],
        },
    ];

    let outcome = assess_batch(&portfolio, &config, now(), BatchMode::AllOrNothing).unwrap();
    let tiers: Vec<(u32, RiskTier)> = outcome
        .results
        .iter()
        .map(|r| (r.total_score(), r.risk_tier()))
        .collect();
    assert_eq!(
        tiers,
        vec![(26, RiskTier::Tier1), (18, RiskTier::Tier2), (7, RiskTier::Tier3)]
    );
}

#[test]
fn threshold_change_is_a_config_change() {
    let config = reference_config();
    let record = Record {
        id: SystemId::new(),
        criticality: "MEDIUM",
        sensitivity: "INTERNAL",
        automation: "HUMAN_APPROVAL",
        ai_type: "LLM",
        mode: "HUMAN_IN_LOOP",
        deps: vec!["OpenAI GPT-4 API".into()],
    };
    assert_eq!(assess(&record, &config, now()).unwrap().risk_tier(), RiskTier::Tier2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scoring-v2.json");
    let mut doc = serde_json::to_value(&config).unwrap();
    doc["scoring_version"] = "2.0".into();
    doc["tier_thresholds"]["tier1_min"] = 18.into();
    std::fs::write(&path, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();

    let v2 = ScoringConfig::load(&path).unwrap();
    let result = assess(&record, &v2, now()).unwrap();
    assert_eq!(result.risk_tier(), RiskTier::Tier1);
    assert_eq!(result.scoring_version(), "2.0");
    assert!(!result.is_comparable_with(&config));
}
