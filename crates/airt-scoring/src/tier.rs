//! # Tier Classifier
//!
//! Pure function over a total score and the configured thresholds.
//!
//! ```text
//! total >= tier1_min              → TIER_1
//! tier2_min <= total < tier1_min  → TIER_2
//! total < tier2_min               → TIER_3
//! ```
//!
//! A score exactly equal to `tier1_min` is Tier 1, never Tier 2.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

/// Discrete risk classification. Tier 1 is the highest risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    /// Highest risk; the most stringent controls.
    #[serde(rename = "TIER_1")]
    Tier1,
    /// Medium risk.
    #[serde(rename = "TIER_2")]
    Tier2,
    /// Lowest risk.
    #[serde(rename = "TIER_3")]
    Tier3,
}

impl RiskTier {
    /// All tiers, highest risk first.
    pub const ALL: [RiskTier; 3] = [RiskTier::Tier1, RiskTier::Tier2, RiskTier::Tier3];

    /// The wire label (`TIER_1`, `TIER_2`, `TIER_3`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tier1 => "TIER_1",
            Self::Tier2 => "TIER_2",
            Self::Tier3 => "TIER_3",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tier plus an owned copy of its default controls.
///
/// Callers may extend `controls`; the config's shared list is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierAssignment {
    /// The assigned tier.
    pub tier: RiskTier,
    /// Copy of the tier's default controls, in configured order.
    pub controls: Vec<String>,
}

/// Classify a total score under `config`'s thresholds.
pub fn classify(total_score: u32, config: &ScoringConfig) -> TierAssignment {
    let tier = config.tier_thresholds().tier_for(total_score);
    TierAssignment {
        tier,
        controls: config.default_controls_for(tier).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::reference_config;

    #[test]
    fn boundary_score_is_tier_one() {
        let config = reference_config();
        let t1 = config.tier_thresholds().tier1_min;
        assert_eq!(classify(t1, &config).tier, RiskTier::Tier1);
        assert_eq!(classify(t1 - 1, &config).tier, RiskTier::Tier2);
    }

    #[test]
    fn tier_two_boundary() {
        let config = reference_config();
        let t2 = config.tier_thresholds().tier2_min;
        assert_eq!(classify(t2, &config).tier, RiskTier::Tier2);
        assert_eq!(classify(t2 - 1, &config).tier, RiskTier::Tier3);
    }

    #[test]
    fn zero_is_tier_three() {
        assert_eq!(classify(0, &reference_config()).tier, RiskTier::Tier3);
    }

    #[test]
    fn controls_are_an_independent_copy() {
        let config = reference_config();
        let mut assignment = classify(30, &config);
        let before = config.default_controls_for(RiskTier::Tier1).to_vec();
        assignment.controls.push("LLM prompt injection testing protocol".into());
        assert_eq!(config.default_controls_for(RiskTier::Tier1), before.as_slice());
        assert_eq!(assignment.controls.len(), before.len() + 1);
    }

    #[test]
    fn controls_preserve_configured_order() {
        let config = reference_config();
        let assignment = classify(0, &config);
        assert_eq!(
            assignment.controls,
            vec![
                "Basic documentation".to_string(),
                "Basic testing".to_string(),
                "Periodic spot checks / lightweight monitoring".to_string(),
            ]
        );
    }

    #[test]
    fn tier_labels() {
        assert_eq!(RiskTier::Tier1.to_string(), "TIER_1");
        assert_eq!(serde_json::to_string(&RiskTier::Tier3).unwrap(), "\"TIER_3\"");
        assert!(RiskTier::Tier1 < RiskTier::Tier3);
    }

    proptest::proptest! {
        #[test]
        fn tier_is_monotone_in_score(a in 0u32..100, b in 0u32..100) {
            let config = reference_config();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            proptest::prop_assert!(classify(hi, &config).tier <= classify(lo, &config).tier);
        }

        #[test]
        fn threshold_comparison_is_inclusive(t1 in 2u32..60, gap in 1u32..20) {
            let doc = crate::config::tests::REFERENCE_YAML
                .replace("tier1_min: 22", &format!("tier1_min: {}", t1 + gap))
                .replace("tier2_min: 15", &format!("tier2_min: {t1}"));
            let config = ScoringConfig::from_yaml_str(&doc).unwrap();
            proptest::prop_assert_eq!(classify(t1 + gap, &config).tier, RiskTier::Tier1);
            proptest::prop_assert_eq!(classify(t1, &config).tier, RiskTier::Tier2);
            proptest::prop_assert_eq!(classify(t1 - 1, &config).tier, RiskTier::Tier3);
        }
    }
}
