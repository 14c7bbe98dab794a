//! # Executive Summary
//!
//! Markdown narrative over one export view. Output is a pure function of its
//! inputs: the generation time is passed in, count lists are ordered by
//! descending count with ties broken by label, and averages use integer
//! arithmetic with half-up rounding.
//!
//! Each section is a `fmt::Result` writer over one `Formatter`; the
//! document is the `Display` of [`Summary`].

use std::collections::BTreeMap;
use std::fmt;

use airt_core::{PackageId, Timestamp};
use airt_registry::{LifecycleRiskEntry, RiskMatrix};
use airt_scoring::RiskTier;

use crate::collector::ExportView;
use crate::export::{INVENTORY_NAME, RISK_MAP_NAME, TIERING_NAME};

/// Severity at or above which a risk counts as high.
pub const HIGH_SEVERITY: u8 = 15;

const TOP_RISKS: usize = 5;

/// Package-level facts printed in the summary header.
#[derive(Debug, Clone)]
pub struct SummaryContext {
    pub case: String,
    pub package_id: PackageId,
    pub generated_at: Timestamp,
    pub generated_by: String,
    pub app_version: String,
    pub scoring_version: String,
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Counts ordered by descending count, then label.
fn counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *tally.entry(label).or_default() += 1;
    }
    let mut out: Vec<_> = tally.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    out
}

/// `sum / n` rendered with `places` decimals, rounded half up.
fn fixed_point_mean(sum: u64, n: u64, places: u32) -> String {
    if n == 0 {
        return "0".into();
    }
    let scale = 10u64.pow(places);
    let scaled = (sum * scale * 2 + n) / (2 * n);
    if places == 0 {
        return scaled.to_string();
    }
    format!(
        "{}.{:0width$}",
        scaled / scale,
        scaled % scale,
        width = places as usize
    )
}

fn tier_label(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Tier1 => "Highest Risk",
        RiskTier::Tier2 => "Medium Risk",
        RiskTier::Tier3 => "Lowest Risk",
    }
}

fn write_counts(f: &mut fmt::Formatter<'_>, heading: &str, rows: &[(&str, usize)], noun: &str) -> fmt::Result {
    writeln!(f, "**{heading}:**")?;
    for (label, n) in rows {
        writeln!(f, "- {label}: {}", plural(*n, noun))?;
    }
    writeln!(f)
}

fn all_risks(view: &ExportView) -> Vec<&LifecycleRiskEntry> {
    view.risks.iter().flat_map(|(_, r)| r.iter()).collect()
}

fn tier_counts(view: &ExportView) -> BTreeMap<RiskTier, usize> {
    let mut counts: BTreeMap<RiskTier, usize> = RiskTier::ALL.iter().map(|t| (*t, 0)).collect();
    for result in &view.tiering {
        *counts.entry(result.risk_tier()).or_default() += 1;
    }
    counts
}

/// The executive summary of one package, rendered through `Display`.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    pub context: &'a SummaryContext,
    pub view: &'a ExportView,
}

impl Summary<'_> {
    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.context;
        writeln!(f, "# Executive Summary for {} (Package ID: {})\n", ctx.case, ctx.package_id)?;
        writeln!(f, "**Generated At:** {}", ctx.generated_at)?;
        writeln!(f, "**App Version:** {}", ctx.app_version)?;
        writeln!(f, "**Scoring Version:** {}", ctx.scoring_version)?;
        writeln!(f, "**Prepared By:** {}\n", ctx.generated_by)?;
        writeln!(f, "---\n")?;
        writeln!(f, "## Executive Overview\n")?;
        writeln!(
            f,
            "This report assesses the organization's AI system portfolio: inventory, risk tiering, \
             and lifecycle risk. Tiers are assigned by a deterministic, rules-based scoring model so \
             that every classification can be reproduced from the recorded inputs.\n"
        )
    }

    fn inventory(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let systems = &self.view.systems;
        writeln!(f, "## AI System Inventory Summary\n")?;
        writeln!(f, "**Total AI Systems Registered:** {}\n", systems.len())?;
        if systems.is_empty() {
            return Ok(());
        }
        write_counts(
            f,
            "Breakdown by AI Type",
            &counts(systems.iter().map(|s| s.ai_type.as_str())),
            "system",
        )?;
        write_counts(
            f,
            "Systems by Business Domain",
            &counts(systems.iter().map(|s| s.domain.as_str())),
            "system",
        )?;
        write_counts(
            f,
            "Decision Criticality Distribution",
            &counts(systems.iter().map(|s| s.decision_criticality.as_str())),
            "system",
        )
    }

    fn tiering(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        writeln!(f, "## Risk Tiering Overview\n")?;
        writeln!(
            f,
            "Each system is scored on decision criticality, data sensitivity, automation level, AI \
             type, deployment mode, and external dependencies. Higher tiers carry more stringent \
             governance controls.\n"
        )?;
        writeln!(f, "**Tier Distribution:**")?;
        for (tier, n) in tier_counts(view) {
            writeln!(f, "- **{tier}** ({}): {}", tier_label(tier), plural(n, "system"))?;
        }
        writeln!(f)?;

        if !view.tiering.is_empty() {
            let sum: u64 = view.tiering.iter().map(|r| u64::from(r.total_score())).sum();
            writeln!(
                f,
                "**Average Risk Score Across All Systems:** {}\n",
                fixed_point_mean(sum, view.tiering.len() as u64, 1)
            )?;
        }
        let unscored = view.systems.len().saturating_sub(view.tiering.len());
        if unscored > 0 {
            writeln!(f, "**Systems Without a Tiering Result:** {unscored}\n")?;
        }

        for tier in RiskTier::ALL {
            let in_tier: Vec<_> = view
                .tiering
                .iter()
                .filter(|r| r.risk_tier() == tier)
                .filter_map(|r| view.system(r.system_id()).map(|s| (s, r)))
                .collect();
            if in_tier.is_empty() {
                continue;
            }
            writeln!(f, "**{tier} Systems:**")?;
            for (sys, result) in in_tier {
                writeln!(
                    f,
                    "- {} (Score: {}, Domain: {}, Type: {})",
                    sys.name,
                    result.total_score(),
                    sys.domain,
                    sys.ai_type
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn lifecycle(&self, f: &mut fmt::Formatter<'_>, risks: &[&LifecycleRiskEntry]) -> fmt::Result {
        writeln!(f, "## Lifecycle Risk Analysis\n")?;
        writeln!(f, "**Total Risks Identified:** {}\n", risks.len())?;
        if risks.is_empty() {
            return writeln!(
                f,
                "*Note: No lifecycle risks have been registered yet. Populating the risk register is \
                 recommended for all systems, particularly those in TIER_1.*\n"
            );
        }
        write_counts(
            f,
            "Risks by Lifecycle Phase",
            &counts(risks.iter().map(|r| r.lifecycle_phase.as_str())),
            "risk",
        )?;
        write_counts(
            f,
            "Risks by Vector",
            &counts(risks.iter().map(|r| r.risk_vector.as_str())),
            "risk",
        )?;
        let sum: u64 = risks.iter().map(|r| u64::from(r.severity)).sum();
        let max = risks.iter().map(|r| r.severity).max().unwrap_or(0);
        let high = risks.iter().filter(|r| r.severity >= HIGH_SEVERITY).count();
        writeln!(f, "**Severity Statistics:**")?;
        writeln!(f, "- Mean Severity: {}", fixed_point_mean(sum, risks.len() as u64, 2))?;
        writeln!(f, "- Maximum Severity: {max}")?;
        writeln!(f, "- High Severity Risks (>= {HIGH_SEVERITY}): {high}\n")?;

        let matrix = RiskMatrix::for_system(risks.iter().copied());
        writeln!(f, "**Risk Hotspots (phase x vector):**")?;
        for (phase, vector, cell) in matrix.hotspots().into_iter().take(TOP_RISKS) {
            writeln!(
                f,
                "- {phase} / {vector}: {}, max severity {}",
                plural(cell.count, "risk"),
                cell.max_severity
            )?;
        }
        writeln!(f)
    }

    fn top_risks(&self, f: &mut fmt::Formatter<'_>, risks: &[&LifecycleRiskEntry]) -> fmt::Result {
        writeln!(f, "## Top Risks by Severity (Across All Systems)\n")?;
        if risks.is_empty() {
            return writeln!(
                f,
                "No risks have been registered. Populate the lifecycle risk register for all AI \
                 systems, especially those classified as TIER_1.\n"
            );
        }
        writeln!(
            f,
            "The highest-severity risks across the portfolio. These should be prioritized in \
             mitigation planning.\n"
        )?;
        let mut ranked = risks.to_vec();
        // Stable: equal severities keep registration order.
        ranked.sort_by(|a, b| b.severity.cmp(&a.severity));
        for (rank, risk) in ranked.iter().take(TOP_RISKS).enumerate() {
            let system_name = self
                .view
                .system(risk.system_id)
                .map_or("Unknown System", |s| s.name.as_str());
            writeln!(f, "### {}. {system_name}", rank + 1)?;
            writeln!(
                f,
                "**Lifecycle Phase:** {} | **Risk Vector:** {}\n",
                risk.lifecycle_phase, risk.risk_vector
            )?;
            writeln!(
                f,
                "**Severity Score:** {} (Impact: {}/5, Likelihood: {}/5)\n",
                risk.severity,
                risk.impact.value(),
                risk.likelihood.value()
            )?;
            writeln!(f, "**Risk Statement:** {}\n", risk.risk_statement)?;
            if !risk.mitigation.trim().is_empty() {
                writeln!(f, "**Mitigation Strategy:** {}\n", risk.mitigation)?;
            }
            writeln!(f, "**Owner:** {}\n", risk.owner_role)?;
            writeln!(f, "---\n")?;
        }
        Ok(())
    }

    fn findings(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        writeln!(f, "## Key Findings & Recommendations\n")?;
        let without_risks = view
            .systems
            .iter()
            .filter(|s| !view.risks.iter().any(|(id, _)| *id == s.system_id))
            .count();
        if without_risks > 0 {
            writeln!(
                f,
                "- **Action Required:** {} currently lack lifecycle risk register entries. Risk \
                 assessment should be completed for all systems.",
                plural(without_risks, "system")
            )?;
        }
        let tier1 = tier_counts(view).get(&RiskTier::Tier1).copied().unwrap_or(0);
        if tier1 > 0 {
            writeln!(
                f,
                "- **High-Risk Systems:** {} TIER_1 require comprehensive governance controls \
                 including independent validation, full documentation, security testing, and \
                 continuous monitoring.",
                plural(tier1, "system")
            )?;
        }
        let with_deps = view
            .systems
            .iter()
            .filter(|s| !s.external_dependencies.is_empty())
            .count();
        if with_deps > 0 {
            writeln!(
                f,
                "- **Vendor Risk:** {} rely on external dependencies. Vendor risk assessments and \
                 contingency plans should be maintained.",
                plural(with_deps, "system")
            )?;
        }
        writeln!(
            f,
            "- **Regular Review:** Re-run tiering and review lifecycle risks quarterly or whenever a \
             system changes significantly."
        )?;
        writeln!(
            f,
            "- **Control Implementation:** Verify that the required controls for each tier are in \
             place and working.\n"
        )?;
        writeln!(f, "---\n")?;
        writeln!(
            f,
            "*Generated from a point-in-time snapshot of the inventory and risk register. Detailed \
             data is in the accompanying artifacts: {INVENTORY_NAME}, {TIERING_NAME}, and \
             {RISK_MAP_NAME}.*"
        )
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let risks = all_risks(self.view);
        self.header(f)?;
        self.inventory(f)?;
        self.tiering(f)?;
        self.lifecycle(f, &risks)?;
        self.top_risks(f, &risks)?;
        self.findings(f)
    }
}

/// Render the executive summary.
pub fn render_summary(ctx: &SummaryContext, view: &ExportView) -> String {
    Summary { context: ctx, view }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use airt_core::{RiskId, SystemId};
    use airt_registry::{LifecyclePhase, Rating, RiskVector, SystemRecord};

    fn ts() -> Timestamp {
        Timestamp::parse("2026-03-01T12:00:00Z").unwrap()
    }

    fn context() -> SummaryContext {
        SummaryContext {
            case: "case1".into(),
            package_id: PackageId::new("pkg-1").unwrap(),
            generated_at: ts(),
            generated_by: "AI Product Engineer".into(),
            app_version: "1.0".into(),
            scoring_version: "1.0".into(),
        }
    }

    fn system(id: SystemId, name: &str) -> SystemRecord {
        SystemRecord {
            system_id: id,
            name: name.into(),
            description: String::new(),
            domain: "Finance".into(),
            ai_type: "ML".into(),
            owner_role: "Risk Management Team".into(),
            deployment_mode: "REAL_TIME".into(),
            decision_criticality: "HIGH".into(),
            automation_level: "FULLY_AUTOMATED".into(),
            data_sensitivity: "REGULATED_PII".into(),
            external_dependencies: Vec::new(),
            updated_at: ts(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn risk(
        system_id: SystemId,
        phase: LifecyclePhase,
        vector: RiskVector,
        impact: u8,
        likelihood: u8,
        statement: &str,
        mitigation: &str,
        owner: &str,
    ) -> LifecycleRiskEntry {
        LifecycleRiskEntry {
            risk_id: RiskId::new(),
            system_id,
            lifecycle_phase: phase,
            risk_vector: vector,
            risk_statement: statement.into(),
            impact: Rating::new(impact).unwrap(),
            likelihood: Rating::new(likelihood).unwrap(),
            severity: impact * likelihood,
            mitigation: mitigation.into(),
            owner_role: owner.into(),
            evidence_links: Vec::new(),
            created_at: ts(),
        }
    }

    #[test]
    fn empty_portfolio_renders_exact_document() {
        let view = ExportView {
            systems: Vec::new(),
            tiering: Vec::new(),
            risks: Vec::new(),
        };
        let expected = concat!(
            "# Executive Summary for case1 (Package ID: pkg-1)\n\n",
            "**Generated At:** 2026-03-01T12:00:00Z\n",
            "**App Version:** 1.0\n",
            "**Scoring Version:** 1.0\n",
            "**Prepared By:** AI Product Engineer\n\n",
            "---\n\n",
            "## Executive Overview\n\n",
            "This report assesses the organization's AI system portfolio: inventory, risk tiering, ",
            "and lifecycle risk. Tiers are assigned by a deterministic, rules-based scoring model so ",
            "that every classification can be reproduced from the recorded inputs.\n\n",
            "## AI System Inventory Summary\n\n",
            "**Total AI Systems Registered:** 0\n\n",
            "## Risk Tiering Overview\n\n",
            "Each system is scored on decision criticality, data sensitivity, automation level, AI ",
            "type, deployment mode, and external dependencies. Higher tiers carry more stringent ",
            "governance controls.\n\n",
            "**Tier Distribution:**\n",
            "- **TIER_1** (Highest Risk): 0 systems\n",
            "- **TIER_2** (Medium Risk): 0 systems\n",
            "- **TIER_3** (Lowest Risk): 0 systems\n\n",
            "## Lifecycle Risk Analysis\n\n",
            "**Total Risks Identified:** 0\n\n",
            "*Note: No lifecycle risks have been registered yet. Populating the risk register is ",
            "recommended for all systems, particularly those in TIER_1.*\n\n",
            "## Top Risks by Severity (Across All Systems)\n\n",
            "No risks have been registered. Populate the lifecycle risk register for all AI ",
            "systems, especially those classified as TIER_1.\n\n",
            "## Key Findings & Recommendations\n\n",
            "- **Regular Review:** Re-run tiering and review lifecycle risks quarterly or whenever a ",
            "system changes significantly.\n",
            "- **Control Implementation:** Verify that the required controls for each tier are in ",
            "place and working.\n\n",
            "---\n\n",
            "*Generated from a point-in-time snapshot of the inventory and risk register. Detailed ",
            "data is in the accompanying artifacts: model_inventory.csv, risk_tiering.json, and ",
            "lifecycle_risk_map.json.*\n",
        );
        assert_eq!(render_summary(&context(), &view), expected);
    }

    #[test]
    fn risk_sections_render_exact_lines() {
        let id = SystemId::new();
        let view = ExportView {
            systems: vec![system(id, "Fraud Model")],
            tiering: Vec::new(),
            risks: vec![(
                id,
                vec![
                    risk(id, LifecyclePhase::Operations, RiskVector::Robustness, 2, 3, "Drift.", "", "Ops"),
                    risk(id, LifecyclePhase::Data, RiskVector::BiasFairness, 5, 4, "Label bias.", "Reweigh labels.", "MRO"),
                ],
            )],
        };
        let doc = render_summary(&context(), &view);
        let start = doc.find("## Lifecycle Risk Analysis").unwrap();
        let end = doc.find("## Key Findings").unwrap();
        let expected = concat!(
            "## Lifecycle Risk Analysis\n\n",
            "**Total Risks Identified:** 2\n\n",
            "**Risks by Lifecycle Phase:**\n",
            "- DATA: 1 risk\n",
            "- OPERATIONS: 1 risk\n\n",
            "**Risks by Vector:**\n",
            "- BIAS_FAIRNESS: 1 risk\n",
            "- ROBUSTNESS: 1 risk\n\n",
            "**Severity Statistics:**\n",
            "- Mean Severity: 13.00\n",
            "- Maximum Severity: 20\n",
            "- High Severity Risks (>= 15): 1\n\n",
            "**Risk Hotspots (phase x vector):**\n",
            "- DATA / BIAS_FAIRNESS: 1 risk, max severity 20\n",
            "- OPERATIONS / ROBUSTNESS: 1 risk, max severity 6\n\n",
            "## Top Risks by Severity (Across All Systems)\n\n",
            "The highest-severity risks across the portfolio. These should be prioritized in ",
            "mitigation planning.\n\n",
            "### 1. Fraud Model\n",
            "**Lifecycle Phase:** DATA | **Risk Vector:** BIAS_FAIRNESS\n\n",
            "**Severity Score:** 20 (Impact: 5/5, Likelihood: 4/5)\n\n",
            "**Risk Statement:** Label bias.\n\n",
            "**Mitigation Strategy:** Reweigh labels.\n\n",
            "**Owner:** MRO\n\n",
            "---\n\n",
            "### 2. Fraud Model\n",
            "**Lifecycle Phase:** OPERATIONS | **Risk Vector:** ROBUSTNESS\n\n",
            "**Severity Score:** 6 (Impact: 2/5, Likelihood: 3/5)\n\n",
            "**Risk Statement:** Drift.\n\n",
            "**Owner:** Ops\n\n",
            "---\n\n",
        );
        assert_eq!(&doc[start..end], expected);
        assert!(doc.contains("**Total AI Systems Registered:** 1\n\n"));
        assert!(doc.contains("**Systems Without a Tiering Result:** 1\n\n"));
    }

    #[test]
    fn counts_order_desc_then_label() {
        let rows = counts(["LLM", "ML", "AGENT", "ML", "LLM", "ML"]);
        assert_eq!(rows, vec![("ML", 3), ("LLM", 2), ("AGENT", 1)]);
        let ties = counts(["b", "a", "c"]);
        assert_eq!(ties, vec![("a", 1), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn fixed_point_mean_rounds_half_up() {
        assert_eq!(fixed_point_mean(51, 3, 1), "17.0");
        assert_eq!(fixed_point_mean(50, 3, 1), "16.7");
        assert_eq!(fixed_point_mean(5, 4, 1), "1.3");
        assert_eq!(fixed_point_mean(21, 2, 2), "10.50");
        assert_eq!(fixed_point_mean(1, 3, 2), "0.33");
        assert_eq!(fixed_point_mean(0, 0, 2), "0");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "system"), "1 system");
        assert_eq!(plural(0, "risk"), "0 risks");
    }
}
