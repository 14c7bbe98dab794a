//! # Evidence Collector
//!
//! Reads the inventory, tiering results, and risk register once into an
//! `ExportView`, then renders each requested artifact from that view alone.
//! Pass a `RegistrySnapshot` as the source so all reads come from one point
//! in time.
//!
//! Every captured tiering result must carry the packaged config's
//! `scoring_version`; a stale result aborts collection rather than being
//! exported under the wrong version header.

use airt_core::SystemId;
use airt_registry::{
    InventoryReader, LifecycleRiskEntry, RiskRegisterReader, SystemRecord, TieringReader,
};
use airt_scoring::{ScoringConfig, ScoringResult};
use serde::Serialize;

use crate::artifact::Artifact;
use crate::csv::render_inventory;
use crate::error::EvidenceError;
use crate::export::{validate_requests, ExportKind, ExportRequest};
use crate::summary::{render_summary, SummaryContext};

/// Everything an export may read, captured once.
#[derive(Debug, Clone)]
pub struct ExportView {
    /// Systems in inventory order.
    pub systems: Vec<SystemRecord>,
    /// Current results, in inventory order; systems without one are absent.
    pub tiering: Vec<ScoringResult>,
    /// Risks per system, in inventory order; systems without risks are absent.
    pub risks: Vec<(SystemId, Vec<LifecycleRiskEntry>)>,
}

impl ExportView {
    /// Capture a view from `source`.
    pub fn capture<S>(source: &S) -> Self
    where
        S: InventoryReader + TieringReader + RiskRegisterReader,
    {
        let systems = source.list_systems();
        let tiering = systems
            .iter()
            .filter_map(|s| source.current_tiering(s.system_id))
            .collect();
        let risks = systems
            .iter()
            .map(|s| (s.system_id, source.list_risks(s.system_id)))
            .filter(|(_, r)| !r.is_empty())
            .collect();
        Self {
            systems,
            tiering,
            risks,
        }
    }

    pub fn system(&self, id: SystemId) -> Option<&SystemRecord> {
        self.systems.iter().find(|s| s.system_id == id)
    }
}

#[derive(Serialize)]
struct TieringExport<'a> {
    scoring_version: &'a str,
    systems: &'a [ScoringResult],
}

#[derive(Serialize)]
struct RiskMapEntry<'a> {
    system_id: SystemId,
    risks: &'a [LifecycleRiskEntry],
}

#[derive(Serialize)]
struct RiskMapExport<'a> {
    systems: Vec<RiskMapEntry<'a>>,
}

/// Renders export requests into artifacts.
#[derive(Debug)]
pub struct EvidenceCollector<'a> {
    config: &'a ScoringConfig,
    context: &'a SummaryContext,
}

impl<'a> EvidenceCollector<'a> {
    pub fn new(config: &'a ScoringConfig, context: &'a SummaryContext) -> Self {
        Self { config, context }
    }

    /// Produce one artifact per request, in request order.
    pub fn collect<S>(&self, source: &S, requests: &[ExportRequest]) -> Result<Vec<Artifact>, EvidenceError>
    where
        S: InventoryReader + TieringReader + RiskRegisterReader,
    {
        validate_requests(requests)?;
        let view = ExportView::capture(source);
        self.ensure_comparable(&view)?;
        requests
            .iter()
            .map(|request| self.render(request, &view))
            .collect()
    }

    fn ensure_comparable(&self, view: &ExportView) -> Result<(), EvidenceError> {
        match view.tiering.iter().find(|r| !r.is_comparable_with(self.config)) {
            Some(stale) => Err(EvidenceError::ScoringVersionMismatch {
                system_id: stale.system_id(),
                result_version: stale.scoring_version().to_string(),
                config_version: self.config.scoring_version().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Render a single request from an already captured view.
    pub fn render(&self, request: &ExportRequest, view: &ExportView) -> Result<Artifact, EvidenceError> {
        let artifact = match request.kind {
            ExportKind::Inventory => Artifact::text(&request.name, render_inventory(&view.systems))?,
            ExportKind::Tiering => Artifact::canonical_json(
                &request.name,
                &TieringExport {
                    scoring_version: self.config.scoring_version(),
                    systems: &view.tiering,
                },
            )?,
            ExportKind::RiskRegister => Artifact::canonical_json(
                &request.name,
                &RiskMapExport {
                    systems: view
                        .risks
                        .iter()
                        .map(|(system_id, risks)| RiskMapEntry {
                            system_id: *system_id,
                            risks,
                        })
                        .collect(),
                },
            )?,
            ExportKind::Summary => Artifact::text(&request.name, render_summary(self.context, view))?,
            ExportKind::ConfigSnapshot => Artifact::canonical_json(&request.name, self.config)?,
        };
        tracing::info!(
            artifact = %artifact.name(),
            sha256 = %artifact.sha256(),
            bytes = artifact.size(),
            "artifact collected"
        );
        Ok(artifact)
    }
}
