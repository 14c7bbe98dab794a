//! # Registry Snapshot
//!
//! An owned, immutable copy of the inventory, current tiering results, and
//! risk register, taken under one read lock. Writes that land after the
//! snapshot are invisible to it, so every artifact built from one snapshot
//! describes the same moment.

use std::collections::HashMap;

use airt_core::{SystemId, Timestamp};
use airt_scoring::ScoringResult;

use crate::reader::{InventoryReader, RiskRegisterReader, SnapshotSource, TieringReader};
use crate::risk::LifecycleRiskEntry;
use crate::system::SystemRecord;

/// Point-in-time view of a registry.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    taken_at: Timestamp,
    systems: Vec<SystemRecord>,
    tiering: HashMap<SystemId, ScoringResult>,
    risks: HashMap<SystemId, Vec<LifecycleRiskEntry>>,
}

impl RegistrySnapshot {
    pub(crate) fn new(
        taken_at: Timestamp,
        systems: Vec<SystemRecord>,
        tiering: HashMap<SystemId, ScoringResult>,
        risks: HashMap<SystemId, Vec<LifecycleRiskEntry>>,
    ) -> Self {
        Self {
            taken_at,
            systems,
            tiering,
            risks,
        }
    }

    /// When the snapshot was taken.
    pub fn taken_at(&self) -> Timestamp {
        self.taken_at
    }

    /// Systems in registration order.
    pub fn systems(&self) -> &[SystemRecord] {
        &self.systems
    }

    pub fn tiering_for(&self, id: SystemId) -> Option<&ScoringResult> {
        self.tiering.get(&id)
    }

    pub fn risks_for(&self, id: SystemId) -> &[LifecycleRiskEntry] {
        self.risks.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every risk in the snapshot, grouped by system in registration order.
    pub fn all_risks(&self) -> impl Iterator<Item = &LifecycleRiskEntry> {
        self.systems
            .iter()
            .flat_map(move |sys| self.risks_for(sys.system_id).iter())
    }
}

impl InventoryReader for RegistrySnapshot {
    fn list_systems(&self) -> Vec<SystemRecord> {
        self.systems.clone()
    }

    fn get_system(&self, id: SystemId) -> Option<SystemRecord> {
        self.systems.iter().find(|s| s.system_id == id).cloned()
    }
}

impl TieringReader for RegistrySnapshot {
    fn current_tiering(&self, id: SystemId) -> Option<ScoringResult> {
        self.tiering.get(&id).cloned()
    }
}

impl RiskRegisterReader for RegistrySnapshot {
    fn list_risks(&self, id: SystemId) -> Vec<LifecycleRiskEntry> {
        self.risks_for(id).to_vec()
    }
}

impl SnapshotSource for RegistrySnapshot {
    fn snapshot(&self) -> RegistrySnapshot {
        self.clone()
    }
}
