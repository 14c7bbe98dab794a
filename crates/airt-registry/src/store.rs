//! # In-Memory Registry
//!
//! Thread-safe, cloneable store for systems, tiering results, and lifecycle
//! risks. All three live behind a single `parking_lot::RwLock`, so a
//! snapshot sees one consistent state and a cascading delete is atomic.
//! `parking_lot::RwLock` is non-poisoning; a panicking writer does not wedge
//! the store.
//!
//! ## Tiering history
//!
//! `put_tiering()` appends. The latest result per system is current; older
//! ones stay readable through `tiering_history()`. Results are never edited
//! in place.

use std::collections::HashMap;
use std::sync::Arc;

use airt_core::{RiskId, SystemId, Timestamp};
use airt_scoring::ScoringResult;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::reader::{InventoryReader, RiskRegisterReader, SnapshotSource, TieringReader};
use crate::risk::LifecycleRiskEntry;
use crate::snapshot::RegistrySnapshot;
use crate::system::SystemRecord;

#[derive(Debug, Default)]
struct RegistryState {
    order: Vec<SystemId>,
    systems: HashMap<SystemId, SystemRecord>,
    tiering: HashMap<SystemId, Vec<ScoringResult>>,
    risks: Vec<LifecycleRiskEntry>,
}

impl RegistryState {
    fn require_system(&self, id: SystemId) -> Result<(), StoreError> {
        if self.systems.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::NotFound {
                kind: "system",
                id: id.to_string(),
            })
        }
    }
}

/// Shared handle to the registry. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    state: Arc<RwLock<RegistryState>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Inventory -----------------------------------------------------------

    /// Register a new system.
    pub fn register_system(&self, record: SystemRecord) -> Result<(), StoreError> {
        record.validate()?;
        let mut state = self.state.write();
        if state.systems.contains_key(&record.system_id) {
            return Err(StoreError::Duplicate {
                kind: "system",
                id: record.system_id.to_string(),
            });
        }
        tracing::debug!(system_id = %record.system_id, name = %record.name, "system registered");
        state.order.push(record.system_id);
        state.systems.insert(record.system_id, record);
        Ok(())
    }

    /// Apply `f` to a copy of the record, stamp `updated_at`, validate, and
    /// commit. The system id cannot be changed.
    pub fn update_system(
        &self,
        id: SystemId,
        updated_at: Timestamp,
        f: impl FnOnce(&mut SystemRecord),
    ) -> Result<SystemRecord, StoreError> {
        let mut state = self.state.write();
        let current = state.systems.get(&id).ok_or_else(|| StoreError::NotFound {
            kind: "system",
            id: id.to_string(),
        })?;
        let mut updated = current.clone();
        f(&mut updated);
        updated.system_id = id;
        updated.updated_at = updated_at;
        updated.validate()?;
        state.systems.insert(id, updated.clone());
        Ok(updated)
    }

    /// Remove a system together with its tiering history and risks.
    pub fn delete_system(&self, id: SystemId) -> Result<SystemRecord, StoreError> {
        let mut state = self.state.write();
        let removed = state.systems.remove(&id).ok_or_else(|| StoreError::NotFound {
            kind: "system",
            id: id.to_string(),
        })?;
        state.order.retain(|s| *s != id);
        state.tiering.remove(&id);
        let before = state.risks.len();
        state.risks.retain(|r| r.system_id != id);
        tracing::info!(
            system_id = %id,
            risks_removed = before - state.risks.len(),
            "system deleted"
        );
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Tiering -------------------------------------------------------------

    /// Append `result` as the current tiering result for its system.
    pub fn put_tiering(&self, result: ScoringResult) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.require_system(result.system_id())?;
        state
            .tiering
            .entry(result.system_id())
            .or_default()
            .push(result);
        Ok(())
    }

    /// Every stored result for `id`, oldest first.
    pub fn tiering_history(&self, id: SystemId) -> Vec<ScoringResult> {
        self.state
            .read()
            .tiering
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    // -- Risk register -------------------------------------------------------

    /// Record a risk against an existing system. `severity` is recomputed
    /// from the ratings; the stored entry is returned.
    pub fn record_risk(&self, mut entry: LifecycleRiskEntry) -> Result<LifecycleRiskEntry, StoreError> {
        entry.validate()?;
        entry.refresh_severity();
        let mut state = self.state.write();
        state.require_system(entry.system_id)?;
        if state.risks.iter().any(|r| r.risk_id == entry.risk_id) {
            return Err(StoreError::Duplicate {
                kind: "risk",
                id: entry.risk_id.to_string(),
            });
        }
        state.risks.push(entry.clone());
        Ok(entry)
    }

    /// Edit a risk entry. Its id and system cannot change; severity is
    /// recomputed afterwards.
    pub fn update_risk(
        &self,
        risk_id: RiskId,
        f: impl FnOnce(&mut LifecycleRiskEntry),
    ) -> Result<LifecycleRiskEntry, StoreError> {
        let mut state = self.state.write();
        let slot = state
            .risks
            .iter_mut()
            .find(|r| r.risk_id == risk_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "risk",
                id: risk_id.to_string(),
            })?;
        let mut updated = slot.clone();
        f(&mut updated);
        updated.risk_id = slot.risk_id;
        updated.system_id = slot.system_id;
        updated.validate()?;
        updated.refresh_severity();
        *slot = updated.clone();
        Ok(updated)
    }

    pub fn delete_risk(&self, risk_id: RiskId) -> Result<LifecycleRiskEntry, StoreError> {
        let mut state = self.state.write();
        let index = state
            .risks
            .iter()
            .position(|r| r.risk_id == risk_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "risk",
                id: risk_id.to_string(),
            })?;
        Ok(state.risks.remove(index))
    }

    // -- Snapshots -----------------------------------------------------------

    /// Snapshot stamped with `taken_at`.
    pub fn snapshot_at(&self, taken_at: Timestamp) -> RegistrySnapshot {
        let state = self.state.read();
        let systems: Vec<SystemRecord> = state
            .order
            .iter()
            .filter_map(|id| state.systems.get(id).cloned())
            .collect();
        let tiering = state
            .tiering
            .iter()
            .filter_map(|(id, history)| history.last().map(|r| (*id, r.clone())))
            .collect();
        let mut risks: HashMap<SystemId, Vec<LifecycleRiskEntry>> = HashMap::new();
        for risk in &state.risks {
            risks.entry(risk.system_id).or_default().push(risk.clone());
        }
        drop(state);

        tracing::debug!(
            taken_at = %taken_at,
            systems = systems.len(),
            "registry snapshot taken"
        );
        RegistrySnapshot::new(taken_at, systems, tiering, risks)
    }
}

impl SnapshotSource for Registry {
    fn snapshot(&self) -> RegistrySnapshot {
        self.snapshot_at(Timestamp::now())
    }
}

impl InventoryReader for Registry {
    fn list_systems(&self) -> Vec<SystemRecord> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|id| state.systems.get(id).cloned())
            .collect()
    }

    fn get_system(&self, id: SystemId) -> Option<SystemRecord> {
        self.state.read().systems.get(&id).cloned()
    }
}

impl TieringReader for Registry {
    fn current_tiering(&self, id: SystemId) -> Option<ScoringResult> {
        self.state
            .read()
            .tiering
            .get(&id)
            .and_then(|h| h.last().cloned())
    }
}

impl RiskRegisterReader for Registry {
    fn list_risks(&self, id: SystemId) -> Vec<LifecycleRiskEntry> {
        self.state
            .read()
            .risks
            .iter()
            .filter(|r| r.system_id == id)
            .cloned()
            .collect()
    }
}
