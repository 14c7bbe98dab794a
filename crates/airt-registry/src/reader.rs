//! Read-side interfaces the evidence collector consumes.
//!
//! Both the live `Registry` and a frozen `RegistrySnapshot` implement them;
//! evidence collection is only ever run against a snapshot.

use airt_core::SystemId;
use airt_scoring::ScoringResult;

use crate::risk::LifecycleRiskEntry;
use crate::snapshot::RegistrySnapshot;
use crate::system::SystemRecord;

/// AI system inventory.
pub trait InventoryReader {
    /// Every registered system, in registration order.
    fn list_systems(&self) -> Vec<SystemRecord>;

    fn get_system(&self, id: SystemId) -> Option<SystemRecord>;
}

/// Current tiering result per system.
pub trait TieringReader {
    fn current_tiering(&self, id: SystemId) -> Option<ScoringResult>;
}

/// Lifecycle risk register.
pub trait RiskRegisterReader {
    /// Risks recorded against `id`, in recording order.
    fn list_risks(&self, id: SystemId) -> Vec<LifecycleRiskEntry>;
}

/// Something that can produce a consistent point-in-time view across all
/// three stores.
pub trait SnapshotSource {
    fn snapshot(&self) -> RegistrySnapshot;
}
