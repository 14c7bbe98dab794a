//! # airt-registry — Inventory, Tiering Store, Risk Register
//!
//! In-memory reference implementations of the collaborators the evidence
//! pipeline reads from:
//!
//! - **Systems** (`system.rs`): `SystemRecord`, the inventory row. Implements
//!   `ScoredEntity` over the five reference dimensions.
//!
//! - **Risks** (`risk.rs`): `LifecycleRiskEntry`, phases, vectors, and 1-5
//!   ratings. Severity is `impact × likelihood`.
//!
//! - **Matrix** (`matrix.rs`): phase × vector aggregation of risk entries.
//!
//! - **Store** (`store.rs`): `Registry`, one lock over all three stores,
//!   versioned tiering history, cascading deletes.
//!
//! - **Snapshot** (`snapshot.rs`): `RegistrySnapshot`, an owned point-in-time
//!   copy used for evidence collection.
//!
//! - **Readers** (`reader.rs`): the read-side traits both implement.

pub mod error;
pub mod matrix;
pub mod reader;
pub mod risk;
pub mod snapshot;
pub mod store;
pub mod system;

pub use error::StoreError;
pub use matrix::{MatrixCell, RiskMatrix};
pub use reader::{InventoryReader, RiskRegisterReader, SnapshotSource, TieringReader};
pub use risk::{LifecyclePhase, LifecycleRiskEntry, Rating, RiskVector};
pub use snapshot::RegistrySnapshot;
pub use store::Registry;
pub use system::SystemRecord;
