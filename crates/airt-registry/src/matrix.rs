//! # Risk Matrix
//!
//! Lifecycle phase × risk vector grid. Every cell is present; empty cells
//! hold a zero count and zero max severity.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::risk::{LifecycleRiskEntry, LifecyclePhase, RiskVector};

/// Aggregate of the risks that fall in one phase × vector cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    pub count: usize,
    pub max_severity: u8,
}

/// Phase × vector grid over a set of risk entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskMatrix {
    cells: BTreeMap<LifecyclePhase, BTreeMap<RiskVector, MatrixCell>>,
}

impl RiskMatrix {
    /// Build the grid over `entries`, usually the risks of one system.
    pub fn for_system<'a>(entries: impl IntoIterator<Item = &'a LifecycleRiskEntry>) -> Self {
        let mut cells: BTreeMap<LifecyclePhase, BTreeMap<RiskVector, MatrixCell>> = LifecyclePhase::ALL
            .iter()
            .map(|phase| {
                let row = RiskVector::ALL
                    .iter()
                    .map(|vector| (*vector, MatrixCell::default()))
                    .collect();
                (*phase, row)
            })
            .collect();

        for entry in entries {
            if let Some(cell) = cells
                .get_mut(&entry.lifecycle_phase)
                .and_then(|row| row.get_mut(&entry.risk_vector))
            {
                cell.count += 1;
                cell.max_severity = cell.max_severity.max(entry.severity);
            }
        }
        Self { cells }
    }

    /// Non-empty cells, highest max severity first, then by count, then in
    /// phase and vector order.
    pub fn hotspots(&self) -> Vec<(LifecyclePhase, RiskVector, MatrixCell)> {
        let mut hot: Vec<_> = self
            .cells
            .iter()
            .flat_map(|(phase, row)| {
                row.iter()
                    .filter(|(_, cell)| cell.count > 0)
                    .map(move |(vector, cell)| (*phase, *vector, *cell))
            })
            .collect();
        hot.sort_by(|a, b| {
            b.2.max_severity
                .cmp(&a.2.max_severity)
                .then(b.2.count.cmp(&a.2.count))
                .then(a.0.cmp(&b.0))
                .then(a.1.cmp(&b.1))
        });
        hot
    }
}
