//! Reply payloads returned through [`RuntimeHandle`](crate::RuntimeHandle).

use power_core::{Activation, EntityId, PowerId, Tick};

use crate::sandbox::WorldStats;

/// Result of one activation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationReport {
    pub actor: EntityId,
    pub power: PowerId,
    /// Tick the activation was evaluated at.
    pub at: Tick,
    pub outcome: Activation,
}

impl ActivationReport {
    pub fn fired(&self) -> bool {
        self.outcome.fired()
    }
}

/// Read-only view of the worker's state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeSnapshot {
    pub now: Tick,
    pub active_tasks: usize,
    pub cooldown_records: usize,
    pub powers: Vec<(PowerId, &'static str)>,
    pub world: WorldStats,
}
