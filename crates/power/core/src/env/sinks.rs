//! Effect and resource collaborators.

use crate::effect::EffectDescriptor;
use crate::env::WorldError;
use crate::state::EntityId;

/// Receives timed status effects.
pub trait StatusSink: Send + Sync {
    /// Applies `effect` to `target`.
    ///
    /// # Errors
    ///
    /// Returns `WorldError::TargetVanished` if the target no longer exists.
    fn apply_effect(&self, target: EntityId, effect: &EffectDescriptor) -> Result<(), WorldError>;
}

/// Pays the resource cost of an activation.
pub trait ResourceLedger: Send + Sync {
    /// Atomically checks that `actor` can pay `amount` and deducts it.
    ///
    /// Returns `false` without deducting anything when the actor cannot pay.
    fn try_charge(&self, actor: EntityId, amount: i32) -> bool;
}
