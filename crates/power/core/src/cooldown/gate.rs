//! Cooldown and consumption gate.

use std::sync::Arc;

use tracing::debug;

use crate::cooldown::{CooldownKey, CooldownStore};
use crate::state::{EntityId, PowerId, Tick};

/// Outcome of a gate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Cooldown elapsed and the charge was paid; the record now holds `now`.
    Passed,
    /// Still cooling down. Nothing was charged or recorded.
    CoolingDown { remaining: u64 },
    /// Cooldown elapsed but the actor could not pay. The record is untouched,
    /// so a retry only needs to re-check the charge.
    ChargeFailed,
}

impl GateDecision {
    pub fn is_passed(self) -> bool {
        matches!(self, GateDecision::Passed)
    }
}

/// Decides whether an actor may fire a power right now.
#[derive(Clone)]
pub struct CooldownGate {
    store: Arc<dyn CooldownStore>,
}

impl CooldownGate {
    pub fn new(store: Arc<dyn CooldownStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CooldownStore> {
        &self.store
    }

    /// Checks the cooldown, then the charge, then records the use.
    ///
    /// A missing record counts as an infinitely old use, and a cooldown of
    /// zero always passes the time check. `charge` runs only once the
    /// cooldown has elapsed, and the whole sequence happens while the record
    /// for `(actor, power)` is held exclusively.
    pub fn try_consume(
        &self,
        actor: EntityId,
        power: PowerId,
        cooldown_ticks: u64,
        now: Tick,
        charge: impl FnOnce() -> bool,
    ) -> GateDecision {
        let key = CooldownKey::new(actor, power);
        let mut charge = Some(charge);
        let mut decision = GateDecision::ChargeFailed;

        self.store.update(key, &mut |slot| {
            if let Some(last) = *slot {
                let elapsed = now.elapsed_since(last);
                if elapsed < cooldown_ticks {
                    decision = GateDecision::CoolingDown {
                        remaining: cooldown_ticks - elapsed,
                    };
                    return false;
                }
            }

            let paid = charge.take().is_some_and(|charge| charge());
            if !paid {
                decision = GateDecision::ChargeFailed;
                return false;
            }

            *slot = Some(now);
            decision = GateDecision::Passed;
            true
        });

        if !decision.is_passed() {
            debug!(%actor, %power, tick = %now, ?decision, "power gate rejected activation");
        }
        decision
    }
}

impl core::fmt::Debug for CooldownGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CooldownGate")
            .field("records", &self.store.len())
            .finish()
    }
}
