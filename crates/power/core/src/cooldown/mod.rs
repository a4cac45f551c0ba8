//! Per-actor, per-power activation gate.
//!
//! [`CooldownGate`] is the single authority deciding whether a power fires.
//! It owns an injected [`CooldownStore`] instead of reaching for global
//! state, so hosts choose the storage and tests get a fresh one per case.
mod gate;
mod store;

pub use gate::{CooldownGate, GateDecision};
pub use store::{CooldownKey, CooldownStore, InMemoryCooldownStore};
