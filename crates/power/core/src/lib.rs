//! Item power rules shared by every host.
//!
//! `power-core` defines the activation gate, area targeting, timed effect
//! application and the tick-driven transient animation used by item powers.
//! Everything the rules need from the host (world queries, effect sinks,
//! resource ledgers, the scheduler) is reached through the traits in [`env`],
//! so the crate stays free of I/O and can be exercised with plain unit tests.
pub mod animation;
pub mod config;
pub mod cooldown;
pub mod effect;
pub mod env;
pub mod error;
pub mod power;
pub mod state;
pub mod targeting;

#[cfg(test)]
pub(crate) mod test_support;

pub use animation::{
    AnimationState, AnimationTicker, LaunchPoint, StepOutcome, TickerPhase, TransientMatcher,
};
pub use config::{
    ConfigError, ConfigSection, EngineConfig, LoadDefaults, MemorySection, SectionValue,
};
pub use cooldown::{CooldownGate, CooldownKey, CooldownStore, GateDecision, InMemoryCooldownStore};
pub use effect::{
    ApplyReport, BuiltinEffectKinds, EffectApplicator, EffectDescriptor, EffectKind,
    EffectKindResolver,
};
pub use env::{
    Cosmetic, OracleError, PcgRng, PowerEnv, PowerRng, RepeatingTask, ResourceLedger, Scheduler,
    SoundKind, StatusSink, TickContext, TransientStatus, WorldError, WorldOracle,
};
pub use error::{ErrorSeverity, PowerError};
pub use power::{
    Activation, ActivationContext, AoeConfig, AoePower, DescriptionArg, Power, PowerDescription,
    PowerKind, RainbowConfig, RainbowPower, Trigger,
};
pub use state::{
    BlockPos, EntityId, Location, Material, PowerId, TaskHandle, Tick, TransientHandle, Vec3,
    WoolColor,
};
pub use targeting::AreaTargetSelector;
