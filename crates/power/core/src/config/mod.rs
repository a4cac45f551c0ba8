//! Power configuration and engine tunables.
//!
//! Persisted power settings are read from and written to a key-value
//! [`ConfigSection`] owned by the host. Key names and defaults are part of
//! the persisted format and must not change.
mod error;
mod powers;
mod section;

pub use error::ConfigError;
pub use powers::{AoeConfig, RainbowConfig};
pub use section::{ConfigSection, MemorySection, SectionValue};

/// Which default to use for an AOE duration missing from a section.
///
/// Sections written before the in-code default changed expect 60 ticks when
/// the key is absent, while freshly constructed configs start at 15. The
/// choice is left to the host instead of silently picking one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadDefaults {
    pub aoe_duration: u32,
}

impl LoadDefaults {
    /// Matches sections persisted by existing installations.
    pub const LEGACY: Self = Self {
        aoe_duration: AoeConfig::LOAD_DEFAULT_DURATION,
    };

    /// Matches [`AoeConfig::default`].
    pub const PROGRAMMATIC: Self = Self {
        aoe_duration: AoeConfig::DEFAULT_DURATION,
    };
}

impl Default for LoadDefaults {
    fn default() -> Self {
        Self::LEGACY
    }
}

/// Engine tunables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Real-time length of one tick when the runtime drives its own clock.
    pub tick_period_ms: u64,
    /// Period of the transient cleanup task.
    pub animation_period_ticks: u64,
    /// Height above the actor's feet at which transients spawn.
    pub transient_lift: f64,
    /// Fixed seed for reproducible sessions; random when absent.
    pub rng_seed: Option<u64>,
    pub load_defaults: LoadDefaults,
}

impl EngineConfig {
    pub const DEFAULT_TICK_PERIOD_MS: u64 = 50;
    pub const DEFAULT_ANIMATION_PERIOD_TICKS: u64 = 5;
    pub const DEFAULT_TRANSIENT_LIFT: f64 = 1.8;

    pub fn new() -> Self {
        Self {
            tick_period_ms: Self::DEFAULT_TICK_PERIOD_MS,
            animation_period_ticks: Self::DEFAULT_ANIMATION_PERIOD_TICKS,
            transient_lift: Self::DEFAULT_TRANSIENT_LIFT,
            rng_seed: None,
            load_defaults: LoadDefaults::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
