//! Traits describing the host collaborators a power calls into.
//!
//! The world, the status-effect sink, the resource ledger and the scheduler
//! are owned by the host. The [`PowerEnv`] aggregate bundles them so the
//! activation code can reach everything it needs without hard coupling to
//! concrete implementations.
mod error;
mod rng;
mod scheduler;
mod sinks;
mod world;

pub use error::{OracleError, WorldError};
pub use rng::{PcgRng, PowerRng};
pub use scheduler::{RepeatingTask, Scheduler, TickContext};
pub use sinks::{ResourceLedger, StatusSink};
pub use world::{Cosmetic, SoundKind, TransientStatus, WorldOracle};

/// Aggregates the host collaborators required by power activation.
#[derive(Clone, Copy)]
pub struct PowerEnv<'a> {
    world: Option<&'a dyn WorldOracle>,
    effects: Option<&'a dyn StatusSink>,
    ledger: Option<&'a dyn ResourceLedger>,
    scheduler: Option<&'a dyn Scheduler>,
}

impl<'a> PowerEnv<'a> {
    pub fn new(
        world: Option<&'a dyn WorldOracle>,
        effects: Option<&'a dyn StatusSink>,
        ledger: Option<&'a dyn ResourceLedger>,
        scheduler: Option<&'a dyn Scheduler>,
    ) -> Self {
        Self {
            world,
            effects,
            ledger,
            scheduler,
        }
    }

    pub fn with_all(
        world: &'a dyn WorldOracle,
        effects: &'a dyn StatusSink,
        ledger: &'a dyn ResourceLedger,
        scheduler: &'a dyn Scheduler,
    ) -> Self {
        Self::new(Some(world), Some(effects), Some(ledger), Some(scheduler))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None)
    }

    /// Returns the world oracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::WorldNotAvailable` if no world was provided.
    pub fn world(&self) -> Result<&'a dyn WorldOracle, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    /// Returns the status-effect sink, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EffectsNotAvailable` if no sink was provided.
    pub fn effects(&self) -> Result<&'a dyn StatusSink, OracleError> {
        self.effects.ok_or(OracleError::EffectsNotAvailable)
    }

    /// Returns the resource ledger, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LedgerNotAvailable` if no ledger was provided.
    pub fn ledger(&self) -> Result<&'a dyn ResourceLedger, OracleError> {
        self.ledger.ok_or(OracleError::LedgerNotAvailable)
    }

    /// Returns the scheduler, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SchedulerNotAvailable` if no scheduler was provided.
    pub fn scheduler(&self) -> Result<&'a dyn Scheduler, OracleError> {
        self.scheduler.ok_or(OracleError::SchedulerNotAvailable)
    }
}

impl core::fmt::Debug for PowerEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PowerEnv")
            .field("world", &self.world.is_some())
            .field("effects", &self.effects.is_some())
            .field("ledger", &self.ledger.is_some())
            .field("scheduler", &self.scheduler.is_some())
            .finish()
    }
}
