//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the scheduler, the cooldown gate and the
//! configured powers, and serves every command on one sequential timeline.

mod simulation;

pub use simulation::{Command, SimulationWorker};
