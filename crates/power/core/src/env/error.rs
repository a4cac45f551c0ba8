//! Collaborator access errors.

use crate::error::{ErrorSeverity, PowerError};
use crate::state::{BlockPos, EntityId};

/// A required collaborator was not supplied to [`super::PowerEnv`].
///
/// These are fatal for the activation that hit them: nothing can fire
/// without a world or a scheduler to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("WorldOracle not available")]
    WorldNotAvailable,

    #[error("StatusSink not available")]
    EffectsNotAvailable,

    #[error("ResourceLedger not available")]
    LedgerNotAvailable,

    #[error("Scheduler not available")]
    SchedulerNotAvailable,
}

impl PowerError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            WorldNotAvailable => "ORACLE_WORLD_NOT_AVAILABLE",
            EffectsNotAvailable => "ORACLE_EFFECTS_NOT_AVAILABLE",
            LedgerNotAvailable => "ORACLE_LEDGER_NOT_AVAILABLE",
            SchedulerNotAvailable => "ORACLE_SCHEDULER_NOT_AVAILABLE",
        }
    }
}

/// Failures reported by the host world for a single operation.
///
/// All variants are recoverable: callers skip the affected target or block
/// and carry on with the rest of the work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The entity despawned between selection and use.
    #[error("entity {0} no longer exists")]
    TargetVanished(EntityId),

    /// The block changed concurrently or could not be read.
    #[error("block at {0:?} is in an inconsistent state")]
    Inconsistent(BlockPos),

    /// The host refused to spawn a transient entity.
    #[error("transient spawn rejected at {0:?}")]
    SpawnRejected(BlockPos),
}

impl PowerError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            WorldError::TargetVanished(_) => "WORLD_TARGET_VANISHED",
            WorldError::Inconsistent(_) => "WORLD_INCONSISTENT",
            WorldError::SpawnRejected(_) => "WORLD_SPAWN_REJECTED",
        }
    }
}
