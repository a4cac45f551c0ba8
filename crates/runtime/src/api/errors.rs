//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and missing collaborators so
//! clients can bubble them up with consistent context.
use power_core::{ErrorSeverity, OracleError, PowerError, PowerId, Trigger};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("no power registered as {0}")]
    UnknownPower(PowerId),

    #[error("power {0} registered twice")]
    DuplicatePower(PowerId),

    #[error("{power} does not react to {trigger}")]
    TriggerNotHandled { power: PowerId, trigger: Trigger },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl PowerError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownPower(_) | Self::DuplicatePower(_) | Self::TriggerNotHandled { .. } => {
                ErrorSeverity::Validation
            }
            Self::Oracle(err) => err.severity(),
            Self::WorkerJoin(_) => ErrorSeverity::Internal,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::UnknownPower(_) => "RUNTIME_UNKNOWN_POWER",
            Self::DuplicatePower(_) => "RUNTIME_DUPLICATE_POWER",
            Self::TriggerNotHandled { .. } => "RUNTIME_TRIGGER_NOT_HANDLED",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
