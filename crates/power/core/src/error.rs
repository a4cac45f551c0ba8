//! Common error infrastructure for power-core.
//!
//! Domain-specific errors (`ConfigError`, `WorldError`, `OracleError`) live
//! next to the code that raises them. This module provides the severity scale
//! and the trait they all implement.
//!
//! Most failures in the activation and animation paths never propagate: a
//! vanished target or an inconsistent block is logged and skipped. Only
//! configuration resolution and missing collaborators reach the caller.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: skipped locally, the surrounding operation continues
/// - **Validation**: invalid input that must be fixed before retrying
/// - **Internal**: unexpected state inconsistency worth investigating
/// - **Fatal**: the operation cannot run at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Skip and continue.
    ///
    /// Examples: effect target despawned, block changed underneath the animation
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown effect kind in a power file
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: the simulation worker panicked
    Internal,

    /// Cannot continue.
    ///
    /// Examples: a required collaborator was never supplied
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all power-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable upper-snake identifier from `error_code`
pub trait PowerError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::env::{OracleError, WorldError};
    use crate::state::{BlockPos, EntityId};

    #[test]
    fn world_errors_are_recoverable() {
        let vanished = WorldError::TargetVanished(EntityId(3));
        let inconsistent = WorldError::Inconsistent(BlockPos::new(1, 64, 1));

        assert_eq!(vanished.severity(), ErrorSeverity::Recoverable);
        assert_eq!(inconsistent.severity(), ErrorSeverity::Recoverable);
        assert_eq!(vanished.error_code(), "WORLD_TARGET_VANISHED");
        assert_eq!(inconsistent.error_code(), "WORLD_INCONSISTENT");
    }

    #[test]
    fn config_errors_are_validation() {
        let errors = [
            ConfigError::UnknownEffectKind("WITHERING".into()),
            ConfigError::UnknownPower("blink".into()),
            ConfigError::InvalidValue {
                key: "range".into(),
                expected: "an integer",
            },
        ];
        for error in &errors {
            assert_eq!(error.severity(), ErrorSeverity::Validation);
            assert!(!error.severity().is_internal());
        }
        assert_eq!(errors[1].error_code(), "CONFIG_UNKNOWN_POWER");
    }

    #[test]
    fn missing_collaborators_are_fatal() {
        let error = OracleError::SchedulerNotAvailable;
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
        assert!(error.severity().is_internal());
        assert_eq!(error.severity().as_str(), "fatal");
    }
}
