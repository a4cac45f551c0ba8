//! Configuration errors.

use crate::error::{ErrorSeverity, PowerError};

/// A power section could not be turned into a working power.
///
/// These are the only errors the power layer surfaces to its caller; the
/// loader must report them rather than drop the power silently.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown effect kind '{0}'")]
    UnknownEffectKind(String),

    #[error("unknown power '{0}'")]
    UnknownPower(String),

    #[error("key '{key}' must be {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, expected: &'static str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            expected,
        }
    }
}

impl PowerError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::UnknownEffectKind(_) => "CONFIG_UNKNOWN_EFFECT_KIND",
            ConfigError::UnknownPower(_) => "CONFIG_UNKNOWN_POWER",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
        }
    }
}
