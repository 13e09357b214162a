//! Errors surfaced by the battle runtime.
use battle_core::{BattleError, ErrorSeverity, GameError, Side};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no command provider set for {side}")]
    ProviderNotSet { side: Side },

    #[error("command channel for {side} closed")]
    ProviderChannelClosed { side: Side },

    #[error("battle did not finish within {0} turns")]
    TurnLimitReached(u32),

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    #[error(transparent)]
    Battle(#[from] BattleError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Battle(error) => error.severity(),
            RuntimeError::ProviderNotSet { .. } | RuntimeError::InvalidConfig { .. } => {
                ErrorSeverity::Validation
            }
            RuntimeError::ProviderChannelClosed { .. } | RuntimeError::TurnLimitReached(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            RuntimeError::ProviderChannelClosed { .. } => "RUNTIME_PROVIDER_CHANNEL_CLOSED",
            RuntimeError::TurnLimitReached(_) => "RUNTIME_TURN_LIMIT_REACHED",
            RuntimeError::InvalidConfig { .. } => "RUNTIME_INVALID_CONFIG",
            RuntimeError::Battle(error) => error.error_code(),
        }
    }
}
