use crate::definition::{ActionId, MaskId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::Side;

/// Spendable resource named by [`CommandError::InsufficientResources`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    #[strum(serialize = "AP")]
    Ap,
    #[strum(serialize = "MP")]
    Mp,
}

/// Why a command was rejected. Rejection never mutates the battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("not enough {resource}: need {required}, have {available}")]
    InsufficientResources {
        resource: Resource,
        required: u32,
        available: u32,
    },

    #[error("action `{action}` is not offered by the current mask")]
    ActionNotAvailable { action: ActionId },

    #[error("mask change on cooldown for {turns} more turn(s)")]
    MaskOnCooldown { turns: u32 },

    #[error("current mask forbids changing again right after a change")]
    ConsecutiveChangeBlocked,

    #[error("silenced: magical actions are blocked")]
    Silenced,

    #[error("defense actions are disabled")]
    DefenseDisabled,

    #[error("mask `{mask}` is not available to this fighter")]
    MaskNotAvailable { mask: MaskId },

    #[error("mask `{mask}` is already equipped")]
    MaskAlreadyEquipped { mask: MaskId },

    #[error("mask already changed this turn")]
    MaskAlreadyChanged,
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        use CommandError::*;
        match self {
            InsufficientResources { .. } | MaskOnCooldown { .. } | MaskAlreadyChanged => {
                ErrorSeverity::Recoverable
            }
            ConsecutiveChangeBlocked | Silenced | DefenseDisabled => ErrorSeverity::Recoverable,
            ActionNotAvailable { .. } | MaskNotAvailable { .. } | MaskAlreadyEquipped { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            InsufficientResources { .. } => "COMMAND_INSUFFICIENT_RESOURCES",
            ActionNotAvailable { .. } => "COMMAND_ACTION_NOT_AVAILABLE",
            MaskOnCooldown { .. } => "COMMAND_MASK_ON_COOLDOWN",
            ConsecutiveChangeBlocked => "COMMAND_CONSECUTIVE_CHANGE_BLOCKED",
            Silenced => "COMMAND_SILENCED",
            DefenseDisabled => "COMMAND_DEFENSE_DISABLED",
            MaskNotAvailable { .. } => "COMMAND_MASK_NOT_AVAILABLE",
            MaskAlreadyEquipped { .. } => "COMMAND_MASK_ALREADY_EQUIPPED",
            MaskAlreadyChanged => "COMMAND_MASK_ALREADY_CHANGED",
        }
    }
}

/// Misuse of the battle state machine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("battle has not started")]
    NotStarted,

    #[error("battle has already started")]
    AlreadyStarted,

    #[error("no turn is in progress")]
    TurnNotInProgress,

    #[error("{0} is still taking a turn")]
    TurnInProgress(Side),

    #[error("turn already ended; close it before submitting more commands")]
    TurnAlreadyEnded,

    #[error("command limit of {0} reached this turn")]
    CommandLimitReached(u32),

    #[error("battle is over")]
    BattleOver,

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            Command(error) => error.severity(),
            CommandLimitReached(_) | TurnAlreadyEnded => ErrorSeverity::Recoverable,
            NotStarted | AlreadyStarted | TurnNotInProgress | TurnInProgress(_) | BattleOver => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            NotStarted => "BATTLE_NOT_STARTED",
            AlreadyStarted => "BATTLE_ALREADY_STARTED",
            TurnNotInProgress => "BATTLE_TURN_NOT_IN_PROGRESS",
            TurnInProgress(_) => "BATTLE_TURN_IN_PROGRESS",
            TurnAlreadyEnded => "BATTLE_TURN_ALREADY_ENDED",
            CommandLimitReached(_) => "BATTLE_COMMAND_LIMIT_REACHED",
            BattleOver => "BATTLE_OVER",
            Command(error) => error.error_code(),
        }
    }
}
