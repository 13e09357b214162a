use battle_core::{BattleResult, Command, CommandOutcome, Side, TurnClosing, TurnOpening};
use serde::{Deserialize, Serialize};

use super::bus::Topic;

/// Everything the runtime reports while driving a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        first: Side,
        player: String,
        enemy: String,
    },
    TurnOpened(TurnOpening),
    CommandResolved {
        side: Side,
        command: Command,
        outcome: CommandOutcome,
    },
    /// The command was refused and the battle left untouched.
    CommandRejected {
        side: Side,
        command: Command,
        code: String,
        reason: String,
    },
    TurnClosed(TurnClosing),
    Ended(BattleResult),
}

impl BattleEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BattleEvent::Started { .. } | BattleEvent::Ended(_) => Topic::Battle,
            BattleEvent::TurnOpened(_) | BattleEvent::TurnClosed(_) => Topic::Turn,
            BattleEvent::CommandResolved { .. } | BattleEvent::CommandRejected { .. } => {
                Topic::Command
            }
        }
    }
}
