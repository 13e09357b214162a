use crate::definition::{ActionId, MaskId};
use crate::resolve::{ActionOutcome, CompanionOutcome, EffectLog};
use crate::state::Side;

/// What the acting side wants to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    UseAction(ActionId),
    ChangeMask(MaskId),
    EndTurn,
}

impl Command {
    pub fn use_action(action: impl Into<ActionId>) -> Self {
        Self::UseAction(action.into())
    }

    pub fn change_mask(mask: impl Into<MaskId>) -> Self {
        Self::ChangeMask(mask.into())
    }
}

/// A completed mask switch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskChange {
    pub side: Side,
    pub from: MaskId,
    pub to: MaskId,
    pub ap_spent: u32,
    /// AP lost to the new mask's inertia.
    pub inertia: u32,
    pub ap_remaining: u32,
}

/// Result of an accepted command.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandOutcome {
    Action(ActionOutcome),
    MaskChanged(MaskChange),
    TurnEnded,
}

/// Terminal output of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    /// `None` when both fighters fell to the same resolution.
    pub winner: Option<Side>,
    pub turns: u32,
}

/// Opening of a turn: purge of statuses already at zero, AP grant,
/// start-of-turn ticks and the companion strike.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOpening {
    pub side: Side,
    pub turn_number: u32,
    pub ap: u32,
    pub tick_damage: u32,
    pub companion: Option<CompanionOutcome>,
    pub effects: EffectLog,
    pub result: Option<BattleResult>,
}

/// Closing of a turn: turn-end passive, ticks and status expiry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnClosing {
    pub side: Side,
    pub tick_damage: u32,
    /// The command limit ended this turn.
    pub forced: bool,
    pub effects: EffectLog,
    pub result: Option<BattleResult>,
}
