use std::sync::Arc;

use battle_core::{ActionDefinition, ActionId, AiProfile, Battle, Command, MaskId, Side};

/// Snapshot of what the acting fighter may legally do right now.
///
/// Legality is computed up front through [`Battle::can_change_mask`] and
/// [`Battle::can_use_action`], so tree leaves never touch the battle.
#[derive(Debug, Clone)]
pub struct Blackboard {
    hp_ratio: f32,
    guard_turn: bool,
    switchable: Vec<MaskId>,
    usable: Vec<Arc<ActionDefinition>>,
    decision: Option<Command>,
}

impl Blackboard {
    pub fn observe(battle: &Battle, side: Side, profile: &AiProfile) -> Self {
        let fighter = battle.fighter(side);
        let switchable = fighter
            .masks()
            .iter()
            .filter(|mask| battle.can_change_mask(side, &mask.id).is_ok())
            .map(|mask| mask.id.clone())
            .collect();
        let usable = fighter
            .mask()
            .actions
            .iter()
            .filter_map(|action| battle.can_use_action(side, &action.id).ok())
            .collect();

        Self {
            hp_ratio: fighter.hp_ratio(),
            guard_turn: profile.is_guard_turn(battle.context().turn_number()),
            switchable,
            usable,
            decision: None,
        }
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp_ratio
    }

    /// Guard-granting actions are allowed on this turn.
    pub fn is_guard_turn(&self) -> bool {
        self.guard_turn
    }

    pub fn can_switch_to(&self, mask: &MaskId) -> bool {
        self.switchable.contains(mask)
    }

    /// Usable now and, for guard-granting actions, on cadence.
    pub fn may_use(&self, action: &ActionId) -> bool {
        self.usable
            .iter()
            .find(|definition| &definition.id == action)
            .is_some_and(|definition| self.guard_turn || !definition.grants_guard())
    }

    pub fn decide(&mut self, command: Command) {
        self.decision = Some(command);
    }

    pub fn decision(&self) -> Option<&Command> {
        self.decision.as_ref()
    }

    /// The committed command, or `EndTurn` when nothing fired.
    pub fn into_decision(self) -> Command {
        self.decision.unwrap_or(Command::EndTurn)
    }
}
