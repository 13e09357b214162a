use std::sync::Arc;

use crate::definition::{ActionCategory, ActionDefinition, MaskDefinition};

/// Allied helper bound to one side for the whole battle.
///
/// It acts outside the AP economy: every owner turn advances its counter and
/// once the counter reaches the rolled interval it strikes and re-rolls.
#[derive(Clone, Debug, PartialEq)]
pub struct Companion {
    mask: Arc<MaskDefinition>,
    turns_since_attack: u32,
    next_interval: u32,
}

impl Companion {
    pub fn new(mask: Arc<MaskDefinition>, first_interval: u32) -> Self {
        Self {
            mask,
            turns_since_attack: 0,
            next_interval: first_interval,
        }
    }

    pub fn mask(&self) -> &Arc<MaskDefinition> {
        &self.mask
    }

    pub fn turns_since_attack(&self) -> u32 {
        self.turns_since_attack
    }

    pub fn next_interval(&self) -> u32 {
        self.next_interval
    }

    pub fn on_owner_turn_start(&mut self) {
        self.turns_since_attack = self.turns_since_attack.saturating_add(1);
    }

    pub fn should_attack(&self) -> bool {
        self.turns_since_attack >= self.next_interval
    }

    pub fn reset_after_attack(&mut self, next_interval: u32) {
        self.turns_since_attack = 0;
        self.next_interval = next_interval;
    }

    /// Owner turns left before the next strike.
    pub fn turns_until_attack(&self) -> u32 {
        self.next_interval.saturating_sub(self.turns_since_attack)
    }

    /// First status-inflicting non-healing action, else the first attack
    /// with positive power.
    pub fn choose_action(&self) -> Option<&Arc<ActionDefinition>> {
        self.mask
            .actions
            .iter()
            .find(|action| action.inflicts.is_some() && !action.is_healing())
            .or_else(|| {
                self.mask
                    .actions
                    .iter()
                    .find(|action| action.category == ActionCategory::Attack && action.power > 0)
            })
    }
}
