use std::sync::Arc;

use super::action::ActionDefinition;
use super::ids::{ActionId, MaskId};
use super::status::{StatusDefinition, StatusType};
use crate::stats::StatMultiplier;

/// Passive ability carried by a mask.
///
/// Each kind answers a subset of the hooks in [`crate::passive`]; all other
/// hooks are no-ops for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    #[default]
    None,
    /// Every status received lasts one turn less.
    StatusShorten,
    /// Chance to bounce a received status back onto its source.
    StatusReflect,
    /// Control statuses received last one turn less.
    ControlResist,
    /// Control actions cost one AP less while the opponent is exhausted.
    ExhaustedDiscount,
    /// First action each turn costs one AP less; three or more actions exhaust.
    FirstActionDiscount,
    /// Physical damage bonus against bleeding targets.
    BleedHunter,
    /// Magical bonus against exposed targets, extra damage taken while exposed.
    ExposeSynergy,
    /// Bonus on the first attack of the battle.
    FirstStrike,
    /// Reduction on the first physical hit received each turn.
    PhysicalGuard,
    /// Follow-up when a counter lands.
    CounterFollowUp,
    /// Once per battle below 20% HP: auto-guard and stop bleeding.
    LastStand,
    /// Heals at turn end while the opponent burns.
    BurnLeech,
}

/// Immutable mask definition.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskDefinition {
    pub id: MaskId,
    pub name: String,
    pub multiplier: StatMultiplier,
    pub vulnerability: Option<StatusType>,
    pub actions: Vec<Arc<ActionDefinition>>,
    pub passive: PassiveKind,
    /// Turns before another change is allowed after switching into this mask.
    pub change_cooldown: u32,
    /// Forbids changing away from this mask right after a change.
    pub disallow_consecutive_change: bool,
    /// AP removed immediately after switching into this mask.
    pub inertia: Option<u32>,
    pub ap_bonus: u32,
}

impl MaskDefinition {
    pub fn new(id: impl Into<MaskId>) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            multiplier: StatMultiplier::ONE,
            vulnerability: None,
            actions: Vec::new(),
            passive: PassiveKind::None,
            change_cooldown: 0,
            disallow_consecutive_change: false,
            inertia: None,
            ap_bonus: 0,
        }
    }

    pub fn with_multiplier(mut self, multiplier: StatMultiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_action(mut self, action: Arc<ActionDefinition>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_passive(mut self, passive: PassiveKind) -> Self {
        self.passive = passive;
        self
    }

    pub fn with_vulnerability(mut self, vulnerability: StatusType) -> Self {
        self.vulnerability = Some(vulnerability);
        self
    }

    pub fn with_ap_bonus(mut self, ap_bonus: u32) -> Self {
        self.ap_bonus = ap_bonus;
        self
    }

    pub fn with_change_rules(mut self, cooldown: u32, disallow_consecutive: bool) -> Self {
        self.change_cooldown = cooldown;
        self.disallow_consecutive_change = disallow_consecutive;
        self
    }

    pub fn with_inertia(mut self, penalty: u32) -> Self {
        self.inertia = Some(penalty);
        self
    }

    pub fn action(&self, id: &ActionId) -> Option<&Arc<ActionDefinition>> {
        self.actions.iter().find(|action| &action.id == id)
    }

    /// Multiplier of the first enhanced-counter action, if any.
    pub fn enhanced_counter(&self) -> Option<f32> {
        self.actions.iter().find_map(|action| action.enhanced_counter)
    }

    /// Status applied onto physical attackers while this mask guards.
    pub fn reactive_guard_status(&self) -> Option<&Arc<StatusDefinition>> {
        self.actions
            .iter()
            .find_map(|action| action.modifiers.reactive_guard_status.as_ref())
    }

    /// Reactive status of the enhanced-counter action, used by the counter follow-up.
    pub fn counter_follow_up_status(&self) -> Option<&Arc<StatusDefinition>> {
        self.actions
            .iter()
            .filter(|action| action.enhanced_counter.is_some())
            .find_map(|action| action.modifiers.reactive_guard_status.as_ref())
    }
}
