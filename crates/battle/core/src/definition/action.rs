use std::sync::Arc;

use bitflags::bitflags;

use super::ids::ActionId;
use super::status::{StatusDefinition, StatusType};

/// Broad category of an action. Counters only answer `Attack`, and
/// defense-disabling statuses block `Defense`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionCategory {
    Attack,
    Defense,
    Control,
    Other,
}

bitflags! {
    /// Boolean traits of an action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct ActionFlags: u8 {
        const MAGICAL        = 1 << 0;
        const HEALING        = 1 << 1;
        const TARGETS_SELF   = 1 << 2;
        const GRANTS_GUARD   = 1 << 3;
        const GRANTS_COUNTER = 1 << 4;
    }
}

/// Strip or shorten statuses before the action's main effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusRemoval {
    pub kinds: Vec<StatusType>,
    /// `None` removes the listed statuses outright.
    pub reduce_by: Option<u32>,
}

/// Damage bonus that only applies while the target carries a status.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalBonus {
    pub required: StatusType,
    pub multiplier: f32,
    /// Applied to the actor when the target lacks `required`.
    pub debuff_on_fail: Option<Arc<StatusDefinition>>,
}

/// Orthogonal optional modifiers. Each one is checked independently by the
/// resolver and any subset may be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionModifiers {
    pub status_removal: Option<StatusRemoval>,
    pub secondary_status: Option<Arc<StatusDefinition>>,
    pub conditional: Option<ConditionalBonus>,
    pub self_status: Option<Arc<StatusDefinition>>,
    pub ap_gain: Option<u32>,
    pub guard_multiplier: Option<f32>,
    /// Applied onto a physical attacker while the mask owning this action guards.
    pub reactive_guard_status: Option<Arc<StatusDefinition>>,
    pub last_action_multiplier: Option<f32>,
    pub first_turn_multiplier: Option<f32>,
}

/// Immutable action definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: String,
    pub category: ActionCategory,
    pub ap_cost: u32,
    pub mp_cost: u32,
    pub power: u32,
    pub flags: ActionFlags,
    pub inflicts: Option<Arc<StatusDefinition>>,
    /// Counter multiplier used while the owning mask is equipped.
    pub enhanced_counter: Option<f32>,
    pub modifiers: ActionModifiers,
}

impl ActionDefinition {
    pub fn new(id: impl Into<ActionId>, category: ActionCategory) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            category,
            ap_cost: 1,
            mp_cost: 0,
            power: 0,
            flags: ActionFlags::empty(),
            inflicts: None,
            enhanced_counter: None,
            modifiers: ActionModifiers::default(),
        }
    }

    pub fn with_cost(mut self, ap_cost: u32, mp_cost: u32) -> Self {
        self.ap_cost = ap_cost;
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_flags(mut self, flags: ActionFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn inflicting(mut self, status: Arc<StatusDefinition>) -> Self {
        self.inflicts = Some(status);
        self
    }

    pub fn with_enhanced_counter(mut self, multiplier: f32) -> Self {
        self.enhanced_counter = Some(multiplier);
        self
    }

    pub fn with_modifiers(mut self, modifiers: ActionModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_magical(&self) -> bool {
        self.flags.contains(ActionFlags::MAGICAL)
    }

    pub fn is_healing(&self) -> bool {
        self.flags.contains(ActionFlags::HEALING)
    }

    pub fn targets_self(&self) -> bool {
        self.flags.contains(ActionFlags::TARGETS_SELF)
    }

    pub fn grants_guard(&self) -> bool {
        self.flags.contains(ActionFlags::GRANTS_GUARD)
    }

    pub fn grants_counter(&self) -> bool {
        self.flags.contains(ActionFlags::GRANTS_COUNTER)
    }

    /// Type of the primary inflicted status.
    pub fn inflicts_kind(&self) -> Option<StatusType> {
        self.inflicts.as_ref().map(|status| status.kind)
    }
}
