//! Action catalog loader.
//!
//! RON format: `Vec<ActionSpec>`. Statuses to apply are referenced by
//! status id and resolved against the status catalog by [`crate::Catalog`];
//! removal and conditions match on the status type alone.

use std::path::Path;

use battle_core::{ActionCategory, ActionFlags, ActionId, StatusId, StatusType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Authored form of a conditional damage bonus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionalSpec {
    pub required: StatusType,
    pub multiplier: f32,
    #[serde(default)]
    pub debuff_on_fail: Option<StatusId>,
}

/// Authored form of the optional action modifiers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierSpec {
    /// Statuses stripped from the target before the main effect.
    pub remove_statuses: Vec<StatusType>,
    /// Shortens `remove_statuses` by this many turns instead of removing them.
    pub reduce_status_by: Option<u32>,
    pub secondary_status: Option<StatusId>,
    pub conditional: Option<ConditionalSpec>,
    pub self_status: Option<StatusId>,
    pub ap_gain: Option<u32>,
    pub guard_multiplier: Option<f32>,
    pub reactive_guard_status: Option<StatusId>,
    pub last_action_multiplier: Option<f32>,
    pub first_turn_multiplier: Option<f32>,
}

/// Authored action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub id: ActionId,
    #[serde(default)]
    pub name: Option<String>,
    pub category: ActionCategory,
    #[serde(default = "default_ap_cost")]
    pub ap_cost: u32,
    #[serde(default)]
    pub mp_cost: u32,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub magical: bool,
    #[serde(default)]
    pub healing: bool,
    #[serde(default)]
    pub targets_self: bool,
    #[serde(default)]
    pub grants_guard: bool,
    #[serde(default)]
    pub grants_counter: bool,
    #[serde(default)]
    pub inflicts: Option<StatusId>,
    #[serde(default)]
    pub enhanced_counter: Option<f32>,
    #[serde(default)]
    pub modifiers: ModifierSpec,
}

fn default_ap_cost() -> u32 {
    1
}

impl ActionSpec {
    pub fn flags(&self) -> ActionFlags {
        let mut flags = ActionFlags::empty();
        flags.set(ActionFlags::MAGICAL, self.magical);
        flags.set(ActionFlags::HEALING, self.healing);
        flags.set(ActionFlags::TARGETS_SELF, self.targets_self);
        flags.set(ActionFlags::GRANTS_GUARD, self.grants_guard);
        flags.set(ActionFlags::GRANTS_COUNTER, self.grants_counter);
        flags
    }
}

pub struct ActionLoader;

impl ActionLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<ActionSpec>> {
        parse_ron(content, "action catalog")
    }

    pub fn load(path: &Path) -> LoadResult<Vec<ActionSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
