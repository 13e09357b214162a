use std::sync::Arc;

use super::ids::{ActionId, MaskId};
use super::mask::MaskDefinition;
use crate::stats::StatBlock;

/// Everything needed to put a fighter into a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct FighterProfile {
    pub name: String,
    pub stats: StatBlock,
    pub starting_mask: Arc<MaskDefinition>,
    /// Masks the fighter may switch between. Always contains the starting mask.
    pub masks: Vec<Arc<MaskDefinition>>,
}

impl FighterProfile {
    pub fn new(
        name: impl Into<String>,
        stats: StatBlock,
        starting_mask: Arc<MaskDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            stats,
            masks: vec![Arc::clone(&starting_mask)],
            starting_mask,
        }
    }

    pub fn with_mask(mut self, mask: Arc<MaskDefinition>) -> Self {
        if !self.masks.iter().any(|known| known.id == mask.id) {
            self.masks.push(mask);
        }
        self
    }
}

/// One line of an AI rule list. References are resolved against the acting
/// fighter's masks when the rule is evaluated; unknown ids never fire.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiRule {
    /// Rule is considered while `hp / max_hp <= hp_threshold`.
    pub hp_threshold: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub switch_to: Option<MaskId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_action: Option<ActionId>,
}

/// Ordered first-match rule list used by computer-controlled fighters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiProfile {
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<AiRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback_action: Option<ActionId>,
    /// Guard-granting actions are only picked every N turns (N > 1).
    #[cfg_attr(feature = "serde", serde(default))]
    pub guard_every_n_turns: u32,
}

impl AiProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: AiRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_fallback(mut self, action: impl Into<ActionId>) -> Self {
        self.fallback_action = Some(action.into());
        self
    }

    pub fn with_guard_cadence(mut self, every_n_turns: u32) -> Self {
        self.guard_every_n_turns = every_n_turns;
        self
    }

    /// True when guard-granting actions are permitted on this turn.
    pub fn is_guard_turn(&self, turn_number: u32) -> bool {
        self.guard_every_n_turns <= 1 || turn_number % self.guard_every_n_turns == 0
    }
}

impl AiRule {
    pub fn new(hp_threshold: f32) -> Self {
        Self {
            hp_threshold,
            switch_to: None,
            preferred_action: None,
        }
    }

    pub fn switch_to(mut self, mask: impl Into<MaskId>) -> Self {
        self.switch_to = Some(mask.into());
        self
    }

    pub fn prefer(mut self, action: impl Into<ActionId>) -> Self {
        self.preferred_action = Some(action.into());
        self
    }
}
