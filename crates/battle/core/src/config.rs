use core::ops::RangeInclusive;
use strum::EnumCount;

/// Battle tuning constants and rule parameters.
///
/// Every field has a runtime default matching the shipped rules; content
/// packs may override any subset through `battle.toml`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattleConfig {
    /// AP granted at the start of every turn before mask bonuses and penalties.
    pub base_ap_per_turn: u32,
    /// AP spent by a mask change.
    pub mask_change_ap_cost: u32,
    /// Commands accepted per turn before the turn is force-ended.
    pub max_commands_per_turn: u32,
    /// Damage factor against a guarding target when the action has no override.
    pub guard_multiplier: f32,
    /// Counter-attack factor when the counterer has no enhanced counter.
    pub counter_multiplier: f32,
    /// Damage factor when the inflicted status matches the target's vulnerability.
    pub vulnerability_multiplier: f32,
    /// Extra factor applied to every companion hit.
    pub companion_damage_modifier: f32,
    /// Unmitigated damage of a companion whose mask has no usable action.
    pub companion_flat_damage: u32,
    /// Inclusive bounds of the companion attack interval, in owner turns.
    pub companion_interval_min: u32,
    pub companion_interval_max: u32,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Principal combatants in a battle.
    pub const SIDES: usize = 2;
    /// Hard capacity of a fighter's status list (one slot per status type).
    pub const MAX_ACTIVE_STATUSES: usize = crate::definition::StatusType::COUNT;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_AP: u32 = 3;
    pub const DEFAULT_MASK_CHANGE_COST: u32 = 2;
    pub const DEFAULT_MAX_COMMANDS: u32 = 20;
    pub const DEFAULT_GUARD_MULTIPLIER: f32 = 0.5;
    pub const DEFAULT_COUNTER_MULTIPLIER: f32 = 0.5;
    pub const DEFAULT_VULNERABILITY_MULTIPLIER: f32 = 1.5;
    pub const DEFAULT_COMPANION_MODIFIER: f32 = 0.5;
    pub const DEFAULT_COMPANION_FLAT_DAMAGE: u32 = 3;
    pub const DEFAULT_COMPANION_INTERVAL: RangeInclusive<u32> = 2..=3;

    pub fn new() -> Self {
        Self {
            base_ap_per_turn: Self::DEFAULT_BASE_AP,
            mask_change_ap_cost: Self::DEFAULT_MASK_CHANGE_COST,
            max_commands_per_turn: Self::DEFAULT_MAX_COMMANDS,
            guard_multiplier: Self::DEFAULT_GUARD_MULTIPLIER,
            counter_multiplier: Self::DEFAULT_COUNTER_MULTIPLIER,
            vulnerability_multiplier: Self::DEFAULT_VULNERABILITY_MULTIPLIER,
            companion_damage_modifier: Self::DEFAULT_COMPANION_MODIFIER,
            companion_flat_damage: Self::DEFAULT_COMPANION_FLAT_DAMAGE,
            companion_interval_min: *Self::DEFAULT_COMPANION_INTERVAL.start(),
            companion_interval_max: *Self::DEFAULT_COMPANION_INTERVAL.end(),
        }
    }

    pub fn with_max_commands(mut self, max_commands_per_turn: u32) -> Self {
        self.max_commands_per_turn = max_commands_per_turn;
        self
    }

    /// Companion interval bounds, normalised so that `min <= max`.
    pub fn companion_interval(&self) -> RangeInclusive<u32> {
        let min = self.companion_interval_min.min(self.companion_interval_max);
        let max = self.companion_interval_min.max(self.companion_interval_max);
        min..=max
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
