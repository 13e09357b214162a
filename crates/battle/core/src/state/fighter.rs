use std::sync::Arc;

use super::Side;
use super::status::{StatusChange, StatusList};
use crate::definition::{
    ActionCategory, ActionDefinition, FighterProfile, MaskDefinition, MaskId, PassiveKind,
    StatusDefinition, StatusType,
};
use crate::engine::{CommandError, Resource};
use crate::stats::{StatBlock, StatKind, StatMultiplier};

/// HP before and after a resolution step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HpChange {
    pub before: u32,
    pub after: u32,
}

impl HpChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }
}

/// A combatant's runtime state.
///
/// HP and MP are re-clamped after every mutation that can move them or their
/// maximum, so `0 <= hp <= max_hp()` and `0 <= mp <= max_mp()` always hold.
#[derive(Clone, Debug)]
pub struct Fighter {
    side: Side,
    name: String,
    base: StatBlock,
    mask: Arc<MaskDefinition>,
    masks: Vec<Arc<MaskDefinition>>,
    hp: u32,
    mp: u32,
    ap: u32,
    guarding: bool,
    countering: bool,
    mask_cooldown: u32,
    changed_mask_this_turn: bool,
    changed_mask_last_turn: bool,
    statuses: StatusList,
}

impl Fighter {
    pub fn new(side: Side, profile: &FighterProfile) -> Self {
        let mut masks = profile.masks.clone();
        if !masks.iter().any(|mask| mask.id == profile.starting_mask.id) {
            masks.insert(0, Arc::clone(&profile.starting_mask));
        }

        let mut fighter = Self {
            side,
            name: profile.name.clone(),
            base: profile.stats,
            mask: Arc::clone(&profile.starting_mask),
            masks,
            hp: 0,
            mp: 0,
            ap: 0,
            guarding: false,
            countering: false,
            mask_cooldown: 0,
            changed_mask_this_turn: false,
            changed_mask_last_turn: false,
            statuses: StatusList::new(),
        };
        fighter.hp = fighter.max_hp();
        fighter.mp = fighter.max_mp();
        fighter
    }

    // ===== accessors =====

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_stats(&self) -> &StatBlock {
        &self.base
    }

    pub fn mask(&self) -> &Arc<MaskDefinition> {
        &self.mask
    }

    pub fn masks(&self) -> &[Arc<MaskDefinition>] {
        &self.masks
    }

    pub fn passive(&self) -> PassiveKind {
        self.mask.passive
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn mp(&self) -> u32 {
        self.mp
    }

    pub fn ap(&self) -> u32 {
        self.ap
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_guarding(&self) -> bool {
        self.guarding
    }

    pub fn is_countering(&self) -> bool {
        self.countering
    }

    pub fn mask_cooldown(&self) -> u32 {
        self.mask_cooldown
    }

    pub fn changed_mask_this_turn(&self) -> bool {
        self.changed_mask_this_turn
    }

    pub fn changed_mask_last_turn(&self) -> bool {
        self.changed_mask_last_turn
    }

    pub fn statuses(&self) -> &StatusList {
        &self.statuses
    }

    pub fn has_status(&self, kind: StatusType) -> bool {
        self.statuses.contains(kind)
    }

    // ===== derived stats =====

    /// Mask multiplier composed with every active status multiplier.
    pub fn multiplier(&self) -> StatMultiplier {
        self.mask.multiplier * self.statuses.multiplier()
    }

    pub fn max_hp(&self) -> u32 {
        let raw = self.base.hp as f32 * self.multiplier().hp;
        (raw.round().max(0.0) as u32).max(1)
    }

    pub fn max_mp(&self) -> u32 {
        let raw = self.base.mp as f32 * self.multiplier().mp;
        raw.round().max(0.0) as u32
    }

    /// Unrounded effective stat; only meaningful in ratios.
    pub fn effective(&self, kind: StatKind) -> f32 {
        self.base.get(kind) as f32 * self.multiplier().get(kind)
    }

    pub fn effective_atk(&self) -> f32 {
        self.effective(StatKind::Atk)
    }

    pub fn effective_def(&self) -> f32 {
        self.effective(StatKind::Def)
    }

    pub fn effective_mag(&self) -> f32 {
        self.effective(StatKind::Mag)
    }

    pub fn effective_res(&self) -> f32 {
        self.effective(StatKind::Res)
    }

    pub fn effective_spd(&self) -> f32 {
        self.effective(StatKind::Spd)
    }

    /// Current HP as a fraction of maximum, 0 when the maximum is 0.
    pub fn hp_ratio(&self) -> f32 {
        let max = self.max_hp();
        if max == 0 {
            return 0.0;
        }
        self.hp as f32 / max as f32
    }

    pub fn is_silenced(&self) -> bool {
        self.statuses.prevents_magic()
    }

    pub fn is_defense_disabled(&self) -> bool {
        self.statuses.prevents_defense()
    }

    // ===== legality =====

    /// Checks whether `action` may be used at the given effective AP cost.
    pub fn check_action(
        &self,
        action: &ActionDefinition,
        ap_cost: u32,
    ) -> Result<(), CommandError> {
        if self.mask.action(&action.id).is_none() {
            return Err(CommandError::ActionNotAvailable {
                action: action.id.clone(),
            });
        }
        if ap_cost > self.ap {
            return Err(CommandError::InsufficientResources {
                resource: Resource::Ap,
                required: ap_cost,
                available: self.ap,
            });
        }
        if action.mp_cost > self.mp {
            return Err(CommandError::InsufficientResources {
                resource: Resource::Mp,
                required: action.mp_cost,
                available: self.mp,
            });
        }
        if action.is_magical() && self.is_silenced() {
            return Err(CommandError::Silenced);
        }
        if action.category == ActionCategory::Defense && self.is_defense_disabled() {
            return Err(CommandError::DefenseDisabled);
        }
        Ok(())
    }

    /// Checks whether the fighter may switch into `target` and returns its definition.
    pub fn check_mask_change(
        &self,
        target: &MaskId,
        ap_cost: u32,
    ) -> Result<Arc<MaskDefinition>, CommandError> {
        if &self.mask.id == target {
            return Err(CommandError::MaskAlreadyEquipped {
                mask: target.clone(),
            });
        }
        let mask = self
            .masks
            .iter()
            .find(|mask| &mask.id == target)
            .ok_or_else(|| CommandError::MaskNotAvailable {
                mask: target.clone(),
            })?;
        if self.mask_cooldown > 0 {
            return Err(CommandError::MaskOnCooldown {
                turns: self.mask_cooldown,
            });
        }
        if self.ap < ap_cost {
            return Err(CommandError::InsufficientResources {
                resource: Resource::Ap,
                required: ap_cost,
                available: self.ap,
            });
        }
        if self.changed_mask_this_turn {
            return Err(CommandError::MaskAlreadyChanged);
        }
        // Only the mask being left can forbid a consecutive change.
        if self.mask.disallow_consecutive_change && self.changed_mask_last_turn {
            return Err(CommandError::ConsecutiveChangeBlocked);
        }
        Ok(Arc::clone(mask))
    }

    // ===== mutations =====

    pub fn change_mask(&mut self, mask: Arc<MaskDefinition>) {
        self.mask_cooldown = mask.change_cooldown;
        self.mask = mask;
        self.changed_mask_this_turn = true;
        self.clamp_resources();
    }

    /// Apply the equipped mask's inertia penalty. Returns the AP removed.
    pub fn apply_inertia(&mut self) -> u32 {
        let Some(penalty) = self.mask.inertia else {
            return 0;
        };
        let removed = penalty.min(self.ap);
        self.ap -= removed;
        removed
    }

    pub fn spend(&mut self, ap: u32, mp: u32) {
        self.ap = self.ap.saturating_sub(ap);
        self.mp = self.mp.saturating_sub(mp);
    }

    pub fn gain_ap(&mut self, amount: u32) {
        self.ap = self.ap.saturating_add(amount);
    }

    pub fn set_guarding(&mut self, guarding: bool) {
        self.guarding = guarding;
    }

    pub fn set_countering(&mut self, countering: bool) {
        self.countering = countering;
    }

    /// Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let max = self.max_hp();
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(max);
        self.hp - before
    }

    /// Returns the MP actually restored.
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let max = self.max_mp();
        let before = self.mp;
        self.mp = self.mp.saturating_add(amount).min(max);
        self.mp - before
    }

    /// Plain status application: refresh or insert, no passive involvement.
    pub fn apply_status(&mut self, definition: Arc<StatusDefinition>) -> StatusChange {
        self.apply_status_shifted(definition, 0)
    }

    /// Refresh or insert, then shift the duration by `duration_delta` (floored at 0).
    pub fn apply_status_shifted(
        &mut self,
        definition: Arc<StatusDefinition>,
        duration_delta: i32,
    ) -> StatusChange {
        let change = self.statuses.apply(definition, duration_delta);
        self.clamp_resources();
        change
    }

    pub fn remove_status(&mut self, kind: StatusType) -> Option<StatusChange> {
        let change = self.statuses.remove(kind);
        self.clamp_resources();
        change
    }

    pub fn reduce_status(&mut self, kind: StatusType, amount: u32) -> Option<StatusChange> {
        let change = self.statuses.reduce(kind, amount);
        self.clamp_resources();
        change
    }

    pub fn purge_expired_statuses(&mut self) -> Vec<StatusChange> {
        let purged = self.statuses.purge_expired();
        self.clamp_resources();
        purged
    }

    pub fn tick_statuses(&mut self) {
        self.statuses.tick_all();
        self.clamp_resources();
    }

    /// Apply start- or end-of-turn tick damage. Returns the HP lost.
    pub fn apply_tick_damage(&mut self, at_turn_start: bool) -> u32 {
        let damage = self.statuses.tick_damage(at_turn_start);
        self.take_damage(damage)
    }

    /// Opening bookkeeping of the fighter's own turn: drop guard and counter,
    /// cool the mask down and grant this turn's AP.
    pub fn begin_turn(&mut self, base_ap: u32) -> u32 {
        self.guarding = false;
        self.countering = false;
        self.changed_mask_this_turn = false;
        self.mask_cooldown = self.mask_cooldown.saturating_sub(1);
        self.ap = base_ap
            .saturating_add(self.mask.ap_bonus)
            .saturating_sub(self.statuses.ap_penalty());
        self.ap
    }

    /// Closing bookkeeping: remember whether the mask changed this turn.
    pub fn finish_turn(&mut self) {
        self.changed_mask_last_turn = self.changed_mask_this_turn;
        self.changed_mask_this_turn = false;
    }

    fn clamp_resources(&mut self) {
        self.hp = self.hp.min(self.max_hp());
        self.mp = self.mp.min(self.max_mp());
    }
}
