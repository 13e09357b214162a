use std::sync::Arc;

use super::{PassiveEffect, PassiveHooks, StatusAdjustment};
use crate::definition::{
    ActionCategory, ActionDefinition, PassiveKind, StatusDefinition, StatusType,
};
use crate::rng::RollPurpose;
use crate::state::{BattleContext, Fighter};

const STATUS_SHORTEN_TURNS: i32 = 1;
const CONTROL_RESIST_TURNS: i32 = 1;
const REFLECT_CHANCE_PERCENT: u32 = 30;
const COST_DISCOUNT: u32 = 1;
const BLEED_HUNTER_MULTIPLIER: f32 = 1.15;
const EXPOSE_MAGIC_MULTIPLIER: f32 = 1.25;
const EXPOSE_SELF_PENALTY: f32 = 1.15;
const FIRST_STRIKE_MULTIPLIER: f32 = 1.2;
const PHYSICAL_GUARD_MULTIPLIER: f32 = 0.75;
const LAST_STAND_THRESHOLD: f32 = 0.2;
const BURN_LEECH_HEAL_RATIO: f32 = 0.03;
const BURN_LEECH_MANA: u32 = 2;
const EXHAUSTION_ACTION_COUNT: u32 = 3;

pub(super) struct NoPassive;

impl PassiveHooks for NoPassive {
    fn kind(&self) -> PassiveKind {
        PassiveKind::None
    }
}

pub(super) struct StatusShorten;

impl PassiveHooks for StatusShorten {
    fn kind(&self) -> PassiveKind {
        PassiveKind::StatusShorten
    }

    fn on_status_about_to_apply(
        &self,
        _target: &Fighter,
        _source: Option<&Fighter>,
        _status: &StatusDefinition,
        _ctx: &mut BattleContext,
    ) -> StatusAdjustment {
        StatusAdjustment {
            duration_delta: -STATUS_SHORTEN_TURNS,
            reflect: false,
        }
    }
}

pub(super) struct StatusReflect;

impl PassiveHooks for StatusReflect {
    fn kind(&self) -> PassiveKind {
        PassiveKind::StatusReflect
    }

    fn on_status_about_to_apply(
        &self,
        target: &Fighter,
        source: Option<&Fighter>,
        _status: &StatusDefinition,
        ctx: &mut BattleContext,
    ) -> StatusAdjustment {
        let Some(source) = source else {
            return StatusAdjustment::default();
        };
        if source.side() == target.side() {
            return StatusAdjustment::default();
        }
        let roll = ctx.roll_percent(target.side(), RollPurpose::StatusReflect);
        StatusAdjustment {
            duration_delta: 0,
            reflect: roll <= REFLECT_CHANCE_PERCENT,
        }
    }
}

pub(super) struct ControlResist;

impl PassiveHooks for ControlResist {
    fn kind(&self) -> PassiveKind {
        PassiveKind::ControlResist
    }

    fn on_status_about_to_apply(
        &self,
        _target: &Fighter,
        _source: Option<&Fighter>,
        status: &StatusDefinition,
        _ctx: &mut BattleContext,
    ) -> StatusAdjustment {
        let duration_delta = if status.kind.is_control() {
            -CONTROL_RESIST_TURNS
        } else {
            0
        };
        StatusAdjustment {
            duration_delta,
            reflect: false,
        }
    }
}

pub(super) struct ExhaustedDiscount;

impl PassiveHooks for ExhaustedDiscount {
    fn kind(&self) -> PassiveKind {
        PassiveKind::ExhaustedDiscount
    }

    fn on_calculate_action_cost(
        &self,
        _actor: &Fighter,
        opponent: &Fighter,
        action: &ActionDefinition,
        cost: u32,
        _ctx: &BattleContext,
    ) -> u32 {
        if action.category == ActionCategory::Control
            && opponent.has_status(StatusType::Exhausted)
        {
            cost.saturating_sub(COST_DISCOUNT)
        } else {
            cost
        }
    }
}

/// Cheap opener, but a busy turn exhausts the wearer.
pub(super) struct FirstActionDiscount;

impl PassiveHooks for FirstActionDiscount {
    fn kind(&self) -> PassiveKind {
        PassiveKind::FirstActionDiscount
    }

    fn on_calculate_action_cost(
        &self,
        _actor: &Fighter,
        _opponent: &Fighter,
        _action: &ActionDefinition,
        cost: u32,
        ctx: &BattleContext,
    ) -> u32 {
        if ctx.actions_this_turn() == 0 {
            cost.saturating_sub(COST_DISCOUNT)
        } else {
            cost
        }
    }

    fn on_turn_end(
        &self,
        actor: &mut Fighter,
        _opponent: &Fighter,
        ctx: &mut BattleContext,
    ) -> Option<PassiveEffect> {
        if ctx.actions_this_turn() < EXHAUSTION_ACTION_COUNT {
            return None;
        }
        let exhausted = ctx.status_definition(StatusType::Exhausted)?;
        actor.apply_status(exhausted);
        Some(PassiveEffect::Exhausted)
    }
}

pub(super) struct BleedHunter;

impl PassiveHooks for BleedHunter {
    fn kind(&self) -> PassiveKind {
        PassiveKind::BleedHunter
    }

    fn on_modify_damage_dealt(
        &self,
        _actor: &Fighter,
        target: &Fighter,
        action: &ActionDefinition,
        damage: f32,
        _ctx: &mut BattleContext,
    ) -> f32 {
        if !action.is_magical() && target.has_status(StatusType::Bleed) {
            damage * BLEED_HUNTER_MULTIPLIER
        } else {
            damage
        }
    }
}

pub(super) struct ExposeSynergy;

impl PassiveHooks for ExposeSynergy {
    fn kind(&self) -> PassiveKind {
        PassiveKind::ExposeSynergy
    }

    fn on_modify_damage_dealt(
        &self,
        _actor: &Fighter,
        target: &Fighter,
        action: &ActionDefinition,
        damage: f32,
        _ctx: &mut BattleContext,
    ) -> f32 {
        if action.is_magical() && target.has_status(StatusType::Expose) {
            damage * EXPOSE_MAGIC_MULTIPLIER
        } else {
            damage
        }
    }

    fn on_modify_damage_received(
        &self,
        target: &Fighter,
        _attacker: &Fighter,
        _action: &ActionDefinition,
        damage: f32,
        _ctx: &mut BattleContext,
    ) -> f32 {
        if target.has_status(StatusType::Expose) {
            damage * EXPOSE_SELF_PENALTY
        } else {
            damage
        }
    }
}

pub(super) struct FirstStrike;

impl PassiveHooks for FirstStrike {
    fn kind(&self) -> PassiveKind {
        PassiveKind::FirstStrike
    }

    fn on_modify_damage_dealt(
        &self,
        actor: &Fighter,
        _target: &Fighter,
        _action: &ActionDefinition,
        damage: f32,
        ctx: &mut BattleContext,
    ) -> f32 {
        if ctx.take_first_attack(actor.side()) {
            damage * FIRST_STRIKE_MULTIPLIER
        } else {
            damage
        }
    }
}

pub(super) struct PhysicalGuard;

impl PassiveHooks for PhysicalGuard {
    fn kind(&self) -> PassiveKind {
        PassiveKind::PhysicalGuard
    }

    fn on_modify_damage_received(
        &self,
        _target: &Fighter,
        _attacker: &Fighter,
        action: &ActionDefinition,
        damage: f32,
        ctx: &mut BattleContext,
    ) -> f32 {
        if !action.is_magical() && ctx.take_first_physical_hit() {
            damage * PHYSICAL_GUARD_MULTIPLIER
        } else {
            damage
        }
    }
}

/// Counter follow-up stays data-driven: the wearer's enhanced-counter action
/// names the status, if it names one at all.
pub(super) struct CounterFollowUp;

impl PassiveHooks for CounterFollowUp {
    fn kind(&self) -> PassiveKind {
        PassiveKind::CounterFollowUp
    }

    fn on_counter_triggered(
        &self,
        counterer: &Fighter,
        _attacker: &Fighter,
        _ctx: &mut BattleContext,
    ) -> Option<Arc<StatusDefinition>> {
        counterer.mask().counter_follow_up_status().cloned()
    }
}

pub(super) struct LastStand;

impl PassiveHooks for LastStand {
    fn kind(&self) -> PassiveKind {
        PassiveKind::LastStand
    }

    fn on_hp_changed(
        &self,
        fighter: &mut Fighter,
        ctx: &mut BattleContext,
    ) -> Option<PassiveEffect> {
        if !fighter.is_alive() || fighter.hp_ratio() >= LAST_STAND_THRESHOLD {
            return None;
        }
        if !ctx.take_last_stand(fighter.side()) {
            return None;
        }
        fighter.set_guarding(true);
        fighter.remove_status(StatusType::Bleed);
        Some(PassiveEffect::LastStand)
    }
}

pub(super) struct BurnLeech;

impl PassiveHooks for BurnLeech {
    fn kind(&self) -> PassiveKind {
        PassiveKind::BurnLeech
    }

    fn on_turn_end(
        &self,
        actor: &mut Fighter,
        opponent: &Fighter,
        _ctx: &mut BattleContext,
    ) -> Option<PassiveEffect> {
        if !opponent.has_status(StatusType::Burn) {
            return None;
        }
        if actor.hp() < actor.max_hp() {
            let amount = ((actor.max_hp() as f32 * BURN_LEECH_HEAL_RATIO).round() as u32).max(1);
            Some(PassiveEffect::Healed {
                amount: actor.heal(amount),
            })
        } else {
            Some(PassiveEffect::ManaRestored {
                amount: actor.restore_mp(BURN_LEECH_MANA),
            })
        }
    }
}
