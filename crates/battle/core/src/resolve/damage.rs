use std::sync::Arc;

use super::{ActionOutcome, Combatants, EffectLog, inflict_status, notify_hp_changed};
use crate::config::BattleConfig;
use crate::definition::{ActionCategory, ActionDefinition};
use crate::passive::{self, PassiveEffect};
use crate::state::{BattleContext, Fighter, Side};

/// Offense over defense for the action's damage type; 1 when the defense is not positive.
pub fn attack_ratio(attack: f32, defense: f32) -> f32 {
    if defense <= 0.0 { 1.0 } else { attack / defense }
}

/// Nearest integer with ties away from zero, never below 1.
pub fn round_damage(damage: f32) -> u32 {
    let rounded = damage.round();
    if rounded.is_nan() || rounded < 1.0 {
        1
    } else {
        rounded as u32
    }
}

fn record_scaling(log: &mut EffectLog, owner: &Fighter, before: f32, after: f32) {
    if before != after {
        log.passive(owner, PassiveEffect::DamageScaled { before, after });
    }
}

/// Unrounded damage of `action` from `actor` onto `target`.
///
/// The second value is true when a conditional bonus found its required
/// status missing, in which case the caller owes the actor the fail debuff.
fn scaled_damage(
    actor: &Fighter,
    target: &Fighter,
    action: &ActionDefinition,
    ctx: &mut BattleContext,
    config: &BattleConfig,
    log: &mut EffectLog,
) -> (f32, bool) {
    let modifiers = &action.modifiers;

    let ratio = if action.is_magical() {
        attack_ratio(actor.effective_mag(), target.effective_res())
    } else {
        attack_ratio(actor.effective_atk(), target.effective_def())
    };
    let mut damage = action.power as f32 * ratio;

    let before = damage;
    damage = passive::hooks_for(actor.passive())
        .on_modify_damage_dealt(actor, target, action, damage, ctx);
    record_scaling(log, actor, before, damage);

    let mut condition_missed = false;
    if let Some(condition) = &modifiers.conditional {
        if target.has_status(condition.required) {
            damage *= condition.multiplier;
        } else {
            condition_missed = true;
        }
    }

    if let Some(multiplier) = modifiers.last_action_multiplier {
        if actor.ap() == 0 {
            damage *= multiplier;
        }
    }

    if let Some(multiplier) = modifiers.first_turn_multiplier {
        if ctx.turn_number() <= 1 {
            damage *= multiplier;
        }
    }

    if target.is_guarding() {
        damage *= modifiers.guard_multiplier.unwrap_or(config.guard_multiplier);
    }

    let before = damage;
    damage = passive::hooks_for(target.passive())
        .on_modify_damage_received(target, actor, action, damage, ctx);
    record_scaling(log, target, before, damage);

    if action.inflicts_kind().is_some() && action.inflicts_kind() == target.mask().vulnerability {
        damage *= config.vulnerability_multiplier;
    }

    (damage, condition_missed)
}

fn apply_condition_debuff(actor: &mut Fighter, action: &ActionDefinition, log: &mut EffectLog) {
    let debuff = action
        .modifiers
        .conditional
        .as_ref()
        .and_then(|condition| condition.debuff_on_fail.as_ref());
    if let Some(debuff) = debuff {
        let change = actor.apply_status(Arc::clone(debuff));
        log.status(actor.side(), change);
    }
}

/// Rounded damage, or the pending debug override for `actor` taken verbatim.
fn settle_damage(damage: f32, actor: Side, ctx: &mut BattleContext) -> u32 {
    ctx.take_forced_damage(actor).unwrap_or_else(|| round_damage(damage))
}

/// Step 6 of the pipeline: damage, counter-attack and reactive guard.
pub(super) fn resolve_damage(
    pair: &mut Combatants<'_>,
    action: &ActionDefinition,
    ctx: &mut BattleContext,
    config: &BattleConfig,
    outcome: &mut ActionOutcome,
) {
    let actor = &mut *pair.actor;
    let target = &mut *pair.opponent;
    let log = &mut outcome.effects;

    let (damage, condition_missed) = scaled_damage(actor, target, action, ctx, config, log);
    if condition_missed {
        apply_condition_debuff(actor, action, log);
    }
    let final_damage = settle_damage(damage, actor.side(), ctx);

    let was_guarding = target.is_guarding();
    let was_countering = target.is_countering();
    target.take_damage(final_damage);
    outcome.damage = Some(final_damage);
    notify_hp_changed(target, ctx, log);

    if was_countering && action.category == ActionCategory::Attack && target.is_alive() {
        let multiplier = target
            .mask()
            .enhanced_counter()
            .unwrap_or(config.counter_multiplier);
        let counter = round_damage(target.effective_atk() * multiplier);
        actor.take_damage(counter);
        target.set_countering(false);
        outcome.counter_damage = Some(counter);

        let hooks = passive::hooks_for(target.passive());
        if let Some(status) = hooks.on_counter_triggered(target, actor, ctx) {
            let change = actor.apply_status(Arc::clone(&status));
            log.status(actor.side(), change);
            log.passive(target, PassiveEffect::CounterFollowUp { status: status.kind });
        }
        notify_hp_changed(actor, ctx, log);
    }

    if was_guarding && !action.is_magical() {
        if let Some(status) = target.mask().reactive_guard_status().cloned() {
            inflict_status(actor, Some(target), &status, ctx, log);
        }
    }
}

/// Step 6 for an action aimed at its own user. The actor fills both roles
/// of the damage formula; counters and reactive guard never fire on oneself.
pub(super) fn resolve_self_damage(
    actor: &mut Fighter,
    action: &ActionDefinition,
    ctx: &mut BattleContext,
    config: &BattleConfig,
    outcome: &mut ActionOutcome,
) {
    let log = &mut outcome.effects;

    let (damage, condition_missed) = scaled_damage(actor, actor, action, ctx, config, log);
    if condition_missed {
        apply_condition_debuff(actor, action, log);
    }
    let final_damage = settle_damage(damage, actor.side(), ctx);

    actor.take_damage(final_damage);
    outcome.damage = Some(final_damage);
    notify_hp_changed(actor, ctx, log);
}
