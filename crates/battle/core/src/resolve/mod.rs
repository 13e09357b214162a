//! Action resolution.
//!
//! [`execute_action`] applies one already-validated action from the acting
//! side to its target in a fixed order. Each step reads the state left by the
//! previous one, so the order matters:
//!
//! 1. guard / counter flags on the actor
//! 2. passive-adjusted AP cost, AP and MP deducted
//! 3. per-turn action counter
//! 4. status removal or reduction, then purge
//! 5. healing (ends resolution)
//! 6. damage (onto the actor itself for self-targeted actions), counter-attack,
//!    reactive guard
//! 7. primary and secondary statuses onto the target
//! 8. self status on use
//! 9. conditional AP gain

mod companion;
mod damage;

pub use companion::{CompanionOutcome, companion_strike};
pub use damage::{attack_ratio, round_damage};

use std::sync::Arc;

use crate::config::BattleConfig;
use crate::definition::{
    ActionCategory, ActionDefinition, ActionId, StatusDefinition, StatusRemoval,
};
use crate::passive::{self, PassiveEffect, PassiveEvent};
use crate::state::{BattleContext, Fighter, HpChange, Side, StatusChange};

/// Status change on a given side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEvent {
    pub side: Side,
    pub change: StatusChange,
}

/// Side effects collected while resolving, in the order they happened.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectLog {
    pub statuses: Vec<StatusEvent>,
    pub passives: Vec<PassiveEvent>,
}

impl EffectLog {
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty() && self.passives.is_empty()
    }

    pub(crate) fn status(&mut self, side: Side, change: StatusChange) {
        self.statuses.push(StatusEvent { side, change });
    }

    pub(crate) fn passive(&mut self, fighter: &Fighter, effect: PassiveEffect) {
        self.passives.push(PassiveEvent {
            side: fighter.side(),
            passive: fighter.passive(),
            effect,
        });
    }
}

/// Everything a presentation layer needs to replay one action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub actor: Side,
    pub target: Side,
    pub action: ActionId,
    pub category: ActionCategory,
    pub ap_spent: u32,
    pub mp_spent: u32,
    /// Final damage of the hit, after rounding and the debug override.
    pub damage: Option<u32>,
    pub healing: Option<u32>,
    pub counter_damage: Option<u32>,
    pub ap_gained: u32,
    pub actor_hp: HpChange,
    pub target_hp: HpChange,
    pub actor_defeated: bool,
    pub target_defeated: bool,
    pub effects: EffectLog,
}

/// The acting fighter and its opponent, borrowed together.
pub(crate) struct Combatants<'a> {
    pub actor: &'a mut Fighter,
    pub opponent: &'a mut Fighter,
}

impl<'a> Combatants<'a> {
    pub fn split(fighters: &'a mut [Fighter; 2], actor: Side) -> Self {
        let [player, enemy] = fighters;
        match actor {
            Side::Player => Self {
                actor: player,
                opponent: enemy,
            },
            Side::Enemy => Self {
                actor: enemy,
                opponent: player,
            },
        }
    }

    fn target(&mut self, self_target: bool) -> &mut Fighter {
        if self_target {
            &mut *self.actor
        } else {
            &mut *self.opponent
        }
    }

    fn target_ref(&self, self_target: bool) -> &Fighter {
        if self_target {
            &*self.actor
        } else {
            &*self.opponent
        }
    }

    /// The action's target together with the status source, which is absent
    /// when the actor targets itself.
    fn target_and_source(&mut self, self_target: bool) -> (&mut Fighter, Option<&mut Fighter>) {
        if self_target {
            (&mut *self.actor, None)
        } else {
            (&mut *self.opponent, Some(&mut *self.actor))
        }
    }
}

/// Resolve `action` for `actor`. Legality must have been checked beforehand.
pub fn execute_action(
    fighters: &mut [Fighter; 2],
    actor: Side,
    action: &ActionDefinition,
    ctx: &mut BattleContext,
    config: &BattleConfig,
) -> ActionOutcome {
    let self_target = action.targets_self();
    let target = if self_target { actor } else { actor.opponent() };
    let mut pair = Combatants::split(fighters, actor);

    let mut outcome = ActionOutcome {
        actor,
        target,
        action: action.id.clone(),
        category: action.category,
        ap_spent: 0,
        mp_spent: 0,
        damage: None,
        healing: None,
        counter_damage: None,
        ap_gained: 0,
        actor_hp: HpChange {
            before: pair.actor.hp(),
            after: pair.actor.hp(),
        },
        target_hp: HpChange {
            before: pair.target_ref(self_target).hp(),
            after: pair.target_ref(self_target).hp(),
        },
        actor_defeated: false,
        target_defeated: false,
        effects: EffectLog::default(),
    };

    if action.grants_guard() {
        pair.actor.set_guarding(true);
    }
    if action.grants_counter() {
        pair.actor.set_countering(true);
    }

    let ap_cost = passive::effective_action_cost(pair.actor, pair.opponent, action, ctx);
    if ap_cost != action.ap_cost {
        outcome.effects.passive(
            pair.actor,
            PassiveEffect::CostDiscount {
                base: action.ap_cost,
                effective: ap_cost,
            },
        );
    }
    outcome.ap_spent = ap_cost.min(pair.actor.ap());
    outcome.mp_spent = action.mp_cost.min(pair.actor.mp());
    pair.actor.spend(ap_cost, action.mp_cost);

    ctx.record_action();

    if let Some(removal) = &action.modifiers.status_removal {
        strip_statuses(pair.target(self_target), removal, &mut outcome.effects);
    }

    if action.is_healing() {
        resolve_healing(&mut pair, action, ctx, &mut outcome);
    } else {
        if action.power > 0 {
            if self_target {
                damage::resolve_self_damage(pair.actor, action, ctx, config, &mut outcome);
            } else {
                damage::resolve_damage(&mut pair, action, ctx, config, &mut outcome);
            }
        }

        let statuses = [
            action.inflicts.as_ref(),
            action.modifiers.secondary_status.as_ref(),
        ];
        for status in statuses.into_iter().flatten() {
            let (onto, source) = pair.target_and_source(self_target);
            inflict_status(onto, source, status, ctx, &mut outcome.effects);
        }

        apply_self_status(pair.actor, action, &mut outcome.effects);
        grant_conditional_ap(&mut pair, action, &mut outcome);
    }

    outcome.actor_hp.after = pair.actor.hp();
    outcome.target_hp.after = pair.target_ref(self_target).hp();
    outcome.actor_defeated = !pair.actor.is_alive();
    outcome.target_defeated = !pair.target_ref(self_target).is_alive();
    outcome
}

fn strip_statuses(holder: &mut Fighter, removal: &StatusRemoval, log: &mut EffectLog) {
    for &kind in &removal.kinds {
        let change = match removal.reduce_by {
            Some(amount) if amount > 0 => holder.reduce_status(kind, amount),
            _ => holder.remove_status(kind),
        };
        if let Some(change) = change {
            log.status(holder.side(), change);
        }
    }
    for change in holder.purge_expired_statuses() {
        log.status(holder.side(), change);
    }
}

fn resolve_healing(
    pair: &mut Combatants<'_>,
    action: &ActionDefinition,
    ctx: &mut BattleContext,
    outcome: &mut ActionOutcome,
) {
    let self_target = action.targets_self();
    let healed = pair.target(self_target).heal(action.power.max(1));
    outcome.healing = Some(healed);

    if let Some(status) = &action.inflicts {
        let (onto, source) = pair.target_and_source(self_target);
        inflict_status(onto, source, status, ctx, &mut outcome.effects);
    }
    apply_self_status(pair.actor, action, &mut outcome.effects);
    grant_conditional_ap(pair, action, outcome);
}

fn apply_self_status(actor: &mut Fighter, action: &ActionDefinition, log: &mut EffectLog) {
    if let Some(status) = &action.modifiers.self_status {
        let change = actor.apply_status(Arc::clone(status));
        log.status(actor.side(), change);
    }
}

fn grant_conditional_ap(
    pair: &mut Combatants<'_>,
    action: &ActionDefinition,
    outcome: &mut ActionOutcome,
) {
    let Some(gain) = action.modifiers.ap_gain else {
        return;
    };
    let gated = match &action.modifiers.conditional {
        Some(condition) => pair
            .target_ref(action.targets_self())
            .has_status(condition.required),
        None => true,
    };
    if gated {
        pair.actor.gain_ap(gain);
        outcome.ap_gained = gain;
    }
}

/// Status application that consults the target's passive first.
///
/// `source` is the fighter responsible for the status; it may receive a
/// reflected copy. Self-inflicted and sourceless statuses pass `None`.
pub(crate) fn inflict_status(
    target: &mut Fighter,
    source: Option<&mut Fighter>,
    status: &Arc<StatusDefinition>,
    ctx: &mut BattleContext,
    log: &mut EffectLog,
) {
    let hooks = passive::hooks_for(target.passive());
    let adjustment = hooks.on_status_about_to_apply(target, source.as_deref(), status, ctx);

    if adjustment.reflect {
        if let Some(source) = source {
            let change = source.apply_status(Arc::clone(status));
            log.status(source.side(), change);
            log.passive(target, PassiveEffect::Reflected { status: status.kind });
        }
    }
    if adjustment.duration_delta != 0 {
        log.passive(
            target,
            PassiveEffect::DurationShifted {
                status: status.kind,
                delta: adjustment.duration_delta,
            },
        );
    }

    let change = target.apply_status_shifted(Arc::clone(status), adjustment.duration_delta);
    log.status(target.side(), change);
}

/// Run the hp-changed hook of `fighter`'s passive.
pub(crate) fn notify_hp_changed(
    fighter: &mut Fighter,
    ctx: &mut BattleContext,
    log: &mut EffectLog,
) {
    let hooks = passive::hooks_for(fighter.passive());
    if let Some(effect) = hooks.on_hp_changed(fighter, ctx) {
        log.passive(fighter, effect);
    }
}

#[cfg(test)]
mod tests;
