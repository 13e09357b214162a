//! Passive hook dispatcher.
//!
//! Every mask carries one [`PassiveKind`]. The resolver and the turn loop call
//! the seven hooks of [`PassiveHooks`] at fixed points; [`hooks_for`] maps a
//! kind to its handler through an exhaustive match, and every hook a handler
//! does not override is a no-op.
//!
//! Hooks never hold references to the battle. They receive the fighters and
//! the context they may inspect, and either mutate the hook owner directly or
//! return a value the caller applies.

mod handlers;

use std::sync::Arc;

use crate::definition::{ActionDefinition, PassiveKind, StatusDefinition, StatusType};
use crate::state::{BattleContext, Fighter, Side};

/// Adjustment requested by the status-about-to-apply hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusAdjustment {
    /// Added to the refreshed duration; the result floors at zero.
    pub duration_delta: i32,
    /// Also apply a copy of the status onto its source.
    pub reflect: bool,
}

/// Observable effect of a passive, reported to presentation layers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveEffect {
    DurationShifted { status: StatusType, delta: i32 },
    Reflected { status: StatusType },
    CostDiscount { base: u32, effective: u32 },
    DamageScaled { before: f32, after: f32 },
    CounterFollowUp { status: StatusType },
    LastStand,
    Healed { amount: u32 },
    ManaRestored { amount: u32 },
    Exhausted,
}

/// A passive that fired, and for whom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveEvent {
    pub side: Side,
    pub passive: PassiveKind,
    pub effect: PassiveEffect,
}

/// Extension points a passive may implement.
pub trait PassiveHooks: Send + Sync {
    fn kind(&self) -> PassiveKind;

    /// Before a status with a known source lands on `target` (the hook owner).
    fn on_status_about_to_apply(
        &self,
        _target: &Fighter,
        _source: Option<&Fighter>,
        _status: &StatusDefinition,
        _ctx: &mut BattleContext,
    ) -> StatusAdjustment {
        StatusAdjustment::default()
    }

    /// Before AP is checked or deducted for `actor` (the hook owner).
    fn on_calculate_action_cost(
        &self,
        _actor: &Fighter,
        _opponent: &Fighter,
        _action: &ActionDefinition,
        cost: u32,
        _ctx: &BattleContext,
    ) -> u32 {
        cost
    }

    /// After ratio damage, before any target-side mitigation.
    fn on_modify_damage_dealt(
        &self,
        _actor: &Fighter,
        _target: &Fighter,
        _action: &ActionDefinition,
        damage: f32,
        _ctx: &mut BattleContext,
    ) -> f32 {
        damage
    }

    /// After guard mitigation, for the defending hook owner.
    fn on_modify_damage_received(
        &self,
        _target: &Fighter,
        _attacker: &Fighter,
        _action: &ActionDefinition,
        damage: f32,
        _ctx: &mut BattleContext,
    ) -> f32 {
        damage
    }

    /// After a counter-attack resolves. A returned status is applied to the attacker.
    fn on_counter_triggered(
        &self,
        _counterer: &Fighter,
        _attacker: &Fighter,
        _ctx: &mut BattleContext,
    ) -> Option<Arc<StatusDefinition>> {
        None
    }

    /// After the hook owner took damage.
    fn on_hp_changed(
        &self,
        _fighter: &mut Fighter,
        _ctx: &mut BattleContext,
    ) -> Option<PassiveEffect> {
        None
    }

    /// Once per turn, after the hook owner's command loop.
    fn on_turn_end(
        &self,
        _actor: &mut Fighter,
        _opponent: &Fighter,
        _ctx: &mut BattleContext,
    ) -> Option<PassiveEffect> {
        None
    }
}

/// Handler for a passive kind.
pub fn hooks_for(kind: PassiveKind) -> &'static dyn PassiveHooks {
    use handlers::*;
    match kind {
        PassiveKind::None => &NoPassive,
        PassiveKind::StatusShorten => &StatusShorten,
        PassiveKind::StatusReflect => &StatusReflect,
        PassiveKind::ControlResist => &ControlResist,
        PassiveKind::ExhaustedDiscount => &ExhaustedDiscount,
        PassiveKind::FirstActionDiscount => &FirstActionDiscount,
        PassiveKind::BleedHunter => &BleedHunter,
        PassiveKind::ExposeSynergy => &ExposeSynergy,
        PassiveKind::FirstStrike => &FirstStrike,
        PassiveKind::PhysicalGuard => &PhysicalGuard,
        PassiveKind::CounterFollowUp => &CounterFollowUp,
        PassiveKind::LastStand => &LastStand,
        PassiveKind::BurnLeech => &BurnLeech,
    }
}

/// AP cost of `action` for `actor` after its passive, never below zero.
pub fn effective_action_cost(
    actor: &Fighter,
    opponent: &Fighter,
    action: &ActionDefinition,
    ctx: &BattleContext,
) -> u32 {
    hooks_for(actor.passive())
        .on_calculate_action_cost(actor, opponent, action, action.ap_cost, ctx)
}

#[cfg(test)]
mod tests;
