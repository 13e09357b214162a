use std::sync::Arc;

use strum::IntoEnumIterator;

use super::*;
use crate::definition::{
    ActionCategory, ActionFlags, ActionModifiers, FighterProfile, MaskDefinition,
};
use crate::rng::RngOracle;
use crate::stats::StatBlock;

/// Oracle that always produces the same raw value.
struct FixedRoll(u32);

impl RngOracle for FixedRoll {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

fn fighter(side: Side, passive: PassiveKind) -> Fighter {
    let mask = Arc::new(MaskDefinition::new("worn").with_passive(passive));
    let profile = FighterProfile::new("tester", StatBlock::new(100, 10, 10, 10, 10, 10, 10), mask);
    Fighter::new(side, &profile)
}

fn strike() -> ActionDefinition {
    ActionDefinition::new("strike", ActionCategory::Attack).with_power(5)
}

fn spell() -> ActionDefinition {
    strike().with_flags(ActionFlags::MAGICAL)
}

fn status(kind: StatusType, duration: u32) -> Arc<StatusDefinition> {
    Arc::new(StatusDefinition::new(kind, duration))
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn every_kind_has_its_own_handler() {
    for kind in PassiveKind::iter() {
        assert_eq!(hooks_for(kind).kind(), kind);
    }
}

#[test]
fn no_passive_leaves_everything_alone() {
    let mut ctx = BattleContext::new(1);
    let mut owner = fighter(Side::Player, PassiveKind::None);
    let other = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::None);

    let burn = status(StatusType::Burn, 2);
    assert_eq!(
        hooks.on_status_about_to_apply(&owner, Some(&other), &burn, &mut ctx),
        StatusAdjustment::default()
    );
    assert_eq!(hooks.on_calculate_action_cost(&owner, &other, &strike(), 2, &ctx), 2);
    assert!(close(hooks.on_modify_damage_dealt(&owner, &other, &strike(), 4.0, &mut ctx), 4.0));
    assert!(hooks.on_counter_triggered(&owner, &other, &mut ctx).is_none());
    assert!(hooks.on_hp_changed(&mut owner, &mut ctx).is_none());
    assert!(hooks.on_turn_end(&mut owner, &other, &mut ctx).is_none());
}

#[test]
fn status_shorten_trims_every_status() {
    let mut ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::StatusShorten);
    let adjustment = hooks_for(PassiveKind::StatusShorten).on_status_about_to_apply(
        &owner,
        None,
        &status(StatusType::Poison, 3),
        &mut ctx,
    );
    assert_eq!(adjustment.duration_delta, -1);
    assert!(!adjustment.reflect);
}

#[test]
fn control_resist_only_trims_control() {
    let mut ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::ControlResist);
    let hooks = hooks_for(PassiveKind::ControlResist);

    let silence =
        hooks.on_status_about_to_apply(&owner, None, &status(StatusType::Silence, 2), &mut ctx);
    assert_eq!(silence.duration_delta, -1);
    let bleed =
        hooks.on_status_about_to_apply(&owner, None, &status(StatusType::Bleed, 2), &mut ctx);
    assert_eq!(bleed.duration_delta, 0);
}

#[test]
fn status_reflect_rolls_against_thirty_percent() {
    let owner = fighter(Side::Player, PassiveKind::StatusReflect);
    let source = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::StatusReflect);
    let burn = status(StatusType::Burn, 2);

    // raw 0 rolls a 1, raw 29 rolls a 30, raw 30 rolls a 31
    let mut lucky = BattleContext::with_rng(1, Arc::new(FixedRoll(29)));
    assert!(hooks.on_status_about_to_apply(&owner, Some(&source), &burn, &mut lucky).reflect);

    let mut unlucky = BattleContext::with_rng(1, Arc::new(FixedRoll(30)));
    assert!(!hooks.on_status_about_to_apply(&owner, Some(&source), &burn, &mut unlucky).reflect);
}

#[test]
fn status_reflect_needs_a_foreign_source() {
    let owner = fighter(Side::Player, PassiveKind::StatusReflect);
    let hooks = hooks_for(PassiveKind::StatusReflect);
    let burn = status(StatusType::Burn, 2);
    let mut ctx = BattleContext::with_rng(1, Arc::new(FixedRoll(0)));

    assert!(!hooks.on_status_about_to_apply(&owner, None, &burn, &mut ctx).reflect);
    assert!(!hooks.on_status_about_to_apply(&owner, Some(&owner), &burn, &mut ctx).reflect);
}

#[test]
fn exhausted_discount_applies_to_control_against_exhausted_opponent() {
    let ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::ExhaustedDiscount);
    let mut opponent = fighter(Side::Enemy, PassiveKind::None);
    let hex = ActionDefinition::new("hex", ActionCategory::Control).with_cost(2, 0);

    assert_eq!(effective_action_cost(&owner, &opponent, &hex, &ctx), 2);
    opponent.apply_status(status(StatusType::Exhausted, 2));
    assert_eq!(effective_action_cost(&owner, &opponent, &hex, &ctx), 1);

    let attack = strike().with_cost(2, 0);
    assert_eq!(effective_action_cost(&owner, &opponent, &attack, &ctx), 2);
}

#[test]
fn first_action_discount_floors_at_zero() {
    let mut ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::FirstActionDiscount);
    let opponent = fighter(Side::Enemy, PassiveKind::None);
    let cheap = strike().with_cost(0, 0);
    let normal = strike().with_cost(2, 0);

    assert_eq!(effective_action_cost(&owner, &opponent, &cheap, &ctx), 0);
    assert_eq!(effective_action_cost(&owner, &opponent, &normal, &ctx), 1);
    ctx.record_action();
    assert_eq!(effective_action_cost(&owner, &opponent, &normal, &ctx), 2);
}

#[test]
fn busy_turn_exhausts_first_action_wearer() {
    let mut ctx = BattleContext::new(1);
    ctx.register_status(status(StatusType::Exhausted, 2));
    let mut owner = fighter(Side::Player, PassiveKind::FirstActionDiscount);
    let opponent = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::FirstActionDiscount);

    ctx.record_action();
    ctx.record_action();
    assert!(hooks.on_turn_end(&mut owner, &opponent, &mut ctx).is_none());

    ctx.record_action();
    assert_eq!(
        hooks.on_turn_end(&mut owner, &opponent, &mut ctx),
        Some(PassiveEffect::Exhausted)
    );
    assert!(owner.has_status(StatusType::Exhausted));
}

#[test]
fn exhaustion_without_authored_status_is_a_no_op() {
    let mut ctx = BattleContext::new(1);
    let mut owner = fighter(Side::Player, PassiveKind::FirstActionDiscount);
    let opponent = fighter(Side::Enemy, PassiveKind::None);
    for _ in 0..3 {
        ctx.record_action();
    }
    assert!(hooks_for(PassiveKind::FirstActionDiscount)
        .on_turn_end(&mut owner, &opponent, &mut ctx)
        .is_none());
    assert!(!owner.has_status(StatusType::Exhausted));
}

#[test]
fn bleed_hunter_boosts_physical_hits_on_bleeding_targets() {
    let mut ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::BleedHunter);
    let mut target = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::BleedHunter);

    assert!(close(hooks.on_modify_damage_dealt(&owner, &target, &strike(), 10.0, &mut ctx), 10.0));
    target.apply_status(status(StatusType::Bleed, 2));
    assert!(close(hooks.on_modify_damage_dealt(&owner, &target, &strike(), 10.0, &mut ctx), 11.5));
    assert!(close(hooks.on_modify_damage_dealt(&owner, &target, &spell(), 10.0, &mut ctx), 10.0));
}

#[test]
fn expose_synergy_cuts_both_ways() {
    let mut ctx = BattleContext::new(1);
    let mut owner = fighter(Side::Player, PassiveKind::ExposeSynergy);
    let mut other = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::ExposeSynergy);

    other.apply_status(status(StatusType::Expose, 2));
    assert!(close(hooks.on_modify_damage_dealt(&owner, &other, &spell(), 8.0, &mut ctx), 10.0));
    assert!(close(hooks.on_modify_damage_dealt(&owner, &other, &strike(), 8.0, &mut ctx), 8.0));

    assert!(close(
        hooks.on_modify_damage_received(&owner, &other, &strike(), 10.0, &mut ctx),
        10.0
    ));
    owner.apply_status(status(StatusType::Expose, 2));
    assert!(close(
        hooks.on_modify_damage_received(&owner, &other, &strike(), 10.0, &mut ctx),
        11.5
    ));
}

#[test]
fn first_strike_fires_once_per_battle() {
    let mut ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::FirstStrike);
    let target = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::FirstStrike);

    assert!(close(hooks.on_modify_damage_dealt(&owner, &target, &strike(), 10.0, &mut ctx), 12.0));
    assert!(close(hooks.on_modify_damage_dealt(&owner, &target, &strike(), 10.0, &mut ctx), 10.0));
    assert!(ctx.first_attack_used(Side::Player));
    assert!(!ctx.first_attack_used(Side::Enemy));
}

#[test]
fn physical_guard_softens_first_physical_hit_each_turn() {
    let mut ctx = BattleContext::new(1);
    let owner = fighter(Side::Player, PassiveKind::PhysicalGuard);
    let attacker = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::PhysicalGuard);

    assert!(close(
        hooks.on_modify_damage_received(&owner, &attacker, &spell(), 8.0, &mut ctx),
        8.0
    ));
    assert!(close(
        hooks.on_modify_damage_received(&owner, &attacker, &strike(), 8.0, &mut ctx),
        6.0
    ));
    assert!(close(
        hooks.on_modify_damage_received(&owner, &attacker, &strike(), 8.0, &mut ctx),
        8.0
    ));

    ctx.reset_turn_tracking();
    assert!(close(
        hooks.on_modify_damage_received(&owner, &attacker, &strike(), 8.0, &mut ctx),
        6.0
    ));
}

#[test]
fn counter_follow_up_reads_the_enhanced_counter_action() {
    let mut ctx = BattleContext::new(1);
    let weaken = status(StatusType::Weaken, 2);
    let riposte = ActionDefinition::new("riposte", ActionCategory::Defense)
        .with_flags(ActionFlags::GRANTS_COUNTER)
        .with_enhanced_counter(0.8)
        .with_modifiers(ActionModifiers {
            reactive_guard_status: Some(Arc::clone(&weaken)),
            ..ActionModifiers::default()
        });
    let mask = Arc::new(
        MaskDefinition::new("duelist")
            .with_passive(PassiveKind::CounterFollowUp)
            .with_action(Arc::new(riposte)),
    );
    let profile = FighterProfile::new("duelist", StatBlock::new(50, 0, 10, 10, 0, 10, 10), mask);
    let counterer = Fighter::new(Side::Player, &profile);
    let attacker = fighter(Side::Enemy, PassiveKind::None);

    let hooks = hooks_for(PassiveKind::CounterFollowUp);
    assert_eq!(hooks.on_counter_triggered(&counterer, &attacker, &mut ctx), Some(weaken));

    let plain = fighter(Side::Player, PassiveKind::CounterFollowUp);
    assert!(hooks.on_counter_triggered(&plain, &attacker, &mut ctx).is_none());
}

#[test]
fn last_stand_triggers_once_below_threshold() {
    let mut ctx = BattleContext::new(1);
    let mut owner = fighter(Side::Player, PassiveKind::LastStand);
    owner.apply_status(status(StatusType::Bleed, 3));
    let hooks = hooks_for(PassiveKind::LastStand);

    owner.take_damage(80);
    assert!(hooks.on_hp_changed(&mut owner, &mut ctx).is_none());

    owner.take_damage(1);
    assert_eq!(hooks.on_hp_changed(&mut owner, &mut ctx), Some(PassiveEffect::LastStand));
    assert!(owner.is_guarding());
    assert!(!owner.has_status(StatusType::Bleed));
    assert!(ctx.last_stand_used(Side::Player));

    owner.set_guarding(false);
    owner.take_damage(5);
    assert!(hooks.on_hp_changed(&mut owner, &mut ctx).is_none());
    assert!(!owner.is_guarding());
}

#[test]
fn last_stand_ignores_fatal_damage() {
    let mut ctx = BattleContext::new(1);
    let mut owner = fighter(Side::Player, PassiveKind::LastStand);
    owner.take_damage(100);
    assert!(hooks_for(PassiveKind::LastStand).on_hp_changed(&mut owner, &mut ctx).is_none());
    assert!(!ctx.last_stand_used(Side::Player));
}

#[test]
fn burn_leech_heals_or_restores_mana() {
    let mut ctx = BattleContext::new(1);
    let mut owner = fighter(Side::Player, PassiveKind::BurnLeech);
    let mut opponent = fighter(Side::Enemy, PassiveKind::None);
    let hooks = hooks_for(PassiveKind::BurnLeech);

    owner.take_damage(10);
    assert!(hooks.on_turn_end(&mut owner, &opponent, &mut ctx).is_none());

    opponent.apply_status(status(StatusType::Burn, 2));
    assert_eq!(
        hooks.on_turn_end(&mut owner, &opponent, &mut ctx),
        Some(PassiveEffect::Healed { amount: 3 })
    );
    assert_eq!(owner.hp(), 93);

    owner.heal(100);
    owner.spend(0, 5);
    assert_eq!(
        hooks.on_turn_end(&mut owner, &opponent, &mut ctx),
        Some(PassiveEffect::ManaRestored { amount: 2 })
    );
    assert_eq!(owner.mp(), 7);
}
