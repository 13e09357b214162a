use std::sync::Arc;

use super::*;
use crate::definition::{
    ActionFlags, ActionModifiers, ConditionalBonus, FighterProfile, MaskDefinition, PassiveKind,
    StatusType,
};
use crate::rng::RngOracle;
use crate::state::Companion;
use crate::stats::StatBlock;

const STATS: StatBlock = StatBlock::new(100, 20, 10, 10, 10, 10, 10);

struct FixedRoll(u32);

impl RngOracle for FixedRoll {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

fn fighter(side: Side, stats: StatBlock, mask: MaskDefinition) -> Fighter {
    let profile = FighterProfile::new(side.to_string(), stats, Arc::new(mask));
    let mut fighter = Fighter::new(side, &profile);
    fighter.begin_turn(BattleConfig::DEFAULT_BASE_AP);
    fighter
}

fn duel(player: MaskDefinition, enemy: MaskDefinition) -> [Fighter; 2] {
    [fighter(Side::Player, STATS, player), fighter(Side::Enemy, STATS, enemy)]
}

fn plain() -> MaskDefinition {
    MaskDefinition::new("plain")
}

fn strike() -> ActionDefinition {
    ActionDefinition::new("strike", ActionCategory::Attack).with_power(5)
}

fn status(kind: StatusType, duration: u32) -> Arc<StatusDefinition> {
    Arc::new(StatusDefinition::new(kind, duration))
}

fn hit(
    fighters: &mut [Fighter; 2],
    action: &ActionDefinition,
    ctx: &mut BattleContext,
) -> ActionOutcome {
    execute_action(fighters, Side::Player, action, ctx, &BattleConfig::default())
}

#[test]
fn ratio_and_rounding_rules() {
    assert_eq!(attack_ratio(10.0, 0.0), 1.0);
    assert_eq!(attack_ratio(10.0, -3.0), 1.0);
    assert_eq!(attack_ratio(15.0, 10.0), 1.5);

    assert_eq!(round_damage(2.5), 3);
    assert_eq!(round_damage(2.49), 2);
    assert_eq!(round_damage(0.2), 1);
    assert_eq!(round_damage(0.0), 1);
    assert_eq!(round_damage(f32::NAN), 1);
}

#[test]
fn plain_hit_scales_by_attack_over_defense() {
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);

    let outcome = hit(&mut fighters, &strike(), &mut ctx);
    assert_eq!(outcome.damage, Some(5));
    assert_eq!(outcome.target_hp, HpChange { before: 100, after: 95 });
    assert_eq!(outcome.ap_spent, 1);
    assert_eq!(fighters[0].ap(), 2);
    assert_eq!(ctx.actions_this_turn(), 1);
    assert!(!outcome.target_defeated);
}

#[test]
fn guard_halves_and_rounds_half_away_from_zero() {
    let mut fighters = duel(plain(), plain());
    fighters[1].set_guarding(true);
    let mut ctx = BattleContext::new(1);

    let outcome = hit(&mut fighters, &strike(), &mut ctx);
    assert_eq!(outcome.damage, Some(3));
}

#[test]
fn action_guard_multiplier_overrides_default() {
    let mut fighters = duel(plain(), plain());
    fighters[1].set_guarding(true);
    let mut ctx = BattleContext::new(1);
    let piercing = strike().with_power(10).with_modifiers(ActionModifiers {
        guard_multiplier: Some(0.8),
        ..ActionModifiers::default()
    });

    assert_eq!(hit(&mut fighters, &piercing, &mut ctx).damage, Some(8));
}

#[test]
fn magic_uses_magic_over_resistance() {
    let caster = fighter(Side::Player, StatBlock::new(100, 20, 1, 10, 20, 10, 10), plain());
    let target = fighter(Side::Enemy, StatBlock::new(100, 20, 10, 40, 10, 10, 10), plain());
    let mut fighters = [caster, target];
    let mut ctx = BattleContext::new(1);
    let bolt = strike().with_cost(1, 4).with_flags(ActionFlags::MAGICAL);

    let outcome = hit(&mut fighters, &bolt, &mut ctx);
    assert_eq!(outcome.damage, Some(10));
    assert_eq!(outcome.mp_spent, 4);
    assert_eq!(fighters[0].mp(), 16);
}

#[test]
fn guard_and_counter_flags_are_raised_on_the_actor() {
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);
    let brace = ActionDefinition::new("brace", ActionCategory::Defense)
        .with_flags(
            ActionFlags::GRANTS_GUARD | ActionFlags::GRANTS_COUNTER | ActionFlags::TARGETS_SELF,
        );

    let outcome = hit(&mut fighters, &brace, &mut ctx);
    assert!(fighters[0].is_guarding());
    assert!(fighters[0].is_countering());
    assert_eq!(outcome.damage, None);
    assert_eq!(outcome.target, Side::Player);
}

#[test]
fn counter_fires_once_on_attacks_only() {
    let mut fighters = duel(plain(), plain());
    fighters[1].set_countering(true);
    let mut ctx = BattleContext::new(1);

    let jab = ActionDefinition::new("jab", ActionCategory::Control).with_power(5);
    assert_eq!(hit(&mut fighters, &jab, &mut ctx).counter_damage, None);
    assert!(fighters[1].is_countering());

    let outcome = hit(&mut fighters, &strike(), &mut ctx);
    assert_eq!(outcome.counter_damage, Some(5));
    assert_eq!(outcome.actor_hp, HpChange { before: 100, after: 95 });
    assert!(!fighters[1].is_countering());

    assert_eq!(hit(&mut fighters, &strike(), &mut ctx).counter_damage, None);
}

#[test]
fn enhanced_counter_comes_from_the_equipped_mask() {
    let riposte = ActionDefinition::new("riposte", ActionCategory::Defense)
        .with_flags(ActionFlags::GRANTS_COUNTER)
        .with_enhanced_counter(0.8);
    let duelist = MaskDefinition::new("duelist").with_action(Arc::new(riposte));
    let mut fighters = duel(plain(), duelist);
    fighters[1].set_countering(true);
    let mut ctx = BattleContext::new(1);

    assert_eq!(hit(&mut fighters, &strike(), &mut ctx).counter_damage, Some(8));
}

#[test]
fn dead_targets_do_not_counter() {
    let mut fighters = duel(plain(), plain());
    fighters[1].set_countering(true);
    let mut ctx = BattleContext::new(1);
    ctx.force_next_damage(Side::Player, 500);

    let outcome = hit(&mut fighters, &strike(), &mut ctx);
    assert!(outcome.target_defeated);
    assert_eq!(outcome.counter_damage, None);
    assert_eq!(fighters[0].hp(), 100);
}

#[test]
fn counter_follow_up_applies_the_mask_status_to_the_attacker() {
    let riposte = ActionDefinition::new("riposte", ActionCategory::Defense)
        .with_enhanced_counter(0.5)
        .with_modifiers(ActionModifiers {
            reactive_guard_status: Some(status(StatusType::Weaken, 2)),
            ..ActionModifiers::default()
        });
    let duelist = MaskDefinition::new("duelist")
        .with_passive(PassiveKind::CounterFollowUp)
        .with_action(Arc::new(riposte));
    let mut fighters = duel(plain(), duelist);
    fighters[1].set_countering(true);
    let mut ctx = BattleContext::new(1);

    let outcome = hit(&mut fighters, &strike(), &mut ctx);
    assert!(fighters[0].has_status(StatusType::Weaken));
    assert!(outcome.effects.passives.iter().any(|event| {
        event.side == Side::Enemy
            && event.effect == PassiveEffect::CounterFollowUp { status: StatusType::Weaken }
    }));
}

#[test]
fn healing_skips_damage_and_caps_at_max() {
    let mut fighters = duel(plain(), plain());
    fighters[0].take_damage(30);
    let mut ctx = BattleContext::new(1);
    let mend = ActionDefinition::new("mend", ActionCategory::Other)
        .with_power(20)
        .with_flags(ActionFlags::HEALING | ActionFlags::TARGETS_SELF);

    let outcome = hit(&mut fighters, &mend, &mut ctx);
    assert_eq!(outcome.healing, Some(20));
    assert_eq!(outcome.damage, None);
    assert_eq!(fighters[0].hp(), 90);
    assert_eq!(fighters[1].hp(), 100);

    let outcome = hit(&mut fighters, &mend, &mut ctx);
    assert_eq!(outcome.healing, Some(10));
}

#[test]
fn self_targeted_damage_lands_on_the_actor() {
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);
    let pact = ActionDefinition::new("pact", ActionCategory::Other)
        .with_power(5)
        .with_flags(ActionFlags::TARGETS_SELF);

    let outcome = hit(&mut fighters, &pact, &mut ctx);
    assert_eq!(outcome.target, Side::Player);
    assert_eq!(outcome.damage, Some(5));
    assert_eq!(outcome.target_hp, HpChange { before: 100, after: 95 });
    assert_eq!(fighters[0].hp(), 95);
    assert_eq!(fighters[1].hp(), 100);

    // A countering user does not counter its own attack.
    let lash = strike().with_flags(ActionFlags::TARGETS_SELF | ActionFlags::GRANTS_COUNTER);
    let outcome = hit(&mut fighters, &lash, &mut ctx);
    assert_eq!(outcome.damage, Some(5));
    assert_eq!(outcome.counter_damage, None);
    assert_eq!(fighters[0].hp(), 90);
    assert!(fighters[0].is_countering());
}

#[test]
fn conditional_bonus_or_debuff() {
    let gamble = strike().with_modifiers(ActionModifiers {
        conditional: Some(ConditionalBonus {
            required: StatusType::Bleed,
            multiplier: 2.0,
            debuff_on_fail: Some(status(StatusType::Expose, 1)),
        }),
        ..ActionModifiers::default()
    });

    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);
    assert_eq!(hit(&mut fighters, &gamble, &mut ctx).damage, Some(5));
    assert!(fighters[0].has_status(StatusType::Expose));

    let mut fighters = duel(plain(), plain());
    fighters[1].apply_status(status(StatusType::Bleed, 2));
    assert_eq!(hit(&mut fighters, &gamble, &mut ctx).damage, Some(10));
    assert!(!fighters[0].has_status(StatusType::Expose));
}

#[test]
fn last_action_bonus_needs_empty_ap() {
    let finisher = strike().with_modifiers(ActionModifiers {
        last_action_multiplier: Some(1.5),
        ..ActionModifiers::default()
    });
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);

    assert_eq!(hit(&mut fighters, &finisher, &mut ctx).damage, Some(5));
    fighters[0].spend(1, 0);
    assert_eq!(fighters[0].ap(), 1);
    assert_eq!(hit(&mut fighters, &finisher, &mut ctx).damage, Some(8));
}

#[test]
fn first_turn_bonus_expires_after_round_one() {
    let opener = strike().with_modifiers(ActionModifiers {
        first_turn_multiplier: Some(2.0),
        ..ActionModifiers::default()
    });
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);
    ctx.advance_turn();
    assert_eq!(hit(&mut fighters, &opener, &mut ctx).damage, Some(10));

    ctx.advance_turn();
    assert_eq!(hit(&mut fighters, &opener, &mut ctx).damage, Some(5));
}

#[test]
fn vulnerability_amplifies_matching_status() {
    let brittle = plain().with_vulnerability(StatusType::Burn);
    let mut fighters = duel(plain(), brittle);
    let mut ctx = BattleContext::new(1);

    let scorch = strike().inflicting(status(StatusType::Burn, 2));
    let outcome = hit(&mut fighters, &scorch, &mut ctx);
    assert_eq!(outcome.damage, Some(8));
    assert!(fighters[1].has_status(StatusType::Burn));

    let cut = strike().inflicting(status(StatusType::Bleed, 2));
    assert_eq!(hit(&mut fighters, &cut, &mut ctx).damage, Some(5));
}

#[test]
fn forced_damage_applies_to_one_hit() {
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);
    ctx.force_next_damage(Side::Player, 42);

    assert_eq!(hit(&mut fighters, &strike(), &mut ctx).damage, Some(42));
    assert_eq!(hit(&mut fighters, &strike(), &mut ctx).damage, Some(5));

    ctx.force_next_damage(Side::Player, 0);
    assert_eq!(hit(&mut fighters, &strike(), &mut ctx).damage, Some(0));
    assert_eq!(fighters[1].hp(), 53);
}

#[test]
fn reactive_guard_punishes_physical_attackers() {
    let thorns = ActionDefinition::new("thorns", ActionCategory::Defense)
        .with_flags(ActionFlags::GRANTS_GUARD)
        .with_modifiers(ActionModifiers {
            reactive_guard_status: Some(status(StatusType::Bleed, 2)),
            ..ActionModifiers::default()
        });
    let bramble = plain().with_action(Arc::new(thorns));
    let mut fighters = duel(plain(), bramble);
    fighters[1].set_guarding(true);
    let mut ctx = BattleContext::new(1);

    let bolt = strike().with_flags(ActionFlags::MAGICAL);
    hit(&mut fighters, &bolt, &mut ctx);
    assert!(!fighters[0].has_status(StatusType::Bleed));

    hit(&mut fighters, &strike(), &mut ctx);
    assert!(fighters[0].has_status(StatusType::Bleed));
}

#[test]
fn status_removal_runs_before_the_main_effect() {
    let mut fighters = duel(plain(), plain());
    fighters[0].apply_status(status(StatusType::Poison, 3));
    fighters[0].apply_status(status(StatusType::Burn, 3));
    let mut ctx = BattleContext::new(1);

    let cleanse = ActionDefinition::new("cleanse", ActionCategory::Other)
        .with_flags(ActionFlags::TARGETS_SELF)
        .with_modifiers(ActionModifiers {
            status_removal: Some(StatusRemoval {
                kinds: vec![StatusType::Poison],
                reduce_by: None,
            }),
            ..ActionModifiers::default()
        });
    hit(&mut fighters, &cleanse, &mut ctx);
    assert!(!fighters[0].has_status(StatusType::Poison));
    assert!(fighters[0].has_status(StatusType::Burn));

    let soothe = ActionDefinition::new("soothe", ActionCategory::Other)
        .with_flags(ActionFlags::TARGETS_SELF)
        .with_modifiers(ActionModifiers {
            status_removal: Some(StatusRemoval {
                kinds: vec![StatusType::Burn],
                reduce_by: Some(2),
            }),
            ..ActionModifiers::default()
        });
    let outcome = hit(&mut fighters, &soothe, &mut ctx);
    assert_eq!(fighters[0].statuses().get(StatusType::Burn).map(|s| s.remaining()), Some(1));

    let outcome_again = hit(&mut fighters, &soothe, &mut ctx);
    assert!(fighters[0].statuses().get(StatusType::Burn).is_none());
    assert!(outcome_again.effects.statuses.iter().any(|event| {
        event.change == StatusChange::Expired { kind: StatusType::Burn }
    }));
    assert!(!outcome.effects.is_empty());
}

#[test]
fn secondary_self_status_and_conditional_ap() {
    let flurry = strike().inflicting(status(StatusType::Bleed, 2)).with_modifiers(ActionModifiers {
        secondary_status: Some(status(StatusType::Expose, 1)),
        self_status: Some(status(StatusType::Exhausted, 1)),
        conditional: Some(ConditionalBonus {
            required: StatusType::Bleed,
            multiplier: 1.0,
            debuff_on_fail: None,
        }),
        ap_gain: Some(1),
        ..ActionModifiers::default()
    });
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);

    let outcome = hit(&mut fighters, &flurry, &mut ctx);
    assert!(fighters[1].has_status(StatusType::Bleed));
    assert!(fighters[1].has_status(StatusType::Expose));
    assert!(fighters[0].has_status(StatusType::Exhausted));
    // Bleed lands in step 7, so the AP gain gate already sees it.
    assert_eq!(outcome.ap_gained, 1);
    assert_eq!(fighters[0].ap(), 3);
}

#[test]
fn passive_aware_application_can_reflect() {
    let mirror = plain().with_passive(PassiveKind::StatusReflect);
    let mut fighters = duel(plain(), mirror);
    let mut ctx = BattleContext::with_rng(1, Arc::new(FixedRoll(0)));

    let outcome = hit(&mut fighters, &strike().inflicting(status(StatusType::Burn, 2)), &mut ctx);
    assert!(fighters[0].has_status(StatusType::Burn));
    assert!(fighters[1].has_status(StatusType::Burn));
    assert!(outcome.effects.passives.iter().any(|event| {
        event.effect == PassiveEffect::Reflected { status: StatusType::Burn }
    }));
}

#[test]
fn status_shorten_can_zero_a_status() {
    let warded = plain().with_passive(PassiveKind::StatusShorten);
    let mut fighters = duel(plain(), warded);
    let mut ctx = BattleContext::new(1);

    hit(&mut fighters, &strike().inflicting(status(StatusType::Silence, 1)), &mut ctx);
    let silence = fighters[1].statuses().get(StatusType::Silence).map(|s| s.remaining());
    assert_eq!(silence, Some(0));
    assert!(!fighters[1].is_silenced());
}

#[test]
fn last_stand_triggers_from_damage() {
    let stubborn = plain().with_passive(PassiveKind::LastStand);
    let mut fighters = duel(plain(), stubborn);
    let mut ctx = BattleContext::new(1);
    ctx.force_next_damage(Side::Player, 85);

    let outcome = hit(&mut fighters, &strike(), &mut ctx);
    assert!(fighters[1].is_guarding());
    assert!(ctx.last_stand_used(Side::Enemy));
    assert!(outcome.effects.passives.iter().any(|event| event.effect == PassiveEffect::LastStand));

    assert_eq!(hit(&mut fighters, &strike(), &mut ctx).damage, Some(3));
}

#[test]
fn first_action_discount_is_reported() {
    let nimble = plain().with_passive(PassiveKind::FirstActionDiscount);
    let mut fighters = duel(nimble, plain());
    let mut ctx = BattleContext::new(1);

    let outcome = hit(&mut fighters, &strike().with_cost(2, 0), &mut ctx);
    assert_eq!(outcome.ap_spent, 1);
    assert!(outcome.effects.passives.iter().any(|event| {
        event.effect == PassiveEffect::CostDiscount { base: 2, effective: 1 }
    }));
}

#[test]
fn companion_strikes_on_cadence() {
    let bite = ActionDefinition::new("bite", ActionCategory::Attack).with_power(6);
    let pet = Arc::new(MaskDefinition::new("hound").with_action(Arc::new(bite)));
    let mut fighters = duel(plain(), plain());
    let mut ctx = BattleContext::new(1);
    let config = BattleConfig::default();

    assert!(companion_strike(&mut fighters, Side::Player, &mut ctx, &config).is_none());

    ctx.set_companion(Side::Player, Companion::new(pet, 2));
    assert!(companion_strike(&mut fighters, Side::Player, &mut ctx, &config).is_none());

    let outcome = companion_strike(&mut fighters, Side::Player, &mut ctx, &config);
    let outcome = outcome.expect("companion due on its second turn");
    assert_eq!(outcome.damage, Some(3));
    assert_eq!(outcome.target_hp, HpChange { before: 100, after: 97 });
    assert!((2..=3).contains(&outcome.next_interval));
    assert_eq!(ctx.companion(Side::Player).map(Companion::turns_since_attack), Some(0));
    assert_eq!(fighters[0].ap(), 3);
}

#[test]
fn bare_companion_deals_flat_damage() {
    let mut fighters = duel(plain(), plain());
    fighters[1].set_guarding(true);
    let mut ctx = BattleContext::new(1);
    ctx.set_companion(Side::Enemy, Companion::new(Arc::new(MaskDefinition::new("wisp")), 1));

    let outcome = companion_strike(&mut fighters, Side::Enemy, &mut ctx, &BattleConfig::default())
        .expect("companion due");
    assert_eq!(outcome.action, None);
    assert_eq!(outcome.damage, Some(3));
    assert_eq!(fighters[0].hp(), 97);
}

#[test]
fn companion_status_goes_through_the_target_passive() {
    let scorch = ActionDefinition::new("scorch", ActionCategory::Control)
        .inflicting(status(StatusType::Burn, 3));
    let pet = Arc::new(MaskDefinition::new("imp").with_action(Arc::new(scorch)));
    let warded = plain().with_passive(PassiveKind::StatusShorten);
    let mut fighters = duel(plain(), warded);
    let mut ctx = BattleContext::new(1);
    ctx.set_companion(Side::Player, Companion::new(pet, 1));

    let outcome = companion_strike(&mut fighters, Side::Player, &mut ctx, &BattleConfig::default())
        .expect("companion due");
    assert_eq!(outcome.damage, None);
    assert_eq!(fighters[1].statuses().get(StatusType::Burn).map(|s| s.remaining()), Some(2));
}
