use std::sync::Arc;

use super::{Combatants, EffectLog, attack_ratio, inflict_status, notify_hp_changed, round_damage};
use crate::config::BattleConfig;
use crate::definition::{ActionDefinition, ActionId, MaskDefinition};
use crate::rng::RollPurpose;
use crate::state::{BattleContext, Fighter, HpChange, Side};
use crate::stats::StatKind;

/// Result of a companion's turn-start strike.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompanionOutcome {
    pub owner: Side,
    /// `None` when the companion's mask offered nothing usable and it struck bare.
    pub action: Option<ActionId>,
    pub damage: Option<u32>,
    pub target_hp: HpChange,
    pub target_defeated: bool,
    pub next_interval: u32,
    pub effects: EffectLog,
}

/// Give `owner`'s companion its once-per-turn opportunity.
///
/// Advances the cadence counter and, when due, strikes the opposing fighter
/// through a reduced pipeline: ratio damage scaled by the companion modifier,
/// guard and vulnerability, then the action's inflicted status. There is no
/// AP cost, no counter-attack and no outgoing passive.
pub fn companion_strike(
    fighters: &mut [Fighter; 2],
    owner: Side,
    ctx: &mut BattleContext,
    config: &BattleConfig,
) -> Option<CompanionOutcome> {
    let companion = ctx.companion_mut(owner)?;
    companion.on_owner_turn_start();
    if !companion.should_attack() {
        return None;
    }
    let mask = Arc::clone(companion.mask());
    let action = companion.choose_action().cloned();

    let interval = config.companion_interval();
    let next_interval = ctx.roll_range(
        owner,
        RollPurpose::CompanionInterval,
        *interval.start(),
        *interval.end(),
    );
    if let Some(companion) = ctx.companion_mut(owner) {
        companion.reset_after_attack(next_interval);
    }

    let Combatants { actor, opponent } = Combatants::split(fighters, owner);
    let before = opponent.hp();
    let mut effects = EffectLog::default();

    let damage = match &action {
        Some(action) if action.power > 0 => {
            Some(companion_damage(actor, &mask, opponent, action, config))
        }
        Some(_) => None,
        None => Some(config.companion_flat_damage),
    };
    if let Some(amount) = damage {
        opponent.take_damage(amount);
        notify_hp_changed(opponent, ctx, &mut effects);
    }
    if let Some(status) = action.as_ref().and_then(|action| action.inflicts.as_ref()) {
        inflict_status(opponent, None, status, ctx, &mut effects);
    }

    Some(CompanionOutcome {
        owner,
        action: action.map(|action| action.id.clone()),
        damage,
        target_hp: HpChange {
            before,
            after: opponent.hp(),
        },
        target_defeated: !opponent.is_alive(),
        next_interval,
        effects,
    })
}

/// Companion hits use the owner's base stats under the companion's mask.
fn companion_damage(
    owner: &Fighter,
    mask: &MaskDefinition,
    target: &Fighter,
    action: &ActionDefinition,
    config: &BattleConfig,
) -> u32 {
    let (offense, defense) = if action.is_magical() {
        (StatKind::Mag, target.effective_res())
    } else {
        (StatKind::Atk, target.effective_def())
    };
    let attack = owner.base_stats().get(offense) as f32 * mask.multiplier.get(offense);
    let mut damage =
        action.power as f32 * attack_ratio(attack, defense) * config.companion_damage_modifier;

    if target.is_guarding() {
        damage *= action.modifiers.guard_multiplier.unwrap_or(config.guard_multiplier);
    }
    if action.inflicts_kind().is_some() && action.inflicts_kind() == target.mask().vulnerability {
        damage *= config.vulnerability_multiplier;
    }
    round_damage(damage)
}
