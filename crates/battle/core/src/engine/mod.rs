//! Turn and battle state machine.
//!
//! [`Battle`] owns both fighters and the shared context and is driven step
//! by step by its caller:
//!
//! ```text
//! start() -> begin_turn() -> submit(command)* -> end_turn() -> begin_turn() ...
//! ```
//!
//! The only place a driver waits is between `submit` calls, while it obtains
//! the next command. Each call runs to completion, and the battle finishes
//! the moment either fighter reaches 0 HP.

mod command;
mod errors;

pub use command::{
    BattleResult, Command, CommandOutcome, MaskChange, TurnClosing, TurnOpening,
};
pub use errors::{BattleError, CommandError, Resource};

use std::sync::Arc;

use crate::config::BattleConfig;
use crate::definition::{
    ActionDefinition, ActionId, FighterProfile, MaskDefinition, MaskId, StatusDefinition,
};
use crate::passive;
use crate::resolve::{self, ActionOutcome, Combatants, EffectLog};
use crate::rng::{PcgRng, RngOracle, RollPurpose};
use crate::state::{BattleContext, Companion, Fighter, Side};

/// Where the battle is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    NotStarted,
    /// Waiting for `begin_turn` of the given side.
    AwaitingTurn(Side),
    /// The given side is issuing commands.
    InTurn(Side),
    Finished(BattleResult),
}

/// Assembles a [`Battle`] from two fighter profiles.
pub struct BattleBuilder {
    player: FighterProfile,
    enemy: FighterProfile,
    config: BattleConfig,
    seed: u64,
    rng: Arc<dyn RngOracle>,
    companions: [Option<Arc<MaskDefinition>>; BattleConfig::SIDES],
    statuses: Vec<Arc<StatusDefinition>>,
}

impl BattleBuilder {
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn companion(mut self, side: Side, mask: Arc<MaskDefinition>) -> Self {
        self.companions[side.index()] = Some(mask);
        self
    }

    /// Status definitions passives may grant by type (e.g. exhaustion).
    pub fn statuses(mut self, statuses: impl IntoIterator<Item = Arc<StatusDefinition>>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    pub fn build(self) -> Battle {
        let mut context = BattleContext::with_rng(self.seed, self.rng);
        for status in self.statuses {
            context.register_status(status);
        }

        let interval = self.config.companion_interval();
        for (side, mask) in [Side::Player, Side::Enemy].into_iter().zip(self.companions) {
            if let Some(mask) = mask {
                let first = context.roll_range(
                    side,
                    RollPurpose::CompanionInterval,
                    *interval.start(),
                    *interval.end(),
                );
                context.set_companion(side, Companion::new(mask, first));
            }
        }

        Battle {
            fighters: [
                Fighter::new(Side::Player, &self.player),
                Fighter::new(Side::Enemy, &self.enemy),
            ],
            context,
            config: self.config,
            phase: BattlePhase::NotStarted,
            first_mover: Side::Player,
            commands_this_turn: 0,
            turn_ended: false,
        }
    }
}

/// A single battle between the player and one enemy.
#[derive(Debug)]
pub struct Battle {
    fighters: [Fighter; 2],
    context: BattleContext,
    config: BattleConfig,
    phase: BattlePhase,
    first_mover: Side,
    commands_this_turn: u32,
    turn_ended: bool,
}

impl Battle {
    pub fn builder(player: FighterProfile, enemy: FighterProfile) -> BattleBuilder {
        BattleBuilder {
            player,
            enemy,
            config: BattleConfig::default(),
            seed: 0,
            rng: Arc::new(PcgRng),
            companions: [None, None],
            statuses: Vec::new(),
        }
    }

    pub fn new(player: FighterProfile, enemy: FighterProfile) -> Self {
        Self::builder(player, enemy).build()
    }

    // ===== queries =====

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    pub fn fighters(&self) -> &[Fighter; 2] {
        &self.fighters
    }

    pub fn context(&self) -> &BattleContext {
        &self.context
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn first_mover(&self) -> Side {
        self.first_mover
    }

    pub fn commands_this_turn(&self) -> u32 {
        self.commands_this_turn
    }

    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            BattlePhase::Finished(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.result().is_some()
    }

    /// Side currently issuing commands.
    pub fn active_side(&self) -> Option<Side> {
        match self.phase {
            BattlePhase::InTurn(side) => Some(side),
            _ => None,
        }
    }

    /// True once the active side can issue no further commands this turn.
    pub fn turn_over(&self) -> bool {
        match self.phase {
            BattlePhase::InTurn(side) => {
                self.turn_ended
                    || self.fighter(side).ap() == 0
                    || self.commands_this_turn >= self.config.max_commands_per_turn
            }
            BattlePhase::Finished(_) => true,
            _ => false,
        }
    }

    /// AP the action would cost `side` right now, passives included.
    pub fn action_cost(&self, side: Side, action: &ActionDefinition) -> u32 {
        passive::effective_action_cost(
            self.fighter(side),
            self.fighter(side.opponent()),
            action,
            &self.context,
        )
    }

    /// Checks that `side` may use the action now and returns its definition.
    pub fn can_use_action(
        &self,
        side: Side,
        action: &ActionId,
    ) -> Result<Arc<ActionDefinition>, CommandError> {
        let actor = self.fighter(side);
        let definition = actor
            .mask()
            .action(action)
            .cloned()
            .ok_or_else(|| CommandError::ActionNotAvailable {
                action: action.clone(),
            })?;
        actor.check_action(&definition, self.action_cost(side, &definition))?;
        Ok(definition)
    }

    pub fn can_change_mask(&self, side: Side, mask: &MaskId) -> Result<(), CommandError> {
        self.fighter(side)
            .check_mask_change(mask, self.config.mask_change_ap_cost)
            .map(|_| ())
    }

    // ===== debug hook =====

    /// Force the next damaging hit by `side` to deal exactly `amount`.
    ///
    /// The value bypasses rounding and its floor of 1, so `0` lands a
    /// harmless hit.
    pub fn force_next_damage(&mut self, side: Side, amount: u32) {
        self.context.force_next_damage(side, amount);
    }

    // ===== lifecycle =====

    /// Roll initiative. The faster fighter opens; the player wins ties.
    pub fn start(&mut self) -> Result<Side, BattleError> {
        if self.phase != BattlePhase::NotStarted {
            return Err(BattleError::AlreadyStarted);
        }
        let player_spd = self.fighter(Side::Player).effective_spd();
        let enemy_spd = self.fighter(Side::Enemy).effective_spd();
        let first = if player_spd >= enemy_spd {
            Side::Player
        } else {
            Side::Enemy
        };
        self.first_mover = first;
        self.phase = BattlePhase::AwaitingTurn(first);
        self.settle();
        Ok(first)
    }

    pub fn begin_turn(&mut self) -> Result<TurnOpening, BattleError> {
        let side = match self.phase {
            BattlePhase::AwaitingTurn(side) => side,
            BattlePhase::NotStarted => return Err(BattleError::NotStarted),
            BattlePhase::InTurn(side) => return Err(BattleError::TurnInProgress(side)),
            BattlePhase::Finished(_) => return Err(BattleError::BattleOver),
        };

        if side == self.first_mover {
            self.context.advance_turn();
        }
        self.context.reset_turn_tracking();
        self.commands_this_turn = 0;
        self.turn_ended = false;

        let mut effects = EffectLog::default();
        for fighter in &mut self.fighters {
            for change in fighter.purge_expired_statuses() {
                effects.status(fighter.side(), change);
            }
        }

        let fighter = &mut self.fighters[side.index()];
        let ap = fighter.begin_turn(self.config.base_ap_per_turn);
        let tick_damage = fighter.apply_tick_damage(true);
        if tick_damage > 0 {
            resolve::notify_hp_changed(fighter, &mut self.context, &mut effects);
        }

        let companion = if self.fighters.iter().all(Fighter::is_alive) {
            resolve::companion_strike(&mut self.fighters, side, &mut self.context, &self.config)
        } else {
            None
        };

        self.phase = BattlePhase::InTurn(side);
        let result = self.settle();
        Ok(TurnOpening {
            side,
            turn_number: self.context.turn_number(),
            ap,
            tick_damage,
            companion,
            effects,
            result,
        })
    }

    /// Apply one command for the active side.
    ///
    /// Every call counts toward the per-turn command limit, rejected ones
    /// included. A rejected command leaves the battle untouched.
    pub fn submit(&mut self, command: Command) -> Result<CommandOutcome, BattleError> {
        let side = self.require_turn()?;
        if self.turn_ended {
            return Err(BattleError::TurnAlreadyEnded);
        }
        let limit = self.config.max_commands_per_turn;
        if self.commands_this_turn >= limit {
            return Err(BattleError::CommandLimitReached(limit));
        }
        self.commands_this_turn += 1;

        match command {
            Command::EndTurn => {
                self.turn_ended = true;
                Ok(CommandOutcome::TurnEnded)
            }
            Command::ChangeMask(mask) => {
                let change = self.change_mask(side, &mask)?;
                Ok(CommandOutcome::MaskChanged(change))
            }
            Command::UseAction(action) => {
                let outcome = self.use_action(side, &action)?;
                Ok(CommandOutcome::Action(outcome))
            }
        }
    }

    pub fn end_turn(&mut self) -> Result<TurnClosing, BattleError> {
        let side = self.require_turn()?;
        let forced = !self.turn_ended
            && self.fighter(side).ap() > 0
            && self.commands_this_turn >= self.config.max_commands_per_turn;

        let mut effects = EffectLog::default();
        let Combatants { actor, opponent } = Combatants::split(&mut self.fighters, side);

        let hooks = passive::hooks_for(actor.passive());
        if let Some(effect) = hooks.on_turn_end(actor, opponent, &mut self.context) {
            effects.passive(actor, effect);
        }

        let tick_damage = actor.apply_tick_damage(false);
        if tick_damage > 0 {
            resolve::notify_hp_changed(actor, &mut self.context, &mut effects);
        }
        actor.tick_statuses();
        for change in actor.purge_expired_statuses() {
            effects.status(side, change);
        }
        actor.finish_turn();

        self.phase = BattlePhase::AwaitingTurn(side.opponent());
        let result = self.settle();
        Ok(TurnClosing {
            side,
            tick_damage,
            forced,
            effects,
            result,
        })
    }

    // ===== internals =====

    fn require_turn(&self) -> Result<Side, BattleError> {
        match self.phase {
            BattlePhase::InTurn(side) => Ok(side),
            BattlePhase::NotStarted => Err(BattleError::NotStarted),
            BattlePhase::AwaitingTurn(_) => Err(BattleError::TurnNotInProgress),
            BattlePhase::Finished(_) => Err(BattleError::BattleOver),
        }
    }

    fn change_mask(&mut self, side: Side, target: &MaskId) -> Result<MaskChange, CommandError> {
        let cost = self.config.mask_change_ap_cost;
        let fighter = &mut self.fighters[side.index()];
        let mask = fighter.check_mask_change(target, cost)?;
        let from = fighter.mask().id.clone();

        fighter.spend(cost, 0);
        fighter.change_mask(mask);
        let inertia = fighter.apply_inertia();

        Ok(MaskChange {
            side,
            from,
            to: target.clone(),
            ap_spent: cost,
            inertia,
            ap_remaining: fighter.ap(),
        })
    }

    fn use_action(&mut self, side: Side, action: &ActionId) -> Result<ActionOutcome, CommandError> {
        let definition = self.can_use_action(side, action)?;
        let outcome = resolve::execute_action(
            &mut self.fighters,
            side,
            &definition,
            &mut self.context,
            &self.config,
        );
        self.settle();
        Ok(outcome)
    }

    /// Finish the battle if a fighter is down. Returns the result once finished.
    fn settle(&mut self) -> Option<BattleResult> {
        if let BattlePhase::Finished(result) = self.phase {
            return Some(result);
        }
        let player_alive = self.fighter(Side::Player).is_alive();
        let enemy_alive = self.fighter(Side::Enemy).is_alive();
        if player_alive && enemy_alive {
            return None;
        }
        let winner = match (player_alive, enemy_alive) {
            (true, false) => Some(Side::Player),
            (false, true) => Some(Side::Enemy),
            _ => None,
        };
        let result = BattleResult {
            winner,
            turns: self.context.turn_number(),
        };
        self.phase = BattlePhase::Finished(result);
        Some(result)
    }
}
