use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Side;
use super::companion::Companion;
use crate::config::BattleConfig;
use crate::definition::{StatusDefinition, StatusType};
use crate::rng::{PcgRng, RngOracle, RollPurpose, compute_seed};

/// Per-battle bookkeeping shared by both fighters.
pub struct BattleContext {
    turn_number: u32,
    last_stand_used: [bool; BattleConfig::SIDES],
    first_attack_used: [bool; BattleConfig::SIDES],
    actions_this_turn: u32,
    physical_hit_received: bool,
    companions: [Option<Companion>; BattleConfig::SIDES],
    forced_damage: [Option<u32>; BattleConfig::SIDES],
    status_library: HashMap<StatusType, Arc<StatusDefinition>>,
    rng: Arc<dyn RngOracle>,
    seed: u64,
    rolls: u64,
}

impl BattleContext {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Arc::new(PcgRng))
    }

    pub fn with_rng(seed: u64, rng: Arc<dyn RngOracle>) -> Self {
        Self {
            turn_number: 0,
            last_stand_used: [false; BattleConfig::SIDES],
            first_attack_used: [false; BattleConfig::SIDES],
            actions_this_turn: 0,
            physical_hit_received: false,
            companions: [None, None],
            forced_damage: [None, None],
            status_library: HashMap::new(),
            rng,
            seed,
            rolls: 0,
        }
    }

    // ===== turn tracking =====

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub(crate) fn advance_turn(&mut self) -> u32 {
        self.turn_number = self.turn_number.saturating_add(1);
        self.turn_number
    }

    pub(crate) fn reset_turn_tracking(&mut self) {
        self.actions_this_turn = 0;
        self.physical_hit_received = false;
    }

    pub fn actions_this_turn(&self) -> u32 {
        self.actions_this_turn
    }

    pub(crate) fn record_action(&mut self) {
        self.actions_this_turn = self.actions_this_turn.saturating_add(1);
    }

    pub fn physical_hit_received(&self) -> bool {
        self.physical_hit_received
    }

    /// Marks the per-turn physical hit flag. Returns true if it was unset.
    pub(crate) fn take_first_physical_hit(&mut self) -> bool {
        !std::mem::replace(&mut self.physical_hit_received, true)
    }

    // ===== once-per-battle flags =====

    pub fn first_attack_used(&self, side: Side) -> bool {
        self.first_attack_used[side.index()]
    }

    /// Consumes the first-attack bonus for `side`. Returns true if it was available.
    pub(crate) fn take_first_attack(&mut self, side: Side) -> bool {
        !std::mem::replace(&mut self.first_attack_used[side.index()], true)
    }

    pub fn last_stand_used(&self, side: Side) -> bool {
        self.last_stand_used[side.index()]
    }

    /// Consumes the last-stand trigger for `side`. Returns true if it was available.
    pub(crate) fn take_last_stand(&mut self, side: Side) -> bool {
        !std::mem::replace(&mut self.last_stand_used[side.index()], true)
    }

    // ===== debug hook =====

    /// Force the next damaging hit dealt by `side` to deal exactly `amount`.
    pub fn force_next_damage(&mut self, side: Side, amount: u32) {
        self.forced_damage[side.index()] = Some(amount);
    }

    pub fn forced_damage(&self, side: Side) -> Option<u32> {
        self.forced_damage[side.index()]
    }

    pub(crate) fn take_forced_damage(&mut self, side: Side) -> Option<u32> {
        self.forced_damage[side.index()].take()
    }

    // ===== companions =====

    pub fn companion(&self, side: Side) -> Option<&Companion> {
        self.companions[side.index()].as_ref()
    }

    pub(crate) fn companion_mut(&mut self, side: Side) -> Option<&mut Companion> {
        self.companions[side.index()].as_mut()
    }

    pub(crate) fn set_companion(&mut self, side: Side, companion: Companion) {
        self.companions[side.index()] = Some(companion);
    }

    // ===== status library =====

    pub fn register_status(&mut self, definition: Arc<StatusDefinition>) {
        self.status_library.insert(definition.kind, definition);
    }

    /// Authored definition for a status type, if the content provides one.
    pub fn status_definition(&self, kind: StatusType) -> Option<Arc<StatusDefinition>> {
        self.status_library.get(&kind).cloned()
    }

    // ===== randomness =====

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn next_seed(&mut self, side: Side, purpose: RollPurpose) -> u64 {
        let seed = compute_seed(self.seed, self.rolls, side.index() as u32, purpose);
        self.rolls = self.rolls.wrapping_add(1);
        seed
    }

    /// Percentage roll in 1..=100.
    pub(crate) fn roll_percent(&mut self, side: Side, purpose: RollPurpose) -> u32 {
        let seed = self.next_seed(side, purpose);
        self.rng.roll_d100(seed)
    }

    pub(crate) fn roll_range(
        &mut self,
        side: Side,
        purpose: RollPurpose,
        min: u32,
        max: u32,
    ) -> u32 {
        let seed = self.next_seed(side, purpose);
        self.rng.range(seed, min, max)
    }
}

impl fmt::Debug for BattleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleContext")
            .field("turn_number", &self.turn_number)
            .field("last_stand_used", &self.last_stand_used)
            .field("first_attack_used", &self.first_attack_used)
            .field("actions_this_turn", &self.actions_this_turn)
            .field("physical_hit_received", &self.physical_hit_received)
            .field("companions", &self.companions)
            .field("forced_damage", &self.forced_damage)
            .field("seed", &self.seed)
            .field("rolls", &self.rolls)
            .finish_non_exhaustive()
    }
}
