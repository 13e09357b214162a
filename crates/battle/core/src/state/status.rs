use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::definition::{StatusDefinition, StatusType};
use crate::stats::StatMultiplier;

/// A status instance on a fighter.
///
/// `remaining == 0` means expired: the instance no longer affects anything
/// and is purged at the next cleanup.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveStatus {
    definition: Arc<StatusDefinition>,
    remaining: u32,
}

impl ActiveStatus {
    pub fn new(definition: Arc<StatusDefinition>) -> Self {
        Self {
            remaining: definition.duration,
            definition,
        }
    }

    pub fn definition(&self) -> &Arc<StatusDefinition> {
        &self.definition
    }

    pub fn kind(&self) -> StatusType {
        self.definition.kind
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Replace the definition and reset the duration to its nominal value.
    fn refresh(&mut self, definition: Arc<StatusDefinition>) {
        self.remaining = definition.duration;
        self.definition = definition;
    }

    /// Shift the remaining duration, flooring at zero.
    fn shift(&mut self, delta: i32) {
        self.remaining = self.remaining.saturating_add_signed(delta);
    }

    fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// What happened to a fighter's status list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusChange {
    Applied { kind: StatusType, turns: u32 },
    Refreshed { kind: StatusType, turns: u32 },
    Reduced { kind: StatusType, turns: u32 },
    Removed { kind: StatusType },
    Expired { kind: StatusType },
}

impl StatusChange {
    pub fn kind(&self) -> StatusType {
        match *self {
            Self::Applied { kind, .. }
            | Self::Refreshed { kind, .. }
            | Self::Reduced { kind, .. }
            | Self::Removed { kind }
            | Self::Expired { kind } => kind,
        }
    }
}

/// Active statuses, at most one per [`StatusType`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusList {
    entries: ArrayVec<ActiveStatus, { BattleConfig::MAX_ACTIVE_STATUSES }>,
}

impl StatusList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry, expired ones included.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.entries.iter()
    }

    /// Entries that still affect their bearer.
    pub fn active(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.entries.iter().filter(|status| !status.is_expired())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, kind: StatusType) -> Option<&ActiveStatus> {
        self.entries.iter().find(|status| status.kind() == kind)
    }

    pub fn contains(&self, kind: StatusType) -> bool {
        self.active().any(|status| status.kind() == kind)
    }

    /// Insert a status or refresh the existing one of the same type, then
    /// shift the resulting duration by `duration_delta`.
    pub fn apply(
        &mut self,
        definition: Arc<StatusDefinition>,
        duration_delta: i32,
    ) -> StatusChange {
        let kind = definition.kind;
        if let Some(existing) = self.entries.iter_mut().find(|status| status.kind() == kind) {
            existing.refresh(definition);
            existing.shift(duration_delta);
            return StatusChange::Refreshed {
                kind,
                turns: existing.remaining,
            };
        }

        let mut status = ActiveStatus::new(definition);
        status.shift(duration_delta);
        let turns = status.remaining;
        // One slot per status type, so the list never overflows.
        let _ = self.entries.try_push(status);
        StatusChange::Applied { kind, turns }
    }

    pub fn remove(&mut self, kind: StatusType) -> Option<StatusChange> {
        let index = self.entries.iter().position(|status| status.kind() == kind)?;
        self.entries.remove(index);
        Some(StatusChange::Removed { kind })
    }

    pub fn reduce(&mut self, kind: StatusType, amount: u32) -> Option<StatusChange> {
        let status = self.entries.iter_mut().find(|status| status.kind() == kind)?;
        status.shift(-(amount.min(i32::MAX as u32) as i32));
        Some(StatusChange::Reduced {
            kind,
            turns: status.remaining,
        })
    }

    pub fn tick_all(&mut self) {
        self.entries.iter_mut().for_each(ActiveStatus::tick);
    }

    /// Drop expired entries and report which types went away.
    pub fn purge_expired(&mut self) -> Vec<StatusChange> {
        let expired = self
            .entries
            .iter()
            .filter(|status| status.is_expired())
            .map(|status| StatusChange::Expired {
                kind: status.kind(),
            })
            .collect();
        self.entries.retain(|status| !status.is_expired());
        expired
    }

    pub fn multiplier(&self) -> StatMultiplier {
        self.active().map(|status| status.definition.multiplier).product()
    }

    pub fn prevents_magic(&self) -> bool {
        self.active().any(|status| status.definition.prevents_magic)
    }

    pub fn prevents_defense(&self) -> bool {
        self.active().any(|status| status.definition.prevents_defense)
    }

    pub fn ap_penalty(&self) -> u32 {
        self.active()
            .map(|status| status.definition.ap_penalty)
            .fold(0, u32::saturating_add)
    }

    /// Total tick damage due at turn start (`at_start`) or turn end.
    pub fn tick_damage(&self, at_start: bool) -> u32 {
        self.active()
            .filter(|status| {
                if at_start {
                    status.definition.tick_at_turn_start
                } else {
                    status.definition.tick_at_turn_end
                }
            })
            .map(|status| status.definition.tick_damage)
            .fold(0, u32::saturating_add)
    }
}
