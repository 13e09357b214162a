use async_trait::async_trait;
use battle_core::{AiProfile, Battle, Command, Side};
use behavior_tree::{Behavior, Selector};

use super::blackboard::Blackboard;
use super::tree::decision_tree;
use crate::api::{CommandProvider, Result};

/// Provider driven by an [`AiProfile`].
///
/// Decisions depend only on the battle snapshot, so two runs from the same
/// seed pick the same commands.
pub struct AiCommandProvider {
    profile: AiProfile,
    tree: Selector<Blackboard>,
}

impl AiCommandProvider {
    pub fn new(profile: AiProfile) -> Self {
        let tree = decision_tree(&profile);
        Self { profile, tree }
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    /// Picks the next command for `side` without waiting.
    pub fn decide(&self, side: Side, battle: &Battle) -> Command {
        let mut board = Blackboard::observe(battle, side, &self.profile);
        self.tree.tick(&mut board);
        let command = board.into_decision();
        tracing::debug!(
            side = %side,
            hp = battle.fighter(side).hp(),
            ap = battle.fighter(side).ap(),
            ?command,
            "ai decision"
        );
        command
    }
}

#[async_trait]
impl CommandProvider for AiCommandProvider {
    async fn next_command(&mut self, side: Side, battle: &Battle) -> Result<Command> {
        Ok(self.decide(side, battle))
    }
}
