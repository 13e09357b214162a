//! Asynchronous seam for sourcing each side's commands.
//!
//! The runtime asks a [`CommandProvider`] for one command at a time and
//! re-asks until the turn is over, so providers never plan a whole turn.
use std::collections::VecDeque;

use async_trait::async_trait;
use battle_core::{Battle, Command, Side};
use tokio::sync::mpsc;

use super::errors::{Result, RuntimeError};

/// Source of commands for one side of a battle.
///
/// Implementations can be human input, scripted fixtures or AI policies.
/// `battle` is a read-only view of the battle while `side` is in its turn.
#[async_trait]
pub trait CommandProvider: Send {
    async fn next_command(&mut self, side: Side, battle: &Battle) -> Result<Command>;
}

/// Replays a fixed list of commands, then ends every turn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Command>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Command>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Commands not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl CommandProvider for ScriptedProvider {
    async fn next_command(&mut self, _side: Side, _battle: &Battle) -> Result<Command> {
        Ok(self.script.pop_front().unwrap_or(Command::EndTurn))
    }
}

/// Waits for commands pushed through an mpsc channel, e.g. by a UI task.
#[derive(Debug)]
pub struct ChannelProvider {
    rx: mpsc::Receiver<Command>,
}

impl ChannelProvider {
    pub fn new(rx: mpsc::Receiver<Command>) -> Self {
        Self { rx }
    }

    /// Creates a provider together with the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<Command>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }
}

#[async_trait]
impl CommandProvider for ChannelProvider {
    async fn next_command(&mut self, side: Side, _battle: &Battle) -> Result<Command> {
        self.rx
            .recv()
            .await
            .ok_or(RuntimeError::ProviderChannelClosed { side })
    }
}
