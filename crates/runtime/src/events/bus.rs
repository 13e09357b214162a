use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::BattleEvent;

/// Routing key for [`BattleEvent`]s.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle start and result.
    Battle,
    /// Turn openings and closings.
    Turn,
    /// Resolved and rejected commands.
    Command,
}

struct Channels {
    battle: broadcast::Sender<BattleEvent>,
    turn: broadcast::Sender<BattleEvent>,
    command: broadcast::Sender<BattleEvent>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<BattleEvent> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Turn => &self.turn,
            Topic::Command => &self.command,
        }
    }
}

/// Cloneable broadcast bus with one channel per [`Topic`].
///
/// Publishing never blocks. Slow subscribers lag and lose the oldest events.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a bus whose topics each buffer `capacity` events (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                battle: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                command: broadcast::channel(capacity).0,
            }),
        }
    }

    pub fn publish(&self, event: BattleEvent) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            tracing::trace!("no subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.channels.sender(topic).subscribe()
    }

    /// One receiver per topic, in the order given.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<BattleEvent>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
