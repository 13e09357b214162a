//! Topic-based event bus for battle progress.
//!
//! Presentation layers subscribe to the topics they render; nothing in the
//! battle loop waits on a subscriber.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::BattleEvent;
