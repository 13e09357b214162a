//! Immutable content definitions.
//!
//! Definitions are authored outside the engine and shared between fighters
//! through `Arc`. The battle never mutates them; runtime state lives in
//! [`crate::state`].

mod action;
mod ids;
mod mask;
mod profile;
mod status;

pub use action::{
    ActionCategory, ActionDefinition, ActionFlags, ActionModifiers, ConditionalBonus,
    StatusRemoval,
};
pub use ids::{ActionId, MaskId, StatusId};
pub use mask::{MaskDefinition, PassiveKind};
pub use profile::{AiProfile, AiRule, FighterProfile};
pub use status::{StatusDefinition, StatusType};
