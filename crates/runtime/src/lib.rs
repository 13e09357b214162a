//! Async driver for Masquerade battles.
//!
//! The runtime owns a [`battle_core::Battle`], asks a [`CommandProvider`] for
//! every command of the active side and publishes what happened on an
//! [`EventBus`]. Providers can be human input fed through a channel, a fixed
//! script, or the rule-list AI in [`providers::ai`].
//!
//! - [`runtime`] hosts the battle loop, its builder and configuration
//! - [`api`] holds the provider trait, simple providers and errors
//! - [`events`] is the topic-based broadcast bus
//! - [`providers`] contains the computer-controlled fighter
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

pub use api::{ChannelProvider, CommandProvider, Result, RuntimeError, ScriptedProvider};
pub use events::{BattleEvent, EventBus, Topic};
pub use providers::ai::{AiCommandProvider, Blackboard};
pub use runtime::{BattleRuntime, BattleRuntimeBuilder, RuntimeConfig};
