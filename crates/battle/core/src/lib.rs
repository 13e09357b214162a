//! Deterministic combat rules for one-on-one mask battles.
//!
//! `battle-core` defines fighters, masks, actions and statuses, resolves
//! actions through a fixed pipeline and drives turns through
//! [`engine::Battle`]. It performs no I/O: content loaders and runtimes depend
//! on the types re-exported here and feed commands in one at a time.
pub mod config;
pub mod definition;
pub mod engine;
pub mod error;
pub mod passive;
pub mod resolve;
pub mod rng;
pub mod state;
pub mod stats;

pub use config::BattleConfig;
pub use definition::{
    ActionCategory, ActionDefinition, ActionFlags, ActionId, ActionModifiers, AiProfile, AiRule,
    ConditionalBonus, FighterProfile, MaskDefinition, MaskId, PassiveKind, StatusDefinition,
    StatusId, StatusRemoval, StatusType,
};
pub use engine::{
    Battle, BattleBuilder, BattleError, BattlePhase, BattleResult, Command, CommandError,
    CommandOutcome, MaskChange, Resource, TurnClosing, TurnOpening,
};
pub use error::{ErrorSeverity, GameError};
pub use passive::{PassiveEffect, PassiveEvent, PassiveHooks, hooks_for};
pub use resolve::{ActionOutcome, CompanionOutcome, EffectLog, StatusEvent, execute_action};
pub use rng::{PcgRng, RngOracle};
pub use state::{
    ActiveStatus, BattleContext, Companion, Fighter, HpChange, Side, StatusChange, StatusList,
};
pub use stats::{StatBlock, StatKind, StatMultiplier};
