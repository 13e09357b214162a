//! Types embedders interact with: the provider seam and runtime errors.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ChannelProvider, CommandProvider, ScriptedProvider};
