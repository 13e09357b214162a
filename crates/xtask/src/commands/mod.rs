//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod content;
mod simulate;

pub use content::Content;
pub use simulate::Simulate;

use std::path::Path;

use anyhow::{Context, Result};
use battle_content::{Catalog, ConfigLoader, ContentFactory};
use battle_core::BattleConfig;

/// Catalog and rules from `dir`, or the embedded defaults.
fn load_content(dir: Option<&Path>) -> Result<(Catalog, BattleConfig)> {
    match dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let catalog = factory
                .load_catalog()
                .with_context(|| format!("Failed to load content from {}", dir.display()))?;
            Ok((catalog, factory.load_config()?))
        }
        None => Ok((Catalog::embedded()?, ConfigLoader::embedded()?)),
    }
}
