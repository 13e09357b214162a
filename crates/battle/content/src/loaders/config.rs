//! Battle rules loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML. Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse battle config TOML: {}", e))?;
        Ok(config)
    }

    /// Rules shipped with the crate.
    pub fn embedded() -> LoadResult<BattleConfig> {
        Self::parse(include_str!("../../data/battle.toml"))
    }

    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
