//! Content factory for loading a content directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use battle_core::{AiProfile, BattleConfig};

use crate::catalog::Catalog;
use crate::loaders::{
    ActionLoader, ActionSpec, AiLoader, ConfigLoader, FighterLoader, FighterSpec, LoadResult,
    MaskLoader, MaskSpec, StatusLoader, StatusSpec,
};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── statuses.ron
/// ├── actions.ron
/// ├── masks.ron
/// ├── fighters.ron
/// └── ai.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle rules from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("battle.toml"))
    }

    pub fn load_statuses(&self) -> LoadResult<Vec<StatusSpec>> {
        StatusLoader::load(&self.data_dir.join("statuses.ron"))
    }

    pub fn load_actions(&self) -> LoadResult<Vec<ActionSpec>> {
        ActionLoader::load(&self.data_dir.join("actions.ron"))
    }

    pub fn load_masks(&self) -> LoadResult<Vec<MaskSpec>> {
        MaskLoader::load(&self.data_dir.join("masks.ron"))
    }

    pub fn load_fighters(&self) -> LoadResult<Vec<FighterSpec>> {
        FighterLoader::load(&self.data_dir.join("fighters.ron"))
    }

    pub fn load_ai_profiles(&self) -> LoadResult<HashMap<String, AiProfile>> {
        AiLoader::load(&self.data_dir.join("ai.ron"))
    }

    /// Load every catalog file and resolve cross references.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        Ok(Catalog::resolve(
            self.load_statuses()?,
            self.load_actions()?,
            self.load_masks()?,
            self.load_fighters()?,
            self.load_ai_profiles()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
