//! Mask catalog loader.
//!
//! RON format: `Vec<MaskSpec>`. Actions are referenced by id.

use std::path::Path;

use battle_core::{ActionId, MaskId, PassiveKind, StatMultiplier, StatusType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Authored mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskSpec {
    pub id: MaskId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub multiplier: StatMultiplier,
    #[serde(default)]
    pub vulnerability: Option<StatusType>,
    #[serde(default)]
    pub actions: Vec<ActionId>,
    #[serde(default)]
    pub passive: PassiveKind,
    #[serde(default)]
    pub change_cooldown: u32,
    #[serde(default)]
    pub disallow_consecutive_change: bool,
    #[serde(default)]
    pub inertia: Option<u32>,
    #[serde(default)]
    pub ap_bonus: u32,
}

pub struct MaskLoader;

impl MaskLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<MaskSpec>> {
        parse_ron(content, "mask catalog")
    }

    pub fn load(path: &Path) -> LoadResult<Vec<MaskSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}
