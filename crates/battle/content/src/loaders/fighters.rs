//! Fighter roster and AI profile loaders.

use std::collections::HashMap;
use std::path::Path;

use battle_core::{AiProfile, MaskId, StatBlock};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Authored fighter.
///
/// `starting_mask` is always available; `masks` lists the extra masks the
/// fighter may switch into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub stats: StatBlock,
    pub starting_mask: MaskId,
    #[serde(default)]
    pub masks: Vec<MaskId>,
    #[serde(default)]
    pub companion: Option<MaskId>,
    /// Key into the AI profile table.
    #[serde(default)]
    pub ai: Option<String>,
}

/// Loader for the fighter roster. RON format: `Vec<FighterSpec>`.
pub struct FighterLoader;

impl FighterLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<FighterSpec>> {
        parse_ron(content, "fighter roster")
    }

    pub fn load(path: &Path) -> LoadResult<Vec<FighterSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

/// Loader for AI profiles. RON format: `HashMap<String, AiProfile>`.
pub struct AiLoader;

impl AiLoader {
    pub fn parse(content: &str) -> LoadResult<HashMap<String, AiProfile>> {
        parse_ron(content, "AI profile")
    }

    pub fn load(path: &Path) -> LoadResult<HashMap<String, AiProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roster_and_profiles() {
        let roster = FighterLoader::parse(
            r#"[(
                id: "hero",
                stats: (hp: 100, mp: 20, atk: 12, def: 10, mag: 8, res: 9, spd: 11),
                starting_mask: "iron",
                masks: ["ember"],
                ai: Some("cautious"),
            )]"#,
        )
        .unwrap();
        assert_eq!(roster[0].stats.atk, 12);
        assert_eq!(roster[0].companion, None);

        let profiles = AiLoader::parse(
            r#"{
                "cautious": (
                    rules: [(hp_threshold: 0.3, preferred_action: Some("mend"))],
                    fallback_action: Some("slash"),
                    guard_every_n_turns: 3,
                ),
            }"#,
        )
        .unwrap();
        let cautious = &profiles["cautious"];
        assert_eq!(cautious.rules.len(), 1);
        assert_eq!(cautious.rules[0].switch_to, None);
        assert_eq!(cautious.guard_every_n_turns, 3);
    }
}
