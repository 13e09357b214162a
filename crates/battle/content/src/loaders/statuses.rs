//! Status definition loader.
//!
//! RON format: `Vec<StatusSpec>`. An entry without an `id` is the base
//! definition of its type and is addressed by the type name (`"Weaken"`).
//! Entries with an explicit id are variants, so a short and a long Weaken
//! can sit side by side.

use std::path::Path;

use battle_core::{StatMultiplier, StatusDefinition, StatusId, StatusType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Authored status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusSpec {
    #[serde(default)]
    pub id: Option<StatusId>,
    pub kind: StatusType,
    #[serde(default)]
    pub description: String,
    pub duration: u32,
    #[serde(default)]
    pub tick_damage: u32,
    #[serde(default)]
    pub tick_at_turn_start: bool,
    #[serde(default)]
    pub tick_at_turn_end: bool,
    #[serde(default)]
    pub multiplier: StatMultiplier,
    #[serde(default)]
    pub prevents_magic: bool,
    #[serde(default)]
    pub prevents_defense: bool,
    #[serde(default)]
    pub ap_penalty: u32,
}

impl StatusSpec {
    /// Whether this entry is the base definition of its type.
    pub fn is_base(&self) -> bool {
        self.id.is_none()
    }

    /// The id actions use to reference this entry.
    pub fn reference(&self) -> StatusId {
        self.id
            .clone()
            .unwrap_or_else(|| StatusId::new(self.kind.to_string()))
    }

    pub fn into_definition(self) -> StatusDefinition {
        StatusDefinition {
            kind: self.kind,
            description: self.description,
            duration: self.duration,
            tick_damage: self.tick_damage,
            tick_at_turn_start: self.tick_at_turn_start,
            tick_at_turn_end: self.tick_at_turn_end,
            multiplier: self.multiplier,
            prevents_magic: self.prevents_magic,
            prevents_defense: self.prevents_defense,
            ap_penalty: self.ap_penalty,
        }
    }
}

pub struct StatusLoader;

impl StatusLoader {
    pub fn parse(content: &str) -> LoadResult<Vec<StatusSpec>> {
        parse_ron(content, "status catalog")
    }

    pub fn load(path: &Path) -> LoadResult<Vec<StatusSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_fields() {
        let statuses = StatusLoader::parse(
            r#"[
                (kind: Burn, duration: 3, tick_damage: 4, tick_at_turn_end: true),
                (kind: Silence, duration: 1, prevents_magic: true),
                (id: Some("brief_silence"), kind: Silence, duration: 0, prevents_magic: true),
            ]"#,
        )
        .unwrap();
        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses[0].kind, StatusType::Burn);
        assert!(statuses[0].tick_at_turn_end);
        assert!(!statuses[0].tick_at_turn_start);
        assert!(statuses[1].prevents_magic);
        assert_eq!(statuses[1].multiplier, StatMultiplier::ONE);

        assert!(statuses[1].is_base());
        assert_eq!(statuses[1].reference().as_str(), "Silence");
        assert!(!statuses[2].is_base());
        assert_eq!(statuses[2].reference().as_str(), "brief_silence");
        assert_eq!(statuses[2].clone().into_definition().duration, 0);
    }
}
