use crate::stats::StatMultiplier;

/// Status categories known to the rules.
///
/// A fighter carries at most one active status per type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::Display,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusType {
    Bleed,
    Burn,
    Poison,
    Expose,
    Silence,
    GuardBreak,
    Exhausted,
    Weaken,
    Fortify,
}

impl StatusType {
    /// Control statuses restrict what the victim can do rather than hurting it.
    pub const fn is_control(self) -> bool {
        matches!(
            self,
            Self::Silence | Self::GuardBreak | Self::Exhausted | Self::Weaken
        )
    }
}

/// Authored description of a timed status.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDefinition {
    pub kind: StatusType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Turns the status lasts when freshly applied.
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_at_turn_start: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_at_turn_end: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub multiplier: StatMultiplier,
    /// Blocks magical actions while active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prevents_magic: bool,
    /// Blocks Defense-category actions while active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prevents_defense: bool,
    /// AP withheld at the start of each of the bearer's turns.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ap_penalty: u32,
}

impl StatusDefinition {
    pub fn new(kind: StatusType, duration: u32) -> Self {
        Self {
            kind,
            description: String::new(),
            duration,
            tick_damage: 0,
            tick_at_turn_start: false,
            tick_at_turn_end: false,
            multiplier: StatMultiplier::ONE,
            prevents_magic: false,
            prevents_defense: false,
            ap_penalty: 0,
        }
    }

    pub fn with_tick(mut self, damage: u32, at_start: bool, at_end: bool) -> Self {
        self.tick_damage = damage;
        self.tick_at_turn_start = at_start;
        self.tick_at_turn_end = at_end;
        self
    }

    pub fn with_multiplier(mut self, multiplier: StatMultiplier) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_ap_penalty(mut self, ap_penalty: u32) -> Self {
        self.ap_penalty = ap_penalty;
        self
    }

    pub fn preventing_magic(mut self) -> Self {
        self.prevents_magic = true;
        self
    }

    pub fn preventing_defense(mut self) -> Self {
        self.prevents_defense = true;
        self
    }
}
