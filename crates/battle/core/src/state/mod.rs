//! Mutable per-battle state: fighters, their statuses, companions and the
//! shared battle context.

mod companion;
mod context;
mod fighter;
mod status;

pub use companion::Companion;
pub use context::BattleContext;
pub use fighter::{Fighter, HpChange};
pub use status::{ActiveStatus, StatusChange, StatusList};

/// One of the two principal combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Self::Player => 0,
            Self::Enemy => 1,
        }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }
}
