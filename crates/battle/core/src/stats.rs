//! Base stat blocks and multiplicative modifiers.
//!
//! Derived values always follow the same chain:
//! `base × mask multiplier × product of status multipliers`.
//! Maximum HP/MP are rounded, the combat stats stay fractional because they
//! only ever appear in ratios.

use core::iter::Product;
use core::ops::{Mul, MulAssign};

/// The seven stats every fighter carries.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::Display, strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    #[strum(serialize = "HP")]
    Hp,
    #[strum(serialize = "MP")]
    Mp,
    #[strum(serialize = "ATK")]
    Atk,
    #[strum(serialize = "DEF")]
    Def,
    #[strum(serialize = "MAG")]
    Mag,
    #[strum(serialize = "RES")]
    Res,
    #[strum(serialize = "SPD")]
    Spd,
}

/// Authored base stats. Immutable once loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StatBlock {
    pub hp: u32,
    pub mp: u32,
    pub atk: u32,
    pub def: u32,
    pub mag: u32,
    pub res: u32,
    pub spd: u32,
}

impl StatBlock {
    pub const fn new(hp: u32, mp: u32, atk: u32, def: u32, mag: u32, res: u32, spd: u32) -> Self {
        Self {
            hp,
            mp,
            atk,
            def,
            mag,
            res,
            spd,
        }
    }

    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Mp => self.mp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Mag => self.mag,
            StatKind::Res => self.res,
            StatKind::Spd => self.spd,
        }
    }
}

/// Per-stat multipliers. Missing fields default to 1.0 when deserialized.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StatMultiplier {
    pub hp: f32,
    pub mp: f32,
    pub atk: f32,
    pub def: f32,
    pub mag: f32,
    pub res: f32,
    pub spd: f32,
}

impl StatMultiplier {
    /// Identity multiplier.
    pub const ONE: Self = Self::uniform(1.0);

    pub const fn uniform(value: f32) -> Self {
        Self {
            hp: value,
            mp: value,
            atk: value,
            def: value,
            mag: value,
            res: value,
            spd: value,
        }
    }

    pub const fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Mp => self.mp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Mag => self.mag,
            StatKind::Res => self.res,
            StatKind::Spd => self.spd,
        }
    }

    /// Returns a copy with one stat replaced.
    #[must_use]
    pub const fn with(mut self, kind: StatKind, value: f32) -> Self {
        match kind {
            StatKind::Hp => self.hp = value,
            StatKind::Mp => self.mp = value,
            StatKind::Atk => self.atk = value,
            StatKind::Def => self.def = value,
            StatKind::Mag => self.mag = value,
            StatKind::Res => self.res = value,
            StatKind::Spd => self.spd = value,
        }
        self
    }

    /// Elementwise product of two multipliers.
    #[must_use]
    pub fn compose(self, other: Self) -> Self {
        Self {
            hp: self.hp * other.hp,
            mp: self.mp * other.mp,
            atk: self.atk * other.atk,
            def: self.def * other.def,
            mag: self.mag * other.mag,
            res: self.res * other.res,
            spd: self.spd * other.spd,
        }
    }
}

impl Default for StatMultiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl Mul for StatMultiplier {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

impl MulAssign for StatMultiplier {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.compose(rhs);
    }
}

impl Product for StatMultiplier {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, Self::compose)
    }
}

impl<'a> Product<&'a StatMultiplier> for StatMultiplier {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().product()
    }
}
