//! Data-driven battle content and loaders.
//!
//! This crate turns authored RON/TOML files into `battle-core` definitions:
//! - Status definitions (RON)
//! - Actions, referencing statuses by id (RON)
//! - Masks, referencing actions by id (RON)
//! - Fighters and AI profiles (RON)
//! - Battle rules (TOML)
//!
//! Loaders parse authored specs; [`Catalog`] resolves the cross references
//! into shared `Arc` definitions. A playable default roster is embedded in
//! the crate and available through [`Catalog::embedded`].

pub mod catalog;
pub mod loaders;

pub use catalog::{Catalog, ContentSources, FighterEntry};
pub use loaders::{
    ActionLoader, ActionSpec, AiLoader, ConfigLoader, ContentFactory, FighterLoader, FighterSpec,
    LoadResult, MaskLoader, MaskSpec, ModifierSpec, StatusLoader, StatusSpec,
};
