//! Content loaders for reading battle data from files or embedded strings.
//!
//! Every loader offers `parse` for in-memory content and `load` for a file
//! path. Parsing only checks syntax; references are resolved by
//! [`crate::Catalog`].

pub mod actions;
pub mod config;
pub mod factory;
pub mod fighters;
pub mod masks;
pub mod statuses;

pub use actions::{ActionLoader, ActionSpec, ConditionalSpec, ModifierSpec};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use fighters::{AiLoader, FighterLoader, FighterSpec};
pub use masks::{MaskLoader, MaskSpec};
pub use statuses::{StatusLoader, StatusSpec};

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Deserialize RON content, naming `what` in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
