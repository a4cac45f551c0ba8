//! Content loaders for reading power data from files.
//!
//! This module converts TOML/RON files into power-core values and
//! configured powers.

pub mod config;
pub mod effects;
pub mod factory;
pub mod powers;

pub use config::ConfigLoader;
pub use effects::EffectLoader;
pub use factory::ContentFactory;
pub use powers::{PowerEntry, PowerFile, PowerLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
