//! Content factory for loading powers from a data directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use power_core::{EngineConfig, Power};
use tracing::debug;

use crate::catalog::PowerCatalog;
use crate::loaders::{ConfigLoader, EffectLoader, LoadResult, PowerLoader};
use crate::registry::EffectRegistry;

/// Content factory that loads all power content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml    (optional)
/// ├── effects.ron    (optional)
/// └── powers.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(path = %path.display(), "no engine config, using defaults");
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load effect aliases from `effects.ron`, or an empty registry when absent.
    pub fn load_effects(&self) -> LoadResult<EffectRegistry> {
        let path = self.data_dir.join("effects.ron");
        if !path.exists() {
            return Ok(EffectRegistry::new());
        }
        EffectLoader::load(&path)
    }

    /// Catalog of built-in powers wired to the directory's aliases and the
    /// load defaults of `config`.
    pub fn load_catalog(&self, config: &EngineConfig) -> LoadResult<PowerCatalog> {
        let registry = self.load_effects()?;
        Ok(PowerCatalog::with_builtins(
            Arc::new(registry),
            config.load_defaults,
        ))
    }

    /// Load powers from `powers.toml`.
    pub fn load_powers(&self, catalog: &PowerCatalog) -> LoadResult<Vec<Box<dyn Power>>> {
        PowerLoader::load(&self.powers_path(), catalog)
    }

    pub fn powers_path(&self) -> PathBuf {
        self.data_dir.join("powers.toml")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
