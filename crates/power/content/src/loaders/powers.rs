//! Power file loader.
//!
//! A power file is a TOML document holding an array of `[[powers]]` tables.
//! Each table names its kind and carries the persisted settings of that
//! power using the host's key names:
//!
//! ```toml
//! [[powers]]
//! kind = "aoe"
//! type = "SPEED"
//! range = 8
//! selfapplication = false
//!
//! [[powers]]
//! kind = "rainbow"
//! count = 12
//! isFire = true
//! ```

use std::path::Path;

use anyhow::Context;
use power_core::{MemorySection, Power, PowerError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::PowerCatalog;
use crate::loaders::{LoadResult, read_file};

/// One `[[powers]]` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerEntry {
    pub kind: String,
    #[serde(flatten)]
    pub settings: MemorySection,
}

impl PowerEntry {
    /// Snapshot of a configured power, ready to be written back.
    pub fn from_power(power: &dyn Power) -> Self {
        let mut settings = MemorySection::new();
        power.save(&mut settings);
        Self {
            kind: power.name().to_string(),
            settings,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerFile {
    #[serde(default)]
    pub powers: Vec<PowerEntry>,
}

/// Loader for power files.
pub struct PowerLoader;

impl PowerLoader {
    /// Load and build every power in a TOML file.
    ///
    /// Fails on the first entry whose kind or settings the catalog rejects.
    pub fn load(path: &Path, catalog: &PowerCatalog) -> LoadResult<Vec<Box<dyn Power>>> {
        let content = read_file(path)?;
        let powers = Self::parse(&content, catalog)
            .with_context(|| format!("Failed to load powers from {}", path.display()))?;
        info!(path = %path.display(), count = powers.len(), "powers loaded");
        Ok(powers)
    }

    pub fn parse(content: &str, catalog: &PowerCatalog) -> LoadResult<Vec<Box<dyn Power>>> {
        let file: PowerFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse powers TOML: {}", e))?;

        file.powers
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                catalog.build(&entry.kind, &entry.settings).map_err(|err| {
                    let severity = err.severity();
                    warn!(
                        entry = index + 1,
                        kind = %entry.kind,
                        code = err.error_code(),
                        severity = severity.as_str(),
                        "power entry rejected"
                    );
                    let context = format!(
                        "power #{} ({}) [{}, {}]",
                        index + 1,
                        entry.kind,
                        err.error_code(),
                        severity.as_str()
                    );
                    anyhow::Error::new(err).context(context)
                })
            })
            .collect()
    }

    /// Serializes `powers` back into the power file format.
    pub fn to_toml(powers: &[Box<dyn Power>]) -> LoadResult<String> {
        let file = PowerFile {
            powers: powers.iter().map(|p| PowerEntry::from_power(p.as_ref())).collect(),
        };
        toml::to_string(&file).map_err(|e| anyhow::anyhow!("Failed to serialize powers: {}", e))
    }

    pub fn save(path: &Path, powers: &[Box<dyn Power>]) -> LoadResult<()> {
        let content = Self::to_toml(powers)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
