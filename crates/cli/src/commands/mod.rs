mod describe;
mod run;

pub use describe::Describe;
pub use run::Run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use power_content::{ContentFactory, PowerCatalog};
use power_core::{EngineConfig, Power};

/// Where power content is read from.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// Directory holding powers.toml, and optionally config.toml and effects.ron
    #[arg(long, env = "POWER_SIM_DATA", default_value = "crates/cli/data")]
    pub data_dir: PathBuf,
}

/// Everything loaded from a data directory.
pub struct LoadedContent {
    pub engine: EngineConfig,
    pub catalog: PowerCatalog,
    pub powers: Vec<Box<dyn Power>>,
}

impl ContentArgs {
    pub fn load(&self) -> Result<LoadedContent> {
        let factory = ContentFactory::new(&self.data_dir);
        let engine = factory.load_config()?;
        let catalog = factory.load_catalog(&engine)?;
        let powers = factory.load_powers(&catalog)?;
        tracing::info!(
            data_dir = %self.data_dir.display(),
            powers = powers.len(),
            "content loaded"
        );
        Ok(LoadedContent {
            engine,
            catalog,
            powers,
        })
    }
}
