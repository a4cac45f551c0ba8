//! Headless power simulator.
//!
//! Loads a power data directory and either describes the configured powers
//! or runs a scripted activation session against the sandbox world.
//! Run with: `cargo run -p power-sim -- run --data-dir crates/cli/data`

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Describe, Run};

/// Item power simulator
#[derive(Parser)]
#[command(name = "power-sim")]
#[command(about = "Load item powers and exercise them in a sandbox world", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scripted activation session
    Run(Run),

    /// Print every configured power and its description
    Describe(Describe),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::setup_logging()?;

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::Describe(cmd) => cmd.execute(),
    }
}
