use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use power_core::{Activation, EntityId, Vec3};
use power_runtime::{Runtime, RuntimeConfig, RuntimeHandle, SandboxWorld};
use tracing::info;

use super::ContentArgs;

/// Run a scripted activation session
#[derive(Parser, Debug)]
pub struct Run {
    #[command(flatten)]
    content: ContentArgs,

    /// RNG seed, overriding config.toml
    #[arg(long, env = "POWER_SIM_SEED")]
    seed: Option<u64>,

    /// Ticks to simulate after the activations
    #[arg(long, env = "POWER_SIM_TICKS", default_value_t = 400)]
    ticks: u64,

    /// Living targets placed in a ring around the caster
    #[arg(long, default_value_t = 6)]
    targets: u32,

    /// Ring radius in blocks
    #[arg(long, default_value_t = 4.0)]
    radius: f64,

    /// Durability given to the caster's item
    #[arg(long, default_value_t = 64)]
    durability: i32,
}

impl Run {
    /// Ticks advanced per progress report.
    const REPORT_EVERY: u64 = 20;

    pub async fn execute(self) -> Result<()> {
        let mut loaded = self.content.load()?;
        if let Some(seed) = self.seed {
            loaded.engine.rng_seed = Some(seed);
        }

        let world = Arc::new(SandboxWorld::default());
        let caster = world.spawn_living(0.0, 0.0, Vec3::new(0.35, 0.25, 0.2));
        world.set_durability(caster, self.durability);
        for i in 0..self.targets {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(self.targets);
            world.spawn_living(
                self.radius * angle.cos(),
                self.radius * angle.sin(),
                Vec3::ZERO,
            );
        }

        let ids: Vec<_> = loaded.powers.iter().map(|p| p.id()).collect();
        let runtime = Runtime::builder()
            .config(RuntimeConfig {
                engine: loaded.engine,
                ..RuntimeConfig::default()
            })
            .world(Arc::clone(&world))
            .powers(loaded.powers)
            .build()
            .await?;
        let handle = runtime.handle();

        for &power in &ids {
            // The second click lands inside the cooldown.
            for _ in 0..2 {
                let report = handle.activate(caster, power).await?;
                info!(power = %power, outcome = ?report.outcome, "activated");
            }
        }

        self.drive(&handle, caster).await?;

        let snapshot = handle.snapshot().await?;
        info!(
            now = %snapshot.now,
            active_tasks = snapshot.active_tasks,
            cooldowns = snapshot.cooldown_records,
            placed_blocks = snapshot.world.placed_blocks,
            active_effects = snapshot.world.active_effects,
            durability = ?world.durability(caster),
            "session finished"
        );

        drop(handle);
        runtime.shutdown().await?;
        Ok(())
    }

    async fn drive(&self, handle: &RuntimeHandle, caster: EntityId) -> Result<()> {
        let mut remaining = self.ticks;
        while remaining > 0 {
            let step = remaining.min(Self::REPORT_EVERY);
            let now = handle.advance(step).await?;
            remaining -= step;

            let snapshot = handle.snapshot().await?;
            info!(
                %now,
                tasks = snapshot.active_tasks,
                airborne = snapshot.world.airborne_transients,
                placed = snapshot.world.placed_blocks,
                "progress"
            );
            if snapshot.active_tasks == 0 && snapshot.world.airborne_transients == 0 {
                break;
            }
        }

        let retry = handle.snapshot().await?.powers;
        for (power, name) in retry {
            let report = handle.activate(caster, power).await?;
            if let Activation::Rejected(decision) = report.outcome {
                info!(%power, name, ?decision, "still gated");
            } else {
                info!(%power, name, outcome = ?report.outcome, "activated again");
            }
        }
        Ok(())
    }
}
