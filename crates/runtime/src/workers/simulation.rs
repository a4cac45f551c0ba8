//! Simulation worker that owns the tick clock and the configured powers.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs
//! activations against the sandbox world, and optionally advances ticks on
//! a fixed real-time interval.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};

use power_core::{
    ActivationContext, CooldownGate, EngineConfig, EntityId, PcgRng, Power, PowerEnv, PowerError,
    PowerId, Tick, Trigger,
};
use tracing::{debug, error, info, warn};

use crate::api::{ActivationReport, Result, RuntimeError, RuntimeSnapshot};
use crate::sandbox::SandboxWorld;
use crate::scheduler::TickScheduler;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Right-click a power as an actor.
    Activate {
        actor: EntityId,
        power: PowerId,
        reply: oneshot::Sender<Result<ActivationReport>>,
    },
    /// Remove an actor and evict its cooldown records.
    Despawn {
        actor: EntityId,
        reply: oneshot::Sender<bool>,
    },
    /// Process ticks immediately, independent of the interval.
    AdvanceTicks {
        ticks: u64,
        reply: oneshot::Sender<Tick>,
    },
    Snapshot {
        reply: oneshot::Sender<RuntimeSnapshot>,
    },
}

/// Background task that processes activation commands and ticks.
pub struct SimulationWorker {
    world: Arc<SandboxWorld>,
    scheduler: TickScheduler,
    gate: CooldownGate,
    powers: BTreeMap<PowerId, Box<dyn Power>>,
    engine: EngineConfig,
    rng: PcgRng,
    command_rx: mpsc::Receiver<Command>,
    tick_period: Option<Duration>,
}

impl SimulationWorker {
    pub fn new(
        world: Arc<SandboxWorld>,
        gate: CooldownGate,
        powers: BTreeMap<PowerId, Box<dyn Power>>,
        engine: EngineConfig,
        seed: u64,
        command_rx: mpsc::Receiver<Command>,
        tick_period: Option<Duration>,
    ) -> Self {
        info!(
            powers = powers.len(),
            seed,
            ?tick_period,
            "SimulationWorker initialized"
        );

        Self {
            world,
            scheduler: TickScheduler::new(),
            gate,
            powers,
            engine,
            rng: PcgRng::seeded(seed),
            command_rx,
            tick_period,
        }
    }

    /// Main worker loop.
    ///
    /// Exits once every handle has been dropped.
    pub async fn run(mut self) {
        let mut interval = self.tick_period.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = next_tick(&mut interval) => {
                    self.tick();
                }
            }
        }

        info!(now = %self.scheduler.now(), "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Activate {
                actor,
                power,
                reply,
            } => {
                let result = self.activate(actor, power);
                if let Err(err) = &result {
                    log_failure(actor, power, err);
                }
                if reply.send(result).is_err() {
                    debug!("Activate reply channel closed (caller dropped)");
                }
            }
            Command::Despawn { actor, reply } => {
                let existed = self.despawn(actor);
                if reply.send(existed).is_err() {
                    debug!("Despawn reply channel closed (caller dropped)");
                }
            }
            Command::AdvanceTicks { ticks, reply } => {
                for _ in 0..ticks {
                    self.tick();
                }
                if reply.send(self.scheduler.now()).is_err() {
                    debug!("AdvanceTicks reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn tick(&mut self) {
        let next = self.scheduler.now() + 1;
        self.world.advance(next);
        let summary = self.scheduler.run_tick(self.world.as_ref());
        if summary.ran > 0 {
            debug!(tick = %summary.now, ran = summary.ran, "tasks ran");
        }
    }

    fn activate(&mut self, actor: EntityId, power_id: PowerId) -> Result<ActivationReport> {
        let power = self
            .powers
            .get(&power_id)
            .ok_or(RuntimeError::UnknownPower(power_id))?;
        let now = self.scheduler.now();
        let world = self.world.as_ref();

        if !power.handles(Trigger::RightClick) {
            return Err(RuntimeError::TriggerNotHandled {
                power: power_id,
                trigger: Trigger::RightClick,
            });
        }

        let mut ctx = ActivationContext {
            env: PowerEnv::with_all(world, world, world, &self.scheduler),
            gate: &self.gate,
            engine: &self.engine,
            rng: &mut self.rng,
            actor,
            now,
        };
        let outcome = power.activate(&mut ctx)?;
        debug!(%actor, power = %power_id, tick = %now, ?outcome, "activation evaluated");

        Ok(ActivationReport {
            actor,
            power: power_id,
            at: now,
            outcome,
        })
    }

    fn despawn(&mut self, actor: EntityId) -> bool {
        let existed = self.world.despawn(actor);
        let forgotten = self.gate.store().forget_actor(actor);
        info!(%actor, existed, forgotten, "actor despawned");
        existed
    }

    fn snapshot(&self) -> RuntimeSnapshot {
        RuntimeSnapshot {
            now: self.scheduler.now(),
            active_tasks: self.scheduler.active_tasks(),
            cooldown_records: self.gate.store().len(),
            powers: self
                .powers
                .iter()
                .map(|(id, power)| (*id, power.name()))
                .collect(),
            world: self.world.stats(),
        }
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn log_failure(actor: EntityId, power: PowerId, err: &RuntimeError) {
    let severity = err.severity();
    let code = err.error_code();
    if severity.is_internal() {
        error!(%actor, %power, severity = severity.as_str(), code, %err, "activation failed");
    } else {
        warn!(%actor, %power, severity = severity.as_str(), code, %err, "activation refused");
    }
}
