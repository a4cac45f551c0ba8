//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up the command channel, and
//! exposes a builder-based API for clients to drive powers.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use power_core::{CooldownGate, CooldownStore, EngineConfig, InMemoryCooldownStore, Power};
use tracing::info;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::sandbox::SandboxWorld;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    pub command_buffer_size: usize,
    /// Advance ticks every `engine.tick_period_ms` of real time. When off,
    /// ticks only move through [`RuntimeHandle::advance`].
    pub drive_ticks: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            command_buffer_size: 32,
            drive_ticks: false,
        }
    }
}

/// Main runtime that orchestrates power activations and ticks
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    world: Arc<SandboxWorld>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// The world the worker simulates, shared for setup and inspection.
    pub fn world(&self) -> &Arc<SandboxWorld> {
        &self.world
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<Arc<SandboxWorld>>,
    store: Option<Arc<dyn CooldownStore>>,
    powers: Vec<Box<dyn Power>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            store: None,
            powers: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing world instead of starting from an empty one
    pub fn world(mut self, world: Arc<SandboxWorld>) -> Self {
        self.world = Some(world);
        self
    }

    /// Replace the default in-memory cooldown store
    pub fn cooldown_store(mut self, store: Arc<dyn CooldownStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn power(mut self, power: Box<dyn Power>) -> Self {
        self.powers.push(power);
        self
    }

    pub fn powers(mut self, powers: impl IntoIterator<Item = Box<dyn Power>>) -> Self {
        self.powers.extend(powers);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let mut powers = BTreeMap::new();
        for power in self.powers {
            let id = power.id();
            if powers.insert(id, power).is_some() {
                return Err(RuntimeError::DuplicatePower(id));
            }
        }

        let world = self.world.unwrap_or_default();
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryCooldownStore::new()));
        let engine = self.config.engine;
        let seed = engine.rng_seed.unwrap_or_else(rand::random);
        let tick_period = self
            .config
            .drive_ticks
            .then(|| Duration::from_millis(engine.tick_period_ms.max(1)));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx);

        let sim_worker = SimulationWorker::new(
            Arc::clone(&world),
            CooldownGate::new(store),
            powers,
            engine,
            seed,
            command_rx,
            tick_period,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });
        info!(seed, "runtime started");

        Ok(Runtime {
            handle,
            world,
            sim_worker_handle,
        })
    }
}
