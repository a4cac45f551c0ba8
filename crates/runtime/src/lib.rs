//! Runtime orchestration for item powers.
//!
//! This crate wires a tick scheduler, a cooldown store and a sandbox world
//! into a worker task that serves activation commands. Consumers embed
//! [`Runtime`] and talk to it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`scheduler`] drives repeating tasks tick by tick
//! - [`sandbox`] provides an in-memory world for tests and simulation
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod runtime;
pub mod sandbox;
pub mod scheduler;

mod workers;

pub use api::{ActivationReport, Result, RuntimeError, RuntimeHandle, RuntimeSnapshot};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use sandbox::{ActiveEffect, SandboxWorld, WorldStats};
pub use scheduler::{TickScheduler, TickSummary};
