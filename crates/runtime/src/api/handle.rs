//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! activating powers and stepping the tick clock.
use tokio::sync::{mpsc, oneshot};

use power_core::{EntityId, PowerId, Tick};

use super::errors::{Result, RuntimeError};
use super::types::{ActivationReport, RuntimeSnapshot};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone, Debug)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self { command_tx }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Right-click `power` as `actor` at the current tick.
    pub async fn activate(&self, actor: EntityId, power: PowerId) -> Result<ActivationReport> {
        self.request(|reply| Command::Activate {
            actor,
            power,
            reply,
        })
        .await?
    }

    /// Removes `actor` from the world and forgets its cooldowns.
    ///
    /// Returns whether the actor existed.
    pub async fn despawn(&self, actor: EntityId) -> Result<bool> {
        self.request(|reply| Command::Despawn { actor, reply }).await
    }

    /// Processes `ticks` ticks immediately and returns the new clock.
    pub async fn advance(&self, ticks: u64) -> Result<Tick> {
        self.request(|reply| Command::AdvanceTicks { ticks, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<RuntimeSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Number of repeating tasks still registered.
    pub async fn active_tasks(&self) -> Result<usize> {
        Ok(self.snapshot().await?.active_tasks)
    }
}
