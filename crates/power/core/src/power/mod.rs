//! Triggerable powers bound to items.
//!
//! A power is activated through [`Power::activate`]. Every activation goes
//! through the [`CooldownGate`] first; only a passed gate lets the effect
//! fire. Gate rejections are ordinary outcomes, not errors.
mod aoe;
mod rainbow;

pub use aoe::AoePower;
pub use rainbow::RainbowPower;

pub use crate::config::{AoeConfig, RainbowConfig};

use crate::config::{ConfigSection, EngineConfig};
use crate::cooldown::{CooldownGate, GateDecision};
use crate::effect::ApplyReport;
use crate::env::{OracleError, PowerEnv, PowerRng};
use crate::state::{EntityId, PowerId, TaskHandle, Tick};

/// Kinds of built-in powers, named as in power files.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PowerKind {
    Aoe,
    Rainbow,
}

/// Input events that can activate a power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    RightClick,
}

/// Argument of a localized description.
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptionArg {
    Text(String),
    Int(i64),
    Float(f64),
    /// Nested message key, localized by the caller.
    Key(&'static str),
}

/// What a power shows on its item, handed to the host's localizer.
#[derive(Clone, Debug, PartialEq)]
pub enum PowerDescription {
    /// Configured display text, shown as-is.
    Custom(String),
    Localized {
        key: &'static str,
        args: Vec<DescriptionArg>,
    },
}

/// Outcome of one activation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Area effect applied.
    Applied(ApplyReport),
    /// Animation launched and registered with the scheduler.
    Launched {
        handle: TaskHandle,
        projectiles: usize,
    },
    /// Gate refused; nothing fired.
    Rejected(GateDecision),
    /// The actor is gone; nothing happened and no cooldown was recorded.
    ActorVanished,
}

impl Activation {
    pub fn fired(&self) -> bool {
        matches!(self, Activation::Applied(_) | Activation::Launched { .. })
    }
}

/// Everything one activation needs.
pub struct ActivationContext<'a> {
    pub env: PowerEnv<'a>,
    pub gate: &'a CooldownGate,
    pub engine: &'a EngineConfig,
    pub rng: &'a mut dyn PowerRng,
    pub actor: EntityId,
    pub now: Tick,
}

impl ActivationContext<'_> {
    /// Runs the gate for `power`, charging its consumption from the ledger.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LedgerNotAvailable` when no ledger was supplied.
    pub fn pass_gate(&self, power: &dyn Power) -> Result<GateDecision, OracleError> {
        let ledger = self.env.ledger()?;
        let (actor, amount) = (self.actor, power.consumption());
        Ok(self.gate.try_consume(
            actor,
            power.id(),
            power.cooldown_ticks(),
            self.now,
            || ledger.try_charge(actor, amount),
        ))
    }
}

/// A configured, triggerable ability.
pub trait Power: Send + Sync {
    fn id(&self) -> PowerId;

    fn kind(&self) -> PowerKind;

    /// Name used in power files and commands.
    fn name(&self) -> &'static str {
        self.kind().into()
    }

    fn cooldown_ticks(&self) -> u64;

    fn consumption(&self) -> i32;

    fn handles(&self, trigger: Trigger) -> bool {
        trigger == Trigger::RightClick
    }

    fn description(&self) -> PowerDescription;

    /// Attempts to fire the power for `ctx.actor`.
    ///
    /// Callers check [`Power::handles`] first.
    ///
    /// # Errors
    ///
    /// Returns an `OracleError` only when a required collaborator is missing.
    fn activate(&self, ctx: &mut ActivationContext<'_>) -> Result<Activation, OracleError>;

    /// Writes the persisted settings, kind excluded.
    fn save(&self, section: &mut dyn ConfigSection);
}

/// Cooldown expressed in seconds for display.
pub(crate) fn cooldown_seconds(ticks: u64) -> f64 {
    ticks as f64 / Tick::PER_SECOND as f64
}
