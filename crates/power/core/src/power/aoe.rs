//! Area-of-effect power.

use tracing::info;

use crate::config::{AoeConfig, ConfigSection};
use crate::effect::EffectApplicator;
use crate::env::OracleError;
use crate::power::{
    Activation, ActivationContext, DescriptionArg, Power, PowerDescription, PowerKind,
    cooldown_seconds,
};
use crate::state::PowerId;
use crate::targeting::AreaTargetSelector;

/// Applies a timed status effect to every living entity around the caster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AoePower {
    id: PowerId,
    config: AoeConfig,
}

impl AoePower {
    pub fn new(id: PowerId, config: AoeConfig) -> Self {
        Self { id, config }
    }

    pub fn config(&self) -> &AoeConfig {
        &self.config
    }
}

impl Power for AoePower {
    fn id(&self) -> PowerId {
        self.id
    }

    fn kind(&self) -> PowerKind {
        PowerKind::Aoe
    }

    fn cooldown_ticks(&self) -> u64 {
        self.config.cooldown
    }

    fn consumption(&self) -> i32 {
        self.config.consumption
    }

    fn description(&self) -> PowerDescription {
        if let Some(name) = &self.config.name {
            return PowerDescription::Custom(name.clone());
        }
        let selection = if self.config.self_application {
            "power.aoe.selfapplication.including"
        } else {
            "power.aoe.selfapplication.excluding"
        };
        PowerDescription::Localized {
            key: "power.aoe.display",
            args: vec![
                DescriptionArg::Text(self.config.effect.to_string()),
                DescriptionArg::Int(i64::from(self.config.amplifier)),
                DescriptionArg::Int(i64::from(self.config.duration)),
                DescriptionArg::Key(selection),
                DescriptionArg::Int(i64::from(self.config.range)),
                DescriptionArg::Float(cooldown_seconds(self.config.cooldown)),
            ],
        }
    }

    fn activate(&self, ctx: &mut ActivationContext<'_>) -> Result<Activation, OracleError> {
        let world = ctx.env.world()?;
        let sink = ctx.env.effects()?;
        let Some(origin) = world.location_of(ctx.actor) else {
            return Ok(Activation::ActorVanished);
        };

        let decision = ctx.pass_gate(self)?;
        if !decision.is_passed() {
            return Ok(Activation::Rejected(decision));
        }

        let targets = AreaTargetSelector::new(world).select(
            origin,
            f64::from(self.config.range),
            &[ctx.actor],
        );
        let report = EffectApplicator::new(world, sink).apply(&self.config, ctx.actor, &targets);
        info!(
            actor = %ctx.actor,
            power = %self.id,
            effect = %self.config.effect,
            applied = report.applied,
            skipped = report.skipped,
            "aoe power fired"
        );
        Ok(Activation::Applied(report))
    }

    fn save(&self, section: &mut dyn ConfigSection) {
        self.config.save(section);
    }
}
