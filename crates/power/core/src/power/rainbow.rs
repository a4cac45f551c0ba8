//! Rainbow power: a burst of wool or fire that settles and then fades.

use tracing::info;

use crate::animation::{AnimationTicker, LaunchPoint};
use crate::config::{ConfigSection, RainbowConfig};
use crate::env::OracleError;
use crate::power::{
    Activation, ActivationContext, DescriptionArg, Power, PowerDescription, PowerKind,
    cooldown_seconds,
};
use crate::state::PowerId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RainbowPower {
    id: PowerId,
    config: RainbowConfig,
}

impl RainbowPower {
    pub fn new(id: PowerId, config: RainbowConfig) -> Self {
        Self { id, config }
    }

    pub fn config(&self) -> &RainbowConfig {
        &self.config
    }
}

impl Power for RainbowPower {
    fn id(&self) -> PowerId {
        self.id
    }

    fn kind(&self) -> PowerKind {
        PowerKind::Rainbow
    }

    fn cooldown_ticks(&self) -> u64 {
        self.config.cooldown
    }

    fn consumption(&self) -> i32 {
        self.config.consumption
    }

    fn description(&self) -> PowerDescription {
        PowerDescription::Localized {
            key: "power.rainbow",
            args: vec![
                DescriptionArg::Int(i64::from(self.config.count)),
                DescriptionArg::Float(cooldown_seconds(self.config.cooldown)),
            ],
        }
    }

    fn activate(&self, ctx: &mut ActivationContext<'_>) -> Result<Activation, OracleError> {
        let world = ctx.env.world()?;
        let scheduler = ctx.env.scheduler()?;
        let Some(launch) = LaunchPoint::of(world, ctx.actor) else {
            return Ok(Activation::ActorVanished);
        };

        let decision = ctx.pass_gate(self)?;
        if !decision.is_passed() {
            return Ok(Activation::Rejected(decision));
        }

        let ticker = AnimationTicker::spawn(
            world,
            ctx.actor,
            self.id,
            launch,
            &self.config,
            ctx.engine.transient_lift,
            &mut *ctx.rng,
        );
        let projectiles = ticker.state().in_flight().len();
        let handle = ticker.start(scheduler, ctx.engine.animation_period_ticks);
        info!(
            actor = %ctx.actor,
            power = %self.id,
            %handle,
            projectiles,
            fire = self.config.is_fire,
            "rainbow power fired"
        );
        Ok(Activation::Launched {
            handle,
            projectiles,
        })
    }

    fn save(&self, section: &mut dyn ConfigSection) {
        self.config.save(section);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::EngineConfig;
    use crate::cooldown::{CooldownGate, GateDecision, InMemoryCooldownStore};
    use crate::env::{PcgRng, PowerEnv};
    use crate::state::{EntityId, Location, Material, Tick};
    use crate::test_support::{MockScheduler, MockWorld};

    const ACTOR: EntityId = EntityId(7);

    fn setup() -> (MockWorld, MockScheduler, CooldownGate) {
        let world = MockWorld::new();
        world.add_living(ACTOR, Location::new(0.0, 64.0, 0.0));
        (
            world,
            MockScheduler::new(),
            CooldownGate::new(Arc::new(InMemoryCooldownStore::new())),
        )
    }

    fn activate(
        power: &RainbowPower,
        world: &MockWorld,
        scheduler: &MockScheduler,
        gate: &CooldownGate,
        now: u64,
    ) -> Activation {
        let engine = EngineConfig::default();
        let mut rng = PcgRng::seeded(42);
        let mut ctx = ActivationContext {
            env: PowerEnv::with_all(world, world, world, scheduler),
            gate,
            engine: &engine,
            rng: &mut rng,
            actor: ACTOR,
            now: Tick(now),
        };
        power.activate(&mut ctx).unwrap()
    }

    #[test]
    fn launches_configured_count_and_registers_ticker() {
        let (world, scheduler, gate) = setup();
        let power = RainbowPower::new(PowerId(2), RainbowConfig::default());

        let Activation::Launched {
            handle,
            projectiles,
        } = activate(&power, &world, &scheduler, &gate, 0)
        else {
            panic!("expected launch");
        };
        assert_eq!(projectiles, 5);
        assert!(scheduler.is_active(handle));
        assert_eq!(scheduler.period_of(handle), Some(5));
        assert_eq!(world.spawned().len(), 5);
    }

    #[test]
    fn second_activation_within_cooldown_is_rejected() {
        let (world, scheduler, gate) = setup();
        let power = RainbowPower::new(PowerId(2), RainbowConfig::default());

        assert!(activate(&power, &world, &scheduler, &gate, 0).fired());
        assert_eq!(
            activate(&power, &world, &scheduler, &gate, 5),
            Activation::Rejected(GateDecision::CoolingDown { remaining: 15 })
        );
        assert_eq!(world.spawned().len(), 5);
    }

    #[test]
    fn animation_runs_to_completion_and_clears_its_blocks() {
        let (world, scheduler, gate) = setup();
        let power = RainbowPower::new(
            PowerId(3),
            RainbowConfig {
                is_fire: true,
                count: 3,
                ..RainbowConfig::default()
            },
        );
        let Activation::Launched { handle, .. } = activate(&power, &world, &scheduler, &gate, 0)
        else {
            panic!("expected launch");
        };
        assert!(
            world
                .spawned()
                .iter()
                .all(|(_, _, material, _)| *material == Material::Fire)
        );

        world.land_all_transients();
        let mut guard = 0;
        while scheduler.is_active(handle) {
            scheduler.run_tick(&world);
            guard += 1;
            assert!(guard < 10_000, "animation never finished");
        }
        assert_eq!(scheduler.cancel_count(handle), 1);
        let (_, origin, _, _) = world.spawned()[0];
        assert_eq!(world.block(origin), Material::Air);
    }

    #[test]
    fn vanished_actor_records_no_cooldown() {
        let (world, scheduler, gate) = setup();
        world.despawn(ACTOR);
        let power = RainbowPower::new(PowerId(2), RainbowConfig::default());

        assert_eq!(
            activate(&power, &world, &scheduler, &gate, 0),
            Activation::ActorVanished
        );
        assert!(gate.store().is_empty());
    }

    #[test]
    fn actor_without_facing_is_not_charged() {
        let (world, scheduler, gate) = setup();
        world.clear_facing(ACTOR);
        world.set_balance(ACTOR, 5);
        let power = RainbowPower::new(
            PowerId(2),
            RainbowConfig {
                consumption: 2,
                ..RainbowConfig::default()
            },
        );

        assert_eq!(
            activate(&power, &world, &scheduler, &gate, 0),
            Activation::ActorVanished
        );
        assert!(gate.store().is_empty());
        assert_eq!(world.balance(ACTOR), 5);
        assert!(world.spawned().is_empty());
    }

    #[test]
    fn description_shows_count_and_seconds() {
        let power = RainbowPower::new(
            PowerId(2),
            RainbowConfig {
                count: 8,
                cooldown: 40,
                ..RainbowConfig::default()
            },
        );
        assert_eq!(
            power.description(),
            PowerDescription::Localized {
                key: "power.rainbow",
                args: vec![DescriptionArg::Int(8), DescriptionArg::Float(2.0)],
            }
        );
    }
}
