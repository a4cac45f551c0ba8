//! Scheduler adapter for [`AnimationState`].

use tracing::{debug, info, warn};

use crate::animation::{AnimationState, TransientMatcher, TransientProjectile};
use crate::config::RainbowConfig;
use crate::env::{Cosmetic, PowerRng, RepeatingTask, Scheduler, SoundKind, TickContext, WorldOracle};
use crate::state::{EntityId, Location, Material, PowerId, TaskHandle, Vec3, WoolColor};

/// Lifecycle of a ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickerPhase {
    /// Projectiles launched, not yet registered with a scheduler.
    Spawning,
    Running,
    /// Registration cancelled; no further ticks will arrive.
    Terminated,
}

/// Where a burst leaves from and which way it flies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchPoint {
    pub location: Location,
    pub facing: Vec3,
}

impl LaunchPoint {
    /// Resolves the actor's location and facing, `None` if either is gone.
    pub fn of(world: &dyn WorldOracle, actor: EntityId) -> Option<Self> {
        Some(Self {
            location: world.location_of(actor)?,
            facing: world.facing_of(actor)?,
        })
    }
}

/// Recurring task that drives one rainbow animation to completion.
pub struct AnimationTicker {
    actor: EntityId,
    power: PowerId,
    state: AnimationState,
    rng: Box<dyn PowerRng>,
    phase: TickerPhase,
    ticks: u64,
}

impl AnimationTicker {
    /// Lowest random velocity multiplier per axis.
    pub const MIN_SPREAD: f64 = 0.5;
    /// Width of the random multiplier range, giving `[0.5, 2.5)`.
    pub const SPREAD_RANGE: f64 = 2.0;

    /// Plays the launch sound and spawns `config.count` projectiles above `launch`.
    ///
    /// Each projectile flies along the launch facing scaled by three
    /// independent multipliers drawn from `[0.5, 2.5)`. Wool projectiles
    /// get a uniformly random colour.
    pub fn spawn(
        world: &dyn WorldOracle,
        actor: EntityId,
        power: PowerId,
        launch: LaunchPoint,
        config: &RainbowConfig,
        lift: f64,
        rng: &mut dyn PowerRng,
    ) -> Self {
        let LaunchPoint { location, facing } = launch;

        world.play_cosmetic(
            location,
            Cosmetic::Sound {
                kind: SoundKind::ArrowShoot,
                volume: 1.0,
                pitch: 1.0,
            },
        );

        let origin = location.offset(0.0, lift, 0.0);
        let mut state = AnimationState::new(TransientMatcher::for_fire(config.is_fire));
        for _ in 0..config.count {
            let material = if config.is_fire {
                Material::Fire
            } else {
                Material::Wool(WoolColor::from_index(rng.below(WoolColor::ALL.len() as u32)))
            };
            let velocity = facing.scale(Vec3::new(
                Self::spread(rng),
                Self::spread(rng),
                Self::spread(rng),
            ));

            match world.spawn_transient(origin, material, velocity) {
                Ok(handle) => state.launch(TransientProjectile {
                    handle,
                    position: origin,
                    velocity,
                    alive: true,
                }),
                Err(error) => warn!(%actor, %error, "transient spawn rejected, skipping"),
            }
        }

        Self {
            actor,
            power,
            state,
            rng: rng.fork(),
            phase: TickerPhase::Spawning,
            ticks: 0,
        }
    }

    fn spread(rng: &mut dyn PowerRng) -> f64 {
        rng.next_f64() * Self::SPREAD_RANGE + Self::MIN_SPREAD
    }

    /// Registers the ticker to run every `period` ticks, starting next tick.
    pub fn start(mut self, scheduler: &dyn Scheduler, period: u64) -> TaskHandle {
        self.phase = TickerPhase::Running;
        let (actor, power, launched) = (self.actor, self.power, self.state.in_flight().len());
        let handle = scheduler.schedule_repeating(Box::new(self), 0, period.max(1));
        debug!(%actor, %power, %handle, launched, "animation ticker started");
        handle
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn phase(&self) -> TickerPhase {
        self.phase
    }

    /// Number of ticks this ticker has processed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl RepeatingTask for AnimationTicker {
    fn name(&self) -> &'static str {
        "animation_ticker"
    }

    fn run(&mut self, ctx: &TickContext<'_>) {
        if self.phase == TickerPhase::Terminated {
            return;
        }
        self.phase = TickerPhase::Running;
        self.ticks += 1;

        let outcome = self.state.step(ctx.world, self.rng.as_mut());
        debug!(handle = %ctx.handle, tick = %ctx.now, ?outcome, "animation step");

        if outcome.is_finished() {
            ctx.scheduler.cancel(ctx.handle);
            self.phase = TickerPhase::Terminated;
            info!(
                actor = %self.actor,
                power = %self.power,
                ticks = self.ticks,
                "animation finished"
            );
        }
    }
}

impl core::fmt::Debug for AnimationTicker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationTicker")
            .field("actor", &self.actor)
            .field("power", &self.power)
            .field("phase", &self.phase)
            .field("ticks", &self.ticks)
            .field("state", &self.state)
            .finish()
    }
}
