//! Animation state and its per-tick step.

use tracing::warn;

use crate::env::{Cosmetic, PowerRng, WorldOracle};
use crate::state::{Location, Material, TransientHandle, Vec3};

/// One launched block that has not landed yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransientProjectile {
    pub handle: TransientHandle,
    /// Last known position.
    pub position: Location,
    pub velocity: Vec3,
    pub alive: bool,
}

/// Where a projectile came to rest, pending cleanup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettledLocation {
    pub location: Location,
}

/// Decides whether a landed block still holds the launched material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransientMatcher {
    /// Any wool colour.
    Wool,
    Fire,
}

impl TransientMatcher {
    pub fn for_fire(is_fire: bool) -> Self {
        if is_fire {
            TransientMatcher::Fire
        } else {
            TransientMatcher::Wool
        }
    }

    pub fn matches(self, material: Material) -> bool {
        match self {
            TransientMatcher::Wool => material.is_wool(),
            TransientMatcher::Fire => material == Material::Fire,
        }
    }
}

/// Result of one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Work remains; keep ticking.
    Running { cleared: usize, landed: usize },
    /// Both collections are empty.
    Finished { cleared: usize, landed: usize },
}

impl StepOutcome {
    pub fn is_finished(self) -> bool {
        matches!(self, StepOutcome::Finished { .. })
    }
}

/// In-flight projectiles and settled landing sites of one activation.
///
/// Only the owning ticker mutates these collections.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    in_flight: Vec<TransientProjectile>,
    settled: Vec<SettledLocation>,
    matcher: TransientMatcher,
}

impl AnimationState {
    /// Chance out of `BREAK_ODDS` of ending the cleanup walk after each entry.
    const BREAK_ODDS: u32 = 5;

    pub fn new(matcher: TransientMatcher) -> Self {
        Self {
            in_flight: Vec::new(),
            settled: Vec::new(),
            matcher,
        }
    }

    pub fn launch(&mut self, projectile: TransientProjectile) {
        self.in_flight.push(projectile);
    }

    /// Records a landing site directly, bypassing flight.
    pub fn settle(&mut self, location: Location) {
        self.settled.push(SettledLocation { location });
    }

    pub fn in_flight(&self) -> &[TransientProjectile] {
        &self.in_flight
    }

    pub fn settled(&self) -> &[SettledLocation] {
        &self.settled
    }

    pub fn matcher(&self) -> TransientMatcher {
        self.matcher
    }

    /// True once nothing is in flight and nothing awaits cleanup.
    pub fn is_drained(&self) -> bool {
        self.in_flight.is_empty() && self.settled.is_empty()
    }

    /// Advances the animation by one scheduler period.
    ///
    /// 1. Walks the settled sites in order. Each site is picked with
    ///    probability 1/2; a picked site is cleared to air if it still holds
    ///    the launched material and is removed either way. After every site,
    ///    a 1-in-5 draw ends the walk early.
    /// 2. Moves every projectile that is no longer alive from in-flight to
    ///    settled, keeping their order.
    /// 3. Reports `Finished` when both collections are empty.
    ///
    /// World failures never abort the step: an unreadable block counts as
    /// "does not match" and its site is still removed.
    pub fn step(&mut self, world: &dyn WorldOracle, rng: &mut dyn PowerRng) -> StepOutcome {
        let cleared = self.clean_settled(world, rng);
        let landed = self.collect_landed(world);

        if self.is_drained() {
            StepOutcome::Finished { cleared, landed }
        } else {
            StepOutcome::Running { cleared, landed }
        }
    }

    fn clean_settled(&mut self, world: &dyn WorldOracle, rng: &mut dyn PowerRng) -> usize {
        let mut cleared = 0;
        let mut index = 0;

        while index < self.settled.len() {
            if rng.next_bool() {
                let location = self.settled.remove(index).location;
                if self.clear_site(world, location) {
                    cleared += 1;
                }
            } else {
                index += 1;
            }

            if rng.below(Self::BREAK_ODDS) == 0 {
                break;
            }
        }

        cleared
    }

    fn clear_site(&self, world: &dyn WorldOracle, location: Location) -> bool {
        let material = match world.block_material_at(location) {
            Ok(material) => material,
            Err(error) => {
                warn!(%error, "settled block unreadable, treating as not matched");
                return false;
            }
        };
        if !self.matcher.matches(material) {
            return false;
        }

        world.play_cosmetic(location, Cosmetic::StepSound(material));
        if let Err(error) = world.set_block_material(location, Material::Air) {
            warn!(%error, "failed to clear settled block");
            return false;
        }
        true
    }

    fn collect_landed(&mut self, world: &dyn WorldOracle) -> usize {
        let Self {
            in_flight, settled, ..
        } = self;
        let before = settled.len();

        in_flight.retain_mut(|projectile| {
            match world.transient_status(projectile.handle) {
                Some(status) => {
                    projectile.position = status.location;
                    projectile.alive = status.alive;
                }
                None => projectile.alive = false,
            }
            if projectile.alive {
                return true;
            }
            settled.push(SettledLocation {
                location: projectile.position,
            });
            false
        });

        settled.len() - before
    }
}
