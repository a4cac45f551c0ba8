//! Area target selection.

use crate::env::WorldOracle;
use crate::state::{EntityId, Location};

/// Picks the living entities around a point.
#[derive(Clone, Copy)]
pub struct AreaTargetSelector<'a> {
    world: &'a dyn WorldOracle,
}

impl<'a> AreaTargetSelector<'a> {
    pub fn new(world: &'a dyn WorldOracle) -> Self {
        Self { world }
    }

    /// Living entities within `radius` of `origin`, minus `excluding`.
    ///
    /// Order follows the world query and carries no meaning; callers may only
    /// rely on membership. A non-positive radius selects nothing.
    pub fn select(&self, origin: Location, radius: f64, excluding: &[EntityId]) -> Vec<EntityId> {
        if radius <= 0.0 || radius.is_nan() {
            return Vec::new();
        }
        self.world
            .entities_within(origin, radius)
            .into_iter()
            .filter(|id| !excluding.contains(id))
            .filter(|id| self.world.is_living(*id))
            .collect()
    }
}
