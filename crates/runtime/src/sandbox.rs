//! In-memory world for tests and the simulator binary.
//!
//! The sandbox models just enough of a host world for powers to run end to
//! end: positioned entities, a flat ground plane with a sparse block map on
//! top, falling transients with simple ballistics, timed status effects, and
//! per-entity durability.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use power_core::{
    BlockPos, Cosmetic, EffectDescriptor, EntityId, Location, Material, ResourceLedger,
    StatusSink, Tick, TransientHandle, TransientStatus, Vec3, WorldError, WorldOracle,
};
use tracing::{debug, trace};

/// Downward acceleration per tick, in blocks.
pub const GRAVITY: f64 = 0.04;
/// Velocity retained per tick.
pub const DRAG: f64 = 0.98;
/// Transients still airborne after this many ticks die where they are.
pub const TRANSIENT_LIFETIME: u64 = 600;
/// Landed transients are forgotten this many ticks after landing.
pub const TRANSIENT_RETENTION: u64 = 100;
const COSMETIC_LOG_LIMIT: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Body {
    location: Location,
    facing: Vec3,
    living: bool,
}

#[derive(Clone, Copy, Debug)]
struct Transient {
    location: Location,
    velocity: Vec3,
    material: Material,
    spawned_at: Tick,
    landed_at: Option<Tick>,
}

/// An effect currently on an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveEffect {
    pub effect: EffectDescriptor,
    pub expires_at: Tick,
}

#[derive(Default)]
struct SandboxState {
    now: Tick,
    next_entity: u32,
    next_transient: u64,
    bodies: HashMap<EntityId, Body>,
    blocks: HashMap<BlockPos, Material>,
    transients: HashMap<TransientHandle, Transient>,
    effects: HashMap<EntityId, Vec<ActiveEffect>>,
    durability: HashMap<EntityId, i32>,
    cosmetics: Vec<(Location, Cosmetic)>,
}

/// Counts exposed for snapshots and logs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub entities: usize,
    pub placed_blocks: usize,
    pub airborne_transients: usize,
    pub active_effects: usize,
}

/// Shared, internally locked sandbox world.
pub struct SandboxWorld {
    ground_level: i32,
    state: Mutex<SandboxState>,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GROUND_LEVEL)
    }
}

impl SandboxWorld {
    pub const DEFAULT_GROUND_LEVEL: i32 = 64;

    /// Creates a world whose solid ground fills every block at `ground_level`
    /// and below.
    pub fn new(ground_level: i32) -> Self {
        Self {
            ground_level,
            state: Mutex::new(SandboxState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SandboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Height entities stand at.
    pub fn surface(&self) -> f64 {
        f64::from(self.ground_level + 1)
    }

    /// Adds a living entity standing on the ground at `(x, z)`.
    pub fn spawn_living(&self, x: f64, z: f64, facing: Vec3) -> EntityId {
        self.insert_body(Body {
            location: Location::new(x, self.surface(), z),
            facing,
            living: true,
        })
    }

    /// Adds a non-living entity (an item frame, a dropped item).
    pub fn spawn_object(&self, location: Location) -> EntityId {
        self.insert_body(Body {
            location,
            facing: Vec3::ZERO,
            living: false,
        })
    }

    fn insert_body(&self, body: Body) -> EntityId {
        let mut state = self.state();
        state.next_entity += 1;
        let id = EntityId(state.next_entity);
        state.bodies.insert(id, body);
        debug!(%id, living = body.living, "entity spawned");
        id
    }

    /// Removes an entity and everything attached to it.
    pub fn despawn(&self, id: EntityId) -> bool {
        let mut state = self.state();
        state.effects.remove(&id);
        state.durability.remove(&id);
        state.bodies.remove(&id).is_some()
    }

    pub fn move_to(&self, id: EntityId, location: Location) -> bool {
        match self.state().bodies.get_mut(&id) {
            Some(body) => {
                body.location = location;
                true
            }
            None => false,
        }
    }

    pub fn set_durability(&self, id: EntityId, amount: i32) {
        self.state().durability.insert(id, amount);
    }

    pub fn durability(&self, id: EntityId) -> Option<i32> {
        self.state().durability.get(&id).copied()
    }

    /// Effects on `id` that have not expired yet.
    pub fn effects_on(&self, id: EntityId) -> Vec<ActiveEffect> {
        self.state().effects.get(&id).cloned().unwrap_or_default()
    }

    pub fn block_at(&self, pos: BlockPos) -> Material {
        let state = self.state();
        self.material_at(&state, pos)
    }

    pub fn place_block(&self, pos: BlockPos, material: Material) {
        let mut state = self.state();
        Self::write_block(&mut state, pos, material);
    }

    /// Placed blocks above the ground plane.
    pub fn placed_blocks(&self) -> Vec<(BlockPos, Material)> {
        let mut blocks: Vec<_> = self
            .state()
            .blocks
            .iter()
            .map(|(pos, material)| (*pos, *material))
            .collect();
        blocks.sort_by_key(|(pos, _)| *pos);
        blocks
    }

    /// Most recent cosmetics, oldest first.
    pub fn cosmetics(&self) -> Vec<(Location, Cosmetic)> {
        self.state().cosmetics.clone()
    }

    pub fn now(&self) -> Tick {
        self.state().now
    }

    pub fn stats(&self) -> WorldStats {
        let state = self.state();
        WorldStats {
            entities: state.bodies.len(),
            placed_blocks: state.blocks.len(),
            airborne_transients: state
                .transients
                .values()
                .filter(|t| t.landed_at.is_none())
                .count(),
            active_effects: state.effects.values().map(Vec::len).sum(),
        }
    }

    /// Moves the world to `now`: flies transients, lands them on whatever
    /// is below, forgets old landings and expires effects.
    pub fn advance(&self, now: Tick) {
        let mut state = self.state();
        state.now = now;

        let mut moved = Vec::new();
        for (handle, transient) in state.transients.iter_mut() {
            if transient.landed_at.is_some() {
                continue;
            }
            if now.elapsed_since(transient.spawned_at) >= TRANSIENT_LIFETIME {
                transient.landed_at = Some(now);
                trace!(handle = handle.0, "transient expired in flight");
                continue;
            }
            let next = transient.location.offset(
                transient.velocity.x,
                transient.velocity.y,
                transient.velocity.z,
            );
            transient.velocity = Vec3::new(
                transient.velocity.x * DRAG,
                (transient.velocity.y - GRAVITY) * DRAG,
                transient.velocity.z * DRAG,
            );
            transient.location = next;
            moved.push(*handle);
        }

        for handle in moved {
            let Some(transient) = state.transients.get(&handle).copied() else {
                continue;
            };
            let below = transient.location.offset(0.0, -0.05, 0.0).block();
            if transient.velocity.y > 0.0 || self.material_at(&state, below).is_air() {
                continue;
            }
            let rest = Location::new(
                transient.location.x,
                f64::from(below.y.max(self.ground_level) + 1),
                transient.location.z,
            );
            let target = rest.block();
            if self.material_at(&state, target).is_air() {
                Self::write_block(&mut state, target, transient.material);
            }
            if let Some(t) = state.transients.get_mut(&handle) {
                t.location = rest;
                t.landed_at = Some(now);
            }
            trace!(handle = handle.0, ?target, "transient landed");
        }

        state.transients.retain(|_, t| {
            t.landed_at
                .is_none_or(|at| now.elapsed_since(at) < TRANSIENT_RETENTION)
        });
        for effects in state.effects.values_mut() {
            effects.retain(|e| e.expires_at > now);
        }
        state.effects.retain(|_, effects| !effects.is_empty());
    }

    fn material_at(&self, state: &SandboxState, pos: BlockPos) -> Material {
        if pos.y <= self.ground_level {
            return Material::Other(0);
        }
        state.blocks.get(&pos).copied().unwrap_or_default()
    }

    fn write_block(state: &mut SandboxState, pos: BlockPos, material: Material) {
        if material.is_air() {
            state.blocks.remove(&pos);
        } else {
            state.blocks.insert(pos, material);
        }
    }
}

impl WorldOracle for SandboxWorld {
    fn entities_within(&self, origin: Location, radius: f64) -> Vec<EntityId> {
        let radius_sq = radius * radius;
        self.state()
            .bodies
            .iter()
            .filter(|(_, body)| body.location.distance_squared(origin) <= radius_sq)
            .map(|(id, _)| *id)
            .collect()
    }

    fn is_living(&self, entity: EntityId) -> bool {
        self.state().bodies.get(&entity).is_some_and(|b| b.living)
    }

    fn location_of(&self, entity: EntityId) -> Option<Location> {
        self.state().bodies.get(&entity).map(|b| b.location)
    }

    fn facing_of(&self, entity: EntityId) -> Option<Vec3> {
        self.state().bodies.get(&entity).map(|b| b.facing)
    }

    fn block_material_at(&self, location: Location) -> Result<Material, WorldError> {
        Ok(self.block_at(location.block()))
    }

    fn set_block_material(&self, location: Location, material: Material) -> Result<(), WorldError> {
        let pos = location.block();
        if pos.y <= self.ground_level {
            return Err(WorldError::Inconsistent(pos));
        }
        self.place_block(pos, material);
        Ok(())
    }

    fn spawn_transient(
        &self,
        location: Location,
        material: Material,
        velocity: Vec3,
    ) -> Result<TransientHandle, WorldError> {
        let mut state = self.state();
        let pos = location.block();
        if !self.material_at(&state, pos).is_air() {
            return Err(WorldError::SpawnRejected(pos));
        }
        state.next_transient += 1;
        let handle = TransientHandle(state.next_transient);
        let spawned_at = state.now;
        state.transients.insert(
            handle,
            Transient {
                location,
                velocity,
                material,
                spawned_at,
                landed_at: None,
            },
        );
        Ok(handle)
    }

    fn transient_status(&self, handle: TransientHandle) -> Option<TransientStatus> {
        self.state()
            .transients
            .get(&handle)
            .map(|t| TransientStatus {
                location: t.location,
                alive: t.landed_at.is_none(),
            })
    }

    fn play_cosmetic(&self, location: Location, cosmetic: Cosmetic) {
        let mut state = self.state();
        if state.cosmetics.len() == COSMETIC_LOG_LIMIT {
            state.cosmetics.remove(0);
        }
        state.cosmetics.push((location, cosmetic));
    }
}

impl StatusSink for SandboxWorld {
    fn apply_effect(&self, target: EntityId, effect: &EffectDescriptor) -> Result<(), WorldError> {
        let mut state = self.state();
        if !state.bodies.contains_key(&target) {
            return Err(WorldError::TargetVanished(target));
        }
        let expires_at = state.now + u64::from(effect.duration_ticks);
        let effects = state.effects.entry(target).or_default();
        // A fresh application of the same kind replaces the old one.
        effects.retain(|e| e.effect.kind != effect.kind);
        effects.push(ActiveEffect {
            effect: *effect,
            expires_at,
        });
        Ok(())
    }
}

impl ResourceLedger for SandboxWorld {
    fn try_charge(&self, actor: EntityId, amount: i32) -> bool {
        if amount <= 0 {
            return true;
        }
        let mut state = self.state();
        match state.durability.get_mut(&actor) {
            Some(left) if *left >= amount => {
                *left -= amount;
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for SandboxWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SandboxWorld")
            .field("ground_level", &self.ground_level)
            .field("stats", &self.stats())
            .finish()
    }
}
