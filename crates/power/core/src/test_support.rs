//! In-memory doubles of the host collaborators for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::effect::EffectDescriptor;
use crate::env::{
    Cosmetic, PowerRng, RepeatingTask, ResourceLedger, Scheduler, StatusSink, TickContext,
    TransientStatus, WorldError, WorldOracle,
};
use crate::state::{
    BlockPos, EntityId, Location, Material, TaskHandle, Tick, TransientHandle, Vec3,
};

#[derive(Clone, Copy, Debug)]
struct MockEntity {
    location: Location,
    facing: Option<Vec3>,
    living: bool,
}

#[derive(Default)]
struct WorldInner {
    entities: HashMap<EntityId, MockEntity>,
    blocks: HashMap<BlockPos, Material>,
    inconsistent: HashSet<BlockPos>,
    transients: HashMap<TransientHandle, (TransientStatus, Material)>,
    spawned: Vec<(TransientHandle, Location, Material, Vec3)>,
    next_transient: u64,
    reject_spawns: bool,
    effects: Vec<(EntityId, EffectDescriptor)>,
    cosmetics: Vec<(Location, Cosmetic)>,
    balances: HashMap<EntityId, i32>,
}

/// World, status sink and ledger in one recording double.
#[derive(Default)]
pub struct MockWorld {
    inner: Mutex<WorldInner>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, WorldInner> {
        self.inner.lock().unwrap()
    }

    pub fn add_living(&self, id: EntityId, location: Location) {
        self.inner().entities.insert(
            id,
            MockEntity {
                location,
                facing: Some(Vec3::new(1.0, 0.0, 0.0)),
                living: true,
            },
        );
    }

    pub fn add_object(&self, id: EntityId, location: Location) {
        self.inner().entities.insert(
            id,
            MockEntity {
                location,
                facing: Some(Vec3::ZERO),
                living: false,
            },
        );
    }

    /// Keeps the entity but stops reporting a facing for it.
    pub fn clear_facing(&self, id: EntityId) {
        if let Some(entity) = self.inner().entities.get_mut(&id) {
            entity.facing = None;
        }
    }

    pub fn despawn(&self, id: EntityId) {
        self.inner().entities.remove(&id);
    }

    pub fn set_block(&self, location: Location, material: Material) {
        self.inner().blocks.insert(location.block(), material);
    }

    pub fn block(&self, location: Location) -> Material {
        self.inner()
            .blocks
            .get(&location.block())
            .copied()
            .unwrap_or_default()
    }

    pub fn wool_blocks(&self) -> Vec<BlockPos> {
        self.inner()
            .blocks
            .iter()
            .filter(|(_, material)| material.is_wool())
            .map(|(pos, _)| *pos)
            .collect()
    }

    pub fn mark_inconsistent(&self, location: Location) {
        self.inner().inconsistent.insert(location.block());
    }

    pub fn reject_spawns(&self, reject: bool) {
        self.inner().reject_spawns = reject;
    }

    pub fn add_transient(&self, location: Location) -> TransientHandle {
        let mut inner = self.inner();
        inner.next_transient += 1;
        let handle = TransientHandle(inner.next_transient);
        inner.transients.insert(
            handle,
            (
                TransientStatus {
                    location,
                    alive: true,
                },
                Material::Wool(crate::state::WoolColor::White),
            ),
        );
        handle
    }

    /// Marks a transient dead at `location` without placing a block.
    pub fn land_transient(&self, handle: TransientHandle, location: Location) {
        if let Some((status, _)) = self.inner().transients.get_mut(&handle) {
            status.location = location;
            status.alive = false;
        }
    }

    /// Lands every live transient where it is and places its material there.
    pub fn land_all_transients(&self) {
        let mut inner = self.inner();
        let mut placed = Vec::new();
        for (status, material) in inner.transients.values_mut() {
            if status.alive {
                status.alive = false;
                placed.push((status.location.block(), *material));
            }
        }
        inner.blocks.extend(placed);
    }

    pub fn spawned(&self) -> Vec<(TransientHandle, Location, Material, Vec3)> {
        self.inner().spawned.clone()
    }

    pub fn effect_calls(&self) -> Vec<(EntityId, EffectDescriptor)> {
        self.inner().effects.clone()
    }

    pub fn cosmetics(&self) -> Vec<(Location, Cosmetic)> {
        self.inner().cosmetics.clone()
    }

    pub fn set_balance(&self, id: EntityId, amount: i32) {
        self.inner().balances.insert(id, amount);
    }

    pub fn balance(&self, id: EntityId) -> i32 {
        self.inner().balances.get(&id).copied().unwrap_or(0)
    }
}

impl WorldOracle for MockWorld {
    fn entities_within(&self, origin: Location, radius: f64) -> Vec<EntityId> {
        self.inner()
            .entities
            .iter()
            .filter(|(_, e)| e.location.distance_squared(origin) <= radius * radius)
            .map(|(id, _)| *id)
            .collect()
    }

    fn is_living(&self, entity: EntityId) -> bool {
        self.inner().entities.get(&entity).is_some_and(|e| e.living)
    }

    fn location_of(&self, entity: EntityId) -> Option<Location> {
        self.inner().entities.get(&entity).map(|e| e.location)
    }

    fn facing_of(&self, entity: EntityId) -> Option<Vec3> {
        self.inner().entities.get(&entity).and_then(|e| e.facing)
    }

    fn block_material_at(&self, location: Location) -> Result<Material, WorldError> {
        let inner = self.inner();
        let pos = location.block();
        if inner.inconsistent.contains(&pos) {
            return Err(WorldError::Inconsistent(pos));
        }
        Ok(inner.blocks.get(&pos).copied().unwrap_or_default())
    }

    fn set_block_material(&self, location: Location, material: Material) -> Result<(), WorldError> {
        let mut inner = self.inner();
        let pos = location.block();
        if inner.inconsistent.contains(&pos) {
            return Err(WorldError::Inconsistent(pos));
        }
        inner.blocks.insert(pos, material);
        Ok(())
    }

    fn spawn_transient(
        &self,
        location: Location,
        material: Material,
        velocity: Vec3,
    ) -> Result<TransientHandle, WorldError> {
        let mut inner = self.inner();
        if inner.reject_spawns {
            return Err(WorldError::SpawnRejected(location.block()));
        }
        inner.next_transient += 1;
        let handle = TransientHandle(inner.next_transient);
        inner.transients.insert(
            handle,
            (
                TransientStatus {
                    location,
                    alive: true,
                },
                material,
            ),
        );
        inner.spawned.push((handle, location, material, velocity));
        Ok(handle)
    }

    fn transient_status(&self, handle: TransientHandle) -> Option<TransientStatus> {
        self.inner().transients.get(&handle).map(|(status, _)| *status)
    }

    fn play_cosmetic(&self, location: Location, cosmetic: Cosmetic) {
        self.inner().cosmetics.push((location, cosmetic));
    }
}

impl StatusSink for MockWorld {
    fn apply_effect(&self, target: EntityId, effect: &EffectDescriptor) -> Result<(), WorldError> {
        let mut inner = self.inner();
        if !inner.entities.contains_key(&target) {
            return Err(WorldError::TargetVanished(target));
        }
        inner.effects.push((target, *effect));
        Ok(())
    }
}

impl ResourceLedger for MockWorld {
    fn try_charge(&self, actor: EntityId, amount: i32) -> bool {
        if amount <= 0 {
            return true;
        }
        let mut inner = self.inner();
        let balance = inner.balances.entry(actor).or_insert(0);
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        true
    }
}

struct Entry {
    handle: TaskHandle,
    task: Option<Box<dyn RepeatingTask>>,
    next_run: u64,
    period: u64,
}

#[derive(Default)]
struct SchedulerInner {
    now: u64,
    next_id: u64,
    entries: Vec<Entry>,
    cancels: HashMap<TaskHandle, usize>,
    runs: HashMap<TaskHandle, usize>,
}

/// Scheduler double that records cancellations.
#[derive(Default)]
pub struct MockScheduler {
    inner: Mutex<SchedulerInner>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, SchedulerInner> {
        self.inner.lock().unwrap()
    }

    pub fn now(&self) -> Tick {
        Tick(self.inner().now)
    }

    pub fn cancel_count(&self, handle: TaskHandle) -> usize {
        self.inner().cancels.get(&handle).copied().unwrap_or(0)
    }

    pub fn runs_of(&self, handle: TaskHandle) -> usize {
        self.inner().runs.get(&handle).copied().unwrap_or(0)
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.inner().entries.iter().any(|e| e.handle == handle)
    }

    pub fn period_of(&self, handle: TaskHandle) -> Option<u64> {
        self.inner()
            .entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.period)
    }

    pub fn run_tick(&self, world: &dyn WorldOracle) {
        let (now, due) = {
            let mut inner = self.inner();
            inner.now += 1;
            let now = inner.now;
            let due: Vec<_> = inner
                .entries
                .iter_mut()
                .filter(|e| e.next_run <= now)
                .filter_map(|e| e.task.take().map(|task| (e.handle, task)))
                .collect();
            (now, due)
        };

        for (handle, mut task) in due {
            let ctx = TickContext {
                now: Tick(now),
                handle,
                world,
                scheduler: self,
            };
            task.run(&ctx);

            let mut inner = self.inner();
            *inner.runs.entry(handle).or_insert(0) += 1;
            if inner.cancels.contains_key(&handle) {
                inner.entries.retain(|e| e.handle != handle);
            } else if let Some(entry) = inner.entries.iter_mut().find(|e| e.handle == handle) {
                entry.task = Some(task);
                entry.next_run = now + entry.period;
            }
        }
    }
}

impl Scheduler for MockScheduler {
    fn schedule_repeating(
        &self,
        task: Box<dyn RepeatingTask>,
        initial_delay: u64,
        period: u64,
    ) -> TaskHandle {
        let mut inner = self.inner();
        inner.next_id += 1;
        let handle = TaskHandle(inner.next_id);
        let next_run = inner.now + 1 + initial_delay;
        inner.entries.push(Entry {
            handle,
            task: Some(task),
            next_run,
            period,
        });
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut inner = self.inner();
        *inner.cancels.entry(handle).or_insert(0) += 1;
        // Running tasks are dropped by `run_tick` once they return.
        inner
            .entries
            .retain(|e| e.handle != handle || e.task.is_none());
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }
}

impl PowerRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }

    fn fork(&mut self) -> Box<dyn PowerRng> {
        Box::new(self.clone())
    }
}
