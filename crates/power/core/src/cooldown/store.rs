//! Cooldown record storage.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::state::{EntityId, PowerId, Tick};

/// Key of one cooldown record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CooldownKey {
    pub actor: EntityId,
    pub power: PowerId,
}

impl CooldownKey {
    pub fn new(actor: EntityId, power: PowerId) -> Self {
        Self { actor, power }
    }
}

/// Storage of last-use ticks keyed by actor and power.
///
/// # Concurrency
///
/// `update` must give `f` exclusive access to the record for `key` for the
/// whole call: two concurrent updates of the same key are serialized, so at
/// most one of two simultaneous activations can observe an expired cooldown.
/// Updates of different keys may run in parallel.
pub trait CooldownStore: Send + Sync {
    /// Runs `f` on the record for `key` while holding it exclusively.
    ///
    /// `None` means no successful activation has been recorded yet. Whatever
    /// `f` leaves in the slot is stored; the return value of `f` is passed
    /// through.
    fn update(&self, key: CooldownKey, f: &mut dyn FnMut(&mut Option<Tick>) -> bool) -> bool;

    fn last_use(&self, key: CooldownKey) -> Option<Tick>;

    /// Drops every record of `actor`, returning how many were removed.
    ///
    /// Hosts call this when an actor despawns; records are never removed
    /// otherwise.
    fn forget_actor(&self, actor: EntityId) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded in-memory store.
///
/// Keys are spread over a fixed number of mutex-protected maps, so contention
/// only arises between activations that hash to the same shard.
#[derive(Debug)]
pub struct InMemoryCooldownStore {
    shards: Vec<Mutex<HashMap<CooldownKey, Tick>>>,
}

impl InMemoryCooldownStore {
    pub const DEFAULT_SHARDS: usize = 16;

    pub fn new() -> Self {
        Self::with_shards(Self::DEFAULT_SHARDS)
    }

    pub fn with_shards(shards: usize) -> Self {
        let shards = (0..shards.max(1)).map(|_| Mutex::new(HashMap::new())).collect();
        Self { shards }
    }

    fn shard(&self, key: &CooldownKey) -> MutexGuard<'_, HashMap<CooldownKey, Tick>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        // A panic inside `update` cannot leave a record half-written.
        self.shards[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryCooldownStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CooldownStore for InMemoryCooldownStore {
    fn update(&self, key: CooldownKey, f: &mut dyn FnMut(&mut Option<Tick>) -> bool) -> bool {
        let mut shard = self.shard(&key);
        let mut slot = shard.get(&key).copied();
        let result = f(&mut slot);
        match slot {
            Some(tick) => {
                shard.insert(key, tick);
            }
            None => {
                shard.remove(&key);
            }
        }
        result
    }

    fn last_use(&self, key: CooldownKey) -> Option<Tick> {
        self.shard(&key).get(&key).copied()
    }

    fn forget_actor(&self, actor: EntityId) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                let mut shard = shard.lock().unwrap_or_else(PoisonError::into_inner);
                let before = shard.len();
                shard.retain(|key, _| key.actor != actor);
                before - shard.len()
            })
            .sum()
    }

    fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }
}
