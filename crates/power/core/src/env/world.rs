//! World query and mutation interface.

use crate::env::WorldError;
use crate::state::{EntityId, Location, Material, TransientHandle, Vec3};

/// Presentation-only side effects.
///
/// The host decides how (or whether) to render these. Powers never retry
/// them and never depend on their outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cosmetic {
    /// Splash particles tinted with an effect colour.
    PotionBreak { rgb: u32 },
    /// Block-break particles and sound for the given material.
    StepSound(Material),
    /// A positioned sound.
    Sound {
        kind: SoundKind,
        volume: f32,
        pitch: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKind {
    ArrowShoot,
}

/// Last observation of a spawned transient entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransientStatus {
    pub location: Location,
    pub alive: bool,
}

/// Host world seen by the powers.
///
/// Implementations use interior mutability: every method takes `&self` so a
/// world can be shared between the activation path and scheduled tasks.
pub trait WorldOracle: Send + Sync {
    /// All entities within `radius` of `origin`, in no particular order.
    fn entities_within(&self, origin: Location, radius: f64) -> Vec<EntityId>;

    /// Whether the entity can receive status effects.
    fn is_living(&self, entity: EntityId) -> bool;

    /// Current location, `None` once the entity is gone.
    fn location_of(&self, entity: EntityId) -> Option<Location>;

    /// Unit facing vector, `None` once the entity is gone.
    fn facing_of(&self, entity: EntityId) -> Option<Vec3>;

    fn block_material_at(&self, location: Location) -> Result<Material, WorldError>;

    fn set_block_material(&self, location: Location, material: Material) -> Result<(), WorldError>;

    /// Spawns a short-lived falling block that never drops an item.
    fn spawn_transient(
        &self,
        location: Location,
        material: Material,
        velocity: Vec3,
    ) -> Result<TransientHandle, WorldError>;

    /// `None` means the host has already forgotten the transient.
    fn transient_status(&self, handle: TransientHandle) -> Option<TransientStatus>;

    fn play_cosmetic(&self, location: Location, cosmetic: Cosmetic);
}
