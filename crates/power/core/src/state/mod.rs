//! Value types shared by every power.
//!
//! Identifiers, the tick clock, spatial coordinates and block materials live
//! here. None of these types own host resources; they are plain data handed
//! across the collaborator traits in [`crate::env`].
mod common;
mod material;

pub use common::{BlockPos, EntityId, Location, PowerId, TaskHandle, Tick, TransientHandle, Vec3};
pub use material::{Material, WoolColor};
