//! Data-driven power definitions and loaders.
//!
//! This crate turns data files into configured powers:
//! - Power catalog (power name → constructor, sequential id assignment)
//! - Effect registry (effect name or alias → kind)
//! - Power files (data-driven via TOML)
//! - Effect alias catalogs (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//!
//! All loaders use power-core types directly with serde for RON/TOML deserialization.

pub mod catalog;
pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{PowerCatalog, PowerConstructor};
pub use registry::EffectRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EffectLoader, PowerEntry, PowerFile, PowerLoader};
