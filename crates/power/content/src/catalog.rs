//! Power catalog: builds configured powers from persisted sections.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use power_core::{
    AoeConfig, AoePower, ConfigError, ConfigSection, EffectKindResolver, LoadDefaults, Power,
    PowerId, PowerKind, RainbowConfig, RainbowPower,
};
use tracing::debug;

use crate::registry::EffectRegistry;

/// Builds one power from its persisted section.
pub type PowerConstructor = fn(
    PowerId,
    &dyn ConfigSection,
    &LoadDefaults,
    &dyn EffectKindResolver,
) -> Result<Box<dyn Power>, ConfigError>;

/// Resolves power names to constructors and hands out power identities.
///
/// Ids are assigned sequentially starting at 1, in build order.
pub struct PowerCatalog {
    constructors: BTreeMap<String, PowerConstructor>,
    resolver: Arc<dyn EffectKindResolver>,
    defaults: LoadDefaults,
    next_id: AtomicU32,
}

impl PowerCatalog {
    /// Creates an empty catalog.
    pub fn new(resolver: Arc<dyn EffectKindResolver>, defaults: LoadDefaults) -> Self {
        Self {
            constructors: BTreeMap::new(),
            resolver,
            defaults,
            next_id: AtomicU32::new(1),
        }
    }

    /// Creates a catalog knowing the built-in `aoe` and `rainbow` powers.
    pub fn with_builtins(resolver: Arc<dyn EffectKindResolver>, defaults: LoadDefaults) -> Self {
        let mut catalog = Self::new(resolver, defaults);
        catalog.register(PowerKind::Aoe.as_ref(), build_aoe);
        catalog.register(PowerKind::Rainbow.as_ref(), build_rainbow);
        catalog
    }

    /// Built-in powers with no aliases and legacy load defaults.
    pub fn standard() -> Self {
        Self::with_builtins(Arc::new(EffectRegistry::new()), LoadDefaults::default())
    }

    /// Registers or replaces the constructor for `name`.
    pub fn register(&mut self, name: &str, constructor: PowerConstructor) {
        self.constructors.insert(name.to_ascii_lowercase(), constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&name.to_ascii_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.keys().map(String::as_str)
    }

    pub fn resolver(&self) -> &dyn EffectKindResolver {
        self.resolver.as_ref()
    }

    pub fn defaults(&self) -> &LoadDefaults {
        &self.defaults
    }

    /// Builds the power registered under `name` from `section`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPower` for unregistered names and any
    /// error the constructor reports for the section.
    pub fn build(
        &self,
        name: &str,
        section: &dyn ConfigSection,
    ) -> Result<Box<dyn Power>, ConfigError> {
        let constructor = self
            .constructors
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownPower(name.to_string()))?;
        let id = PowerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let power = constructor(id, section, &self.defaults, self.resolver.as_ref())?;
        debug!(%id, name, "power built");
        Ok(power)
    }
}

impl std::fmt::Debug for PowerCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerCatalog")
            .field("powers", &self.constructors.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults)
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

fn build_aoe(
    id: PowerId,
    section: &dyn ConfigSection,
    defaults: &LoadDefaults,
    resolver: &dyn EffectKindResolver,
) -> Result<Box<dyn Power>, ConfigError> {
    let config = AoeConfig::load(section, defaults, resolver)?;
    Ok(Box::new(AoePower::new(id, config)))
}

fn build_rainbow(
    id: PowerId,
    section: &dyn ConfigSection,
    _defaults: &LoadDefaults,
    _resolver: &dyn EffectKindResolver,
) -> Result<Box<dyn Power>, ConfigError> {
    let config = RainbowConfig::load(section)?;
    Ok(Box::new(RainbowPower::new(id, config)))
}

#[cfg(test)]
mod tests {
    use power_core::{EffectKind, MemorySection};

    use super::*;

    #[test]
    fn builds_builtins_with_sequential_ids() {
        let catalog = PowerCatalog::standard();
        let first = catalog.build("aoe", &MemorySection::new()).unwrap();
        let second = catalog.build("Rainbow", &MemorySection::new()).unwrap();

        assert_eq!(first.id(), PowerId(1));
        assert_eq!(first.kind(), PowerKind::Aoe);
        assert_eq!(second.id(), PowerId(2));
        assert_eq!(second.name(), "rainbow");
    }

    #[test]
    fn unknown_power_is_reported() {
        let catalog = PowerCatalog::standard();
        assert_eq!(
            catalog.build("lightning", &MemorySection::new()).err(),
            Some(ConfigError::UnknownPower("lightning".into()))
        );
    }

    #[test]
    fn unknown_effect_fails_the_power() {
        let catalog = PowerCatalog::standard();
        let section = MemorySection::new().with("type", "NOT_AN_EFFECT");
        assert_eq!(
            catalog.build("aoe", &section).err(),
            Some(ConfigError::UnknownEffectKind("NOT_AN_EFFECT".into()))
        );
    }

    #[test]
    fn aliases_reach_the_aoe_constructor() {
        let registry = EffectRegistry::new().with_alias("HASTE", EffectKind::Speed);
        let catalog = PowerCatalog::with_builtins(Arc::new(registry), LoadDefaults::PROGRAMMATIC);
        let power = catalog
            .build("aoe", &MemorySection::new().with("type", "haste"))
            .unwrap();

        let mut saved = MemorySection::new();
        power.save(&mut saved);
        assert_eq!(saved.get("type"), Some("SPEED".into()));
        assert_eq!(saved.get("duration"), Some(15_i64.into()));
    }

    #[test]
    fn lists_registered_names() {
        let catalog = PowerCatalog::standard();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["aoe", "rainbow"]);
        assert!(catalog.contains("AOE"));
    }
}
