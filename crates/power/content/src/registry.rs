//! Effect name resolution with aliases.

use std::collections::HashMap;

use power_core::{BuiltinEffectKinds, EffectKind, EffectKindResolver};

/// Resolves built-in effect names plus registered aliases.
///
/// Aliases are matched case-insensitively. A built-in name always wins over
/// an alias with the same spelling.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    aliases: HashMap<String, EffectKind>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, alias: &str, kind: EffectKind) -> Self {
        self.insert_alias(alias, kind);
        self
    }

    /// Registers `alias`, returning the kind it previously mapped to.
    pub fn insert_alias(&mut self, alias: &str, kind: EffectKind) -> Option<EffectKind> {
        self.aliases.insert(Self::normalize(alias), kind)
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    fn normalize(name: &str) -> String {
        name.trim().to_ascii_uppercase()
    }
}

impl EffectKindResolver for EffectRegistry {
    fn resolve(&self, name: &str) -> Option<EffectKind> {
        BuiltinEffectKinds
            .resolve(name)
            .or_else(|| self.aliases.get(&Self::normalize(name)).copied())
    }
}

impl FromIterator<(String, EffectKind)> for EffectRegistry {
    fn from_iter<T: IntoIterator<Item = (String, EffectKind)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (alias, kind) in iter {
            registry.insert_alias(&alias, kind);
        }
        registry
    }
}
