//! Effect alias catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use power_core::EffectKind;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::registry::EffectRegistry;

/// RON layout of an alias catalog.
///
/// ```ron
/// (
///     aliases: {
///         "HASTE": SPEED,
///         "POISONING": POISON,
///     },
/// )
/// ```
#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, EffectKind>,
}

/// Loader for effect alias catalogs from RON files.
pub struct EffectLoader;

impl EffectLoader {
    pub fn load(path: &Path) -> LoadResult<EffectRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EffectRegistry> {
        let file: AliasFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect aliases RON: {}", e))?;
        Ok(file.aliases.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use power_core::EffectKindResolver;

    use super::*;

    #[test]
    fn parses_aliases() {
        let registry =
            EffectLoader::parse(r#"(aliases: { "HASTE": SPEED, "poisoning": POISON })"#).unwrap();
        assert_eq!(registry.alias_count(), 2);
        assert_eq!(registry.resolve("haste"), Some(EffectKind::Speed));
        assert_eq!(registry.resolve("POISONING"), Some(EffectKind::Poison));
    }

    #[test]
    fn empty_catalog_is_valid() {
        assert_eq!(EffectLoader::parse("()").unwrap().alias_count(), 0);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(EffectLoader::parse(r#"(aliases: { "X": LEVITATION_PLUS })"#).is_err());
    }
}
