//! Catalog of status effect kinds.

use std::str::FromStr;

/// Status effects a power can apply.
///
/// Names follow the host's upper-snake identifiers (`FAST_DIGGING`,
/// `DOLPHINS_GRACE`, ...) and parse case-insensitively.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::VariantArray,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EffectKind {
    Speed,
    Slow,
    FastDigging,
    SlowDigging,
    IncreaseDamage,
    Heal,
    Harm,
    Jump,
    Confusion,
    Regeneration,
    DamageResistance,
    FireResistance,
    WaterBreathing,
    Invisibility,
    Blindness,
    NightVision,
    Hunger,
    Weakness,
    Poison,
    Wither,
    HealthBoost,
    Absorption,
    Saturation,
    Glowing,
    Levitation,
    Luck,
    Unluck,
    SlowFalling,
    ConduitPower,
    DolphinsGrace,
}

impl EffectKind {
    /// Kind used when a power file names none.
    pub const DEFAULT: EffectKind = EffectKind::Harm;

    /// Tint of the splash particles, as `0xRRGGBB`.
    pub const fn color(self) -> u32 {
        use EffectKind::*;
        match self {
            Speed => 0x7CAFC6,
            Slow => 0x5A6C81,
            FastDigging => 0xD9C043,
            SlowDigging => 0x4A4217,
            IncreaseDamage => 0x932423,
            Heal => 0xF82423,
            Harm => 0x430A09,
            Jump => 0x22FF4C,
            Confusion => 0x551D4A,
            Regeneration => 0xCD5CAB,
            DamageResistance => 0x99453A,
            FireResistance => 0xE49A3A,
            WaterBreathing => 0x2E5299,
            Invisibility => 0x7F8392,
            Blindness => 0x1F1F23,
            NightVision => 0x1F1FA1,
            Hunger => 0x587653,
            Weakness => 0x484D48,
            Poison => 0x4E9331,
            Wither => 0x352A27,
            HealthBoost => 0xF87D23,
            Absorption => 0x2552A5,
            Saturation => 0xF82423,
            Glowing => 0x94A061,
            Levitation => 0xCEFFFF,
            Luck => 0x339900,
            Unluck => 0xC0A44D,
            SlowFalling => 0xFFEFD1,
            ConduitPower => 0x1DC2D1,
            DolphinsGrace => 0x88A3BE,
        }
    }
}

/// Resolves configured effect names to kinds.
///
/// The catalog owner may layer aliases or host-specific names on top of the
/// built-in identifiers; the powers only ever ask for a name lookup.
pub trait EffectKindResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<EffectKind>;
}

/// Resolver that accepts exactly the built-in identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinEffectKinds;

impl EffectKindResolver for BuiltinEffectKinds {
    fn resolve(&self, name: &str) -> Option<EffectKind> {
        EffectKind::from_str(name.trim()).ok()
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[test]
    fn parses_host_identifiers() {
        let resolver = BuiltinEffectKinds;
        assert_eq!(resolver.resolve("FAST_DIGGING"), Some(EffectKind::FastDigging));
        assert_eq!(resolver.resolve("dolphins_grace"), Some(EffectKind::DolphinsGrace));
        assert_eq!(resolver.resolve(" HARM "), Some(EffectKind::Harm));
        assert_eq!(resolver.resolve("TELEPORT"), None);
    }

    #[test]
    fn every_kind_round_trips_through_its_name() {
        assert_eq!(EffectKind::VARIANTS.len(), 30);
        for kind in EffectKind::VARIANTS {
            assert_eq!(BuiltinEffectKinds.resolve(kind.as_ref()), Some(*kind));
        }
    }
}
