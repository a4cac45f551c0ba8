//! Persisted settings of the built-in powers.

use crate::config::{ConfigError, ConfigSection, LoadDefaults, SectionValue};
use crate::effect::{EffectDescriptor, EffectKind, EffectKindResolver};

/// Settings of the area-effect power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AoeConfig {
    pub cooldown: u64,
    /// Radius around the caster, in blocks.
    pub range: i32,
    pub duration: u32,
    /// 1-based potency.
    pub amplifier: i32,
    /// Whether the caster receives the effect too.
    pub self_application: bool,
    pub effect: EffectKind,
    /// Display text override.
    pub name: Option<String>,
    pub consumption: i32,
}

impl AoeConfig {
    pub const DEFAULT_COOLDOWN: u64 = 20;
    pub const DEFAULT_RANGE: i32 = 5;
    /// In-code default for freshly constructed configs.
    pub const DEFAULT_DURATION: u32 = 15;
    /// Default applied to persisted sections that lack `duration`.
    pub const LOAD_DEFAULT_DURATION: u32 = 60;
    pub const DEFAULT_AMPLIFIER: i32 = 1;

    /// Reads a section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownEffectKind` when `type` names no effect
    /// known to `resolver`, and `ConfigError::InvalidValue` for malformed
    /// values.
    pub fn load(
        section: &dyn ConfigSection,
        defaults: &LoadDefaults,
        resolver: &dyn EffectKindResolver,
    ) -> Result<Self, ConfigError> {
        let type_name = section
            .get_string("type")?
            .unwrap_or_else(|| EffectKind::DEFAULT.to_string());
        let effect = resolver
            .resolve(&type_name)
            .ok_or(ConfigError::UnknownEffectKind(type_name))?;

        Ok(Self {
            cooldown: section.get_u64("cooldown", Self::DEFAULT_COOLDOWN)?,
            duration: section.get_u32("duration", defaults.aoe_duration)?,
            amplifier: section.get_i32("amplifier", Self::DEFAULT_AMPLIFIER)?,
            range: section.get_i32("range", Self::DEFAULT_RANGE)?,
            self_application: section.get_bool("selfapplication", true)?,
            effect,
            name: section.get_string("name")?,
            consumption: section.get_i32("consumption", 0)?,
        })
    }

    pub fn save(&self, section: &mut dyn ConfigSection) {
        section.set("cooldown", Some(tick_value(self.cooldown)));
        section.set("range", Some(SectionValue::Int(i64::from(self.range))));
        section.set("duration", Some(SectionValue::Int(i64::from(self.duration))));
        section.set("amplifier", Some(SectionValue::Int(i64::from(self.amplifier))));
        section.set("selfapplication", Some(SectionValue::Bool(self.self_application)));
        section.set("type", Some(SectionValue::Str(self.effect.to_string())));
        section.set("name", self.name.clone().map(SectionValue::Str));
        section.set("consumption", Some(SectionValue::Int(i64::from(self.consumption))));
    }

    pub fn descriptor(&self) -> EffectDescriptor {
        EffectDescriptor::from_amplifier(self.effect, self.duration, self.amplifier)
    }
}

fn tick_value(ticks: u64) -> SectionValue {
    SectionValue::Int(i64::try_from(ticks).unwrap_or(i64::MAX))
}

impl Default for AoeConfig {
    fn default() -> Self {
        Self {
            cooldown: Self::DEFAULT_COOLDOWN,
            range: Self::DEFAULT_RANGE,
            duration: Self::DEFAULT_DURATION,
            amplifier: Self::DEFAULT_AMPLIFIER,
            self_application: true,
            effect: EffectKind::DEFAULT,
            name: None,
            consumption: 0,
        }
    }
}

/// Settings of the rainbow power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RainbowConfig {
    pub cooldown: u64,
    /// Number of transient blocks launched per activation.
    pub count: u32,
    /// Launch fire instead of wool.
    pub is_fire: bool,
    pub consumption: i32,
}

impl RainbowConfig {
    pub const DEFAULT_COOLDOWN: u64 = 20;
    pub const DEFAULT_COUNT: u32 = 5;

    /// Reads a section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for malformed values.
    pub fn load(section: &dyn ConfigSection) -> Result<Self, ConfigError> {
        Ok(Self {
            cooldown: section.get_u64("cooldown", Self::DEFAULT_COOLDOWN)?,
            count: section.get_u32("count", Self::DEFAULT_COUNT)?,
            is_fire: section.get_bool("isFire", false)?,
            consumption: section.get_i32("consumption", 0)?,
        })
    }

    pub fn save(&self, section: &mut dyn ConfigSection) {
        section.set("cooldown", Some(tick_value(self.cooldown)));
        section.set("count", Some(SectionValue::Int(i64::from(self.count))));
        section.set("isFire", Some(SectionValue::Bool(self.is_fire)));
        section.set("consumption", Some(SectionValue::Int(i64::from(self.consumption))));
    }
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            cooldown: Self::DEFAULT_COOLDOWN,
            count: Self::DEFAULT_COUNT,
            is_fire: false,
            consumption: 0,
        }
    }
}
