//! Timed status effects and their one-shot area application.
mod apply;
mod kind;

pub use apply::{ApplyReport, EffectApplicator};
pub use kind::{BuiltinEffectKinds, EffectKind, EffectKindResolver};

/// One effect application handed to the [`crate::env::StatusSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    pub duration_ticks: u32,
    /// 0-based potency.
    pub strength: u32,
}

impl EffectDescriptor {
    /// Builds a descriptor from a 1-based configured amplifier.
    ///
    /// The sink's strength scale is 0-based, so `amplifier = 1` becomes
    /// `strength = 0`. Amplifiers below 1 are treated as 1.
    pub fn from_amplifier(kind: EffectKind, duration_ticks: u32, amplifier: i32) -> Self {
        Self {
            kind,
            duration_ticks,
            strength: (amplifier.max(1) - 1) as u32,
        }
    }
}
