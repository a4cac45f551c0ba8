//! Tick-driven transient animation.
//!
//! A rainbow activation launches a burst of falling blocks and then cleans
//! their landing sites up over many scheduler ticks. The work is split in
//! two:
//!
//! - [`AnimationState`] holds the in-flight and settled collections and
//!   exposes [`AnimationState::step`], a pure function of the state, the
//!   world and a random source.
//! - [`AnimationTicker`] is the [`crate::env::RepeatingTask`] adapter that
//!   owns a state plus its own random stream and cancels its scheduler
//!   registration exactly once when the state drains.
mod state;
mod ticker;

pub use state::{
    AnimationState, SettledLocation, StepOutcome, TransientMatcher, TransientProjectile,
};
pub use ticker::{AnimationTicker, LaunchPoint, TickerPhase};
