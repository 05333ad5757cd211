//! Locomotion: the per-tick movement core of a playable actor.
//!
//! Each fixed step the [`LocomotionController`] resolves grounding with a
//! downward sphere cast, integrates air time, applies the jump impulse,
//! picks a speed tier and writes the body's velocity and facing.
//!
//! # Invariants
//! - The controller is the only writer of [`MovementState`] and of the
//!   body's velocity channel.
//! - `Grounded` is entered only on a probe hit while no jump is in progress.
//! - A jump impulse tick never re-grounds the actor.

mod controller;
mod params;
mod state;

pub use controller::{LANDING_BLEND_TIME, LocomotionController, TickOutcome};
pub use params::{LocomotionParameters, RUN_THRESHOLD};
pub use state::{AnimationFeedback, LocomotionEvent, MovementState};

pub fn crate_info() -> &'static str {
    "stride-locomotion v0.1.0"
}
