//! Input sampling: raw device state in, normalized [`MovementInput`] out.
//!
//! # Invariants
//! - Movement axes are always within `[-1, 1]`; non-finite samples read as zero.
//! - Jump is edge-triggered: one request per press, consumed once.
//! - Sprint is level-triggered: true every sample the control is held.
//! - A missing device yields neutral input, never an error.

pub mod action;
pub mod sampler;
pub mod source;

pub use action::Action;
pub use sampler::{InputSampler, MovementInput, SPRINT_MIN_MOVE_AMOUNT};
pub use source::{ActionSource, DeviceFrame, DeviceSource, ScriptedSource};

pub fn crate_info() -> &'static str {
    "stride-input v0.1.0"
}
