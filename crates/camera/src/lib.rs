//! Camera rig: look and pivot angles driven by look input, a damped follow of
//! the tracked subject, and the movement basis the locomotion controller uses.
//!
//! # Invariants
//! - Pivot and look angles are clamped to their configured ranges after
//!   every update.
//! - Angles and follow state change only in `update`, once per variable-rate tick.

mod rig;

pub use rig::{CameraConfig, CameraRig, CameraState};

pub fn crate_info() -> &'static str {
    "stride-camera v0.1.0"
}
