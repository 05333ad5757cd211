//! Animation blending: quantized, damped blend-tree parameters plus the
//! request/confirmation handshake with the locomotion controller.
//!
//! # Invariants
//! - Snapped axis values are drawn from `{-1, -0.5, 0, 0.5, 1}`, or the
//!   sprint sentinel `2` on the vertical axis.
//! - Parameters reach the animator through [`AnimationSink`] only.
//! - The animation layer is authoritative for `isInteracting` and
//!   `isJumping`; locomotion reads them back once per frame.

mod blender;
mod sink;
mod snap;

pub use blender::{AnimationBlender, AnimationSignal, BlendConfig};
pub use sink::{AnimationSink, SimulatedAnimator, param, state};
pub use snap::{SNAP_FULL_THRESHOLD, SPRINT_SENTINEL, snap_axis};

pub fn crate_info() -> &'static str {
    "stride-anim v0.1.0"
}
