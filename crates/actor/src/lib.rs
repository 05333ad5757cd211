//! Actor coordination: builds a playable actor from injected collaborators
//! and drives it through named phases each frame.
//!
//! Per frame: `sample_input`, `update_camera`, then zero or more fixed
//! `integrate_locomotion` steps, then `reconcile_animation_state`.
//!
//! # Invariants
//! - Input is sampled before any fixed step of the same frame consumes it.
//! - The camera basis is refreshed before locomotion reads it.
//! - The interaction lock is the value last confirmed by the animation layer.

pub mod builder;
pub mod config;
pub mod coordinator;

pub use builder::ActorBuilder;
pub use config::{ActorConfig, LoadError};
pub use coordinator::{ActorCoordinator, FrameReport};

pub fn crate_info() -> &'static str {
    "stride-actor v0.1.0"
}
