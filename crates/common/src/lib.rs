//! Shared vocabulary for the stride locomotion core.
//!
//! # Invariants
//! - Collaborators (physics body, ground query) are reached only through the
//!   traits in [`physics`]; no crate downcasts to a concrete backend.
//! - Configuration failures surface as [`ConfigError`] at construction time,
//!   never during a tick.

pub mod damping;
pub mod error;
pub mod physics;
pub mod types;

pub use damping::{exp_damp, smooth_damp, smooth_damp_vec3};
pub use error::ConfigError;
pub use physics::{GroundHit, GroundProbe, Integrator, LayerMask, RigidBody};
pub use types::{ActorId, CameraBasis, Transform, facing_toward};

pub fn crate_info() -> &'static str {
    "stride-common v0.1.0"
}
