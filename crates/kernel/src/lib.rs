//! Sandbox Kernel: a deterministic stand-in for the host engine's physics.
//!
//! Provides static ground geometry answering downward sphere casts, a point
//! rigid body, and a semi-implicit Euler integrator that keeps bodies on top
//! of the ground they land on.
//!
//! # Invariants
//! - Integration is pure with respect to its inputs; equal inputs give equal
//!   `state_hash` values on every platform.
//! - Ground patches are immutable once shared with an actor.

pub mod ground;
pub mod world;

pub use ground::{Ground, GroundPatch, PatchId};
pub use world::{BodyId, SandboxWorld, SimBody, WorldEvent};

pub fn crate_info() -> &'static str {
    "stride-kernel v0.1.0"
}
