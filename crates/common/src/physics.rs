//! Collaborator seams: the rigid-body integrator and the ground query service.
//!
//! The locomotion core never owns a physics engine. It reads and writes a body
//! through [`RigidBody`], asks [`GroundProbe`] where the floor is, and leaves
//! the actual integration step to an [`Integrator`] supplied by the host.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Bit set of collision layers a query is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing only `layer` (0..32).
    pub const fn layer(layer: u8) -> Self {
        Self(1 << (layer as u32 & 31))
    }

    pub fn contains(self, layer: u8) -> bool {
        self.0 & Self::layer(layer).0 != 0
    }

    pub fn with(self, layer: u8) -> Self {
        Self(self.0 | Self::layer(layer).0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Result of a successful downward shape cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// Contact point on the walkable surface.
    pub point: Vec3,
    /// Distance the shape travelled before touching.
    pub distance: f32,
    /// Layer of the surface that was hit.
    pub layer: u8,
}

/// Downward shape-cast query service.
pub trait GroundProbe {
    /// Sweep a sphere of `radius` from `origin` straight down, at most
    /// `max_distance`, against surfaces whose layer is in `mask`.
    fn cast_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<GroundHit>;
}

impl<T: GroundProbe + ?Sized> GroundProbe for &T {
    fn cast_down(&self, origin: Vec3, radius: f32, max_distance: f32, mask: LayerMask) -> Option<GroundHit> {
        (**self).cast_down(origin, radius, max_distance, mask)
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for Arc<T> {
    fn cast_down(&self, origin: Vec3, radius: f32, max_distance: f32, mask: LayerMask) -> Option<GroundHit> {
        (**self).cast_down(origin, radius, max_distance, mask)
    }
}

/// The velocity/pose channel of an externally integrated rigid body.
///
/// Velocity is overwritten by the locomotion controller every fixed tick;
/// forces added through [`RigidBody::add_force`] are consumed by the next
/// integration step only.
pub trait RigidBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn add_force(&mut self, force: Vec3);
}

impl<T: RigidBody + ?Sized> RigidBody for Box<T> {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position)
    }
    fn rotation(&self) -> Quat {
        (**self).rotation()
    }
    fn set_rotation(&mut self, rotation: Quat) {
        (**self).set_rotation(rotation)
    }
    fn velocity(&self) -> Vec3 {
        (**self).velocity()
    }
    fn set_velocity(&mut self, velocity: Vec3) {
        (**self).set_velocity(velocity)
    }
    fn add_force(&mut self, force: Vec3) {
        (**self).add_force(force)
    }
}

/// Host-side physics step applied after locomotion has written the body.
pub trait Integrator<B: ?Sized> {
    fn integrate(&mut self, body: &mut B, dt: f32);
}
