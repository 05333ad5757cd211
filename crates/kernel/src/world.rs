use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use stride_common::{GroundHit, GroundProbe, Integrator, LayerMask, RigidBody, Transform};
use uuid::Uuid;

use crate::ground::Ground;

/// Unique identifier for a simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub Uuid);

impl BodyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-mass rigid body with a force accumulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimBody {
    pub id: BodyId,
    pub transform: Transform,
    pub velocity: Vec3,
    pub mass: f32,
    #[serde(skip)]
    force: Vec3,
}

impl SimBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            id: BodyId::new(),
            transform: Transform::from_position(position),
            velocity: Vec3::ZERO,
            mass: 1.0,
            force: Vec3::ZERO,
        }
    }

    /// Forces added since the last integration step.
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }
}

impl RigidBody for SimBody {
    fn position(&self) -> Vec3 {
        self.transform.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }
}

/// An event recorded by every integration step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A body was integrated for one step.
    Stepped { tick: u64, body: BodyId },
    /// A falling body was stopped by a ground surface.
    Supported { tick: u64, body: BodyId, height: f32 },
}

/// Sandbox physics: shared ground plus gravity and a step counter.
///
/// The ground sits behind an [`Arc`] so the same geometry can be injected
/// into an actor as its [`GroundProbe`] while the world integrates bodies.
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    ground: Arc<Ground>,
    gravity: Vec3,
    tick: u64,
    event_log: Vec<WorldEvent>,
}

impl SandboxWorld {
    /// Default gravity matches the locomotion default of -15 m/s².
    pub const DEFAULT_GRAVITY: f32 = -15.0;

    pub fn new(ground: Ground) -> Self {
        Self::with_gravity(ground, Self::DEFAULT_GRAVITY)
    }

    pub fn with_gravity(ground: Ground, gravity: f32) -> Self {
        Self {
            ground: Arc::new(ground),
            gravity: Vec3::new(0.0, gravity, 0.0),
            tick: 0,
            event_log: Vec::new(),
        }
    }

    /// Flat floor at height 0 spanning ±`extent`.
    pub fn flat(extent: f32) -> Self {
        Self::new(Ground::flat(0.0, extent))
    }

    /// Shared handle to the ground, for injection as a probe.
    pub fn ground(&self) -> Arc<Ground> {
        Arc::clone(&self.ground)
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Deterministic hash of the step counter and a body's state.
    pub fn state_hash(&self, body: &SimBody) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        let t = &body.transform;
        for v in [
            t.position.x,
            t.position.y,
            t.position.z,
            t.rotation.x,
            t.rotation.y,
            t.rotation.z,
            t.rotation.w,
            body.velocity.x,
            body.velocity.y,
            body.velocity.z,
        ] {
            mix(&mut h, &v.to_le_bytes());
        }
        h
    }
}

impl GroundProbe for SandboxWorld {
    fn cast_down(&self, origin: Vec3, radius: f32, max_distance: f32, mask: LayerMask) -> Option<GroundHit> {
        self.ground.cast_down(origin, radius, max_distance, mask)
    }
}

impl Integrator<SimBody> for SandboxWorld {
    /// Semi-implicit Euler; clamps onto any surface crossed this step.
    fn integrate(&mut self, body: &mut SimBody, dt: f32) {
        self.tick += 1;
        let accel = self.gravity + body.force / body.mass.max(f32::EPSILON);
        body.force = Vec3::ZERO;
        body.velocity += accel * dt;

        let from = body.transform.position;
        let mut to = from + body.velocity * dt;
        if let Some(height) = self.ground.support_height(from, to) {
            to.y = height;
            if body.velocity.y < 0.0 {
                if from.y > height {
                    self.event_log.push(WorldEvent::Supported {
                        tick: self.tick,
                        body: body.id,
                        height,
                    });
                }
                body.velocity.y = 0.0;
            }
        }
        body.transform.position = to;
        self.event_log.push(WorldEvent::Stepped {
            tick: self.tick,
            body: body.id,
        });
        tracing::trace!(tick = self.tick, pos = ?to, vel = ?body.velocity, "integrated body");
    }
}
