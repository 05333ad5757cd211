use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a playable actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

/// Spatial pose of an actor: world position and facing.
///
/// Facing follows the right-handed, Y-up convention: the identity rotation
/// looks down `-Z` with `+X` to the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

/// Camera axes handed to the locomotion controller each fixed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraBasis {
    pub const IDENTITY: Self = Self {
        forward: Vec3::NEG_Z,
        right: Vec3::X,
    };

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
        }
    }

    /// Forward and right flattened onto the ground plane and renormalized.
    /// Either may be zero if the camera looks straight along `Y`.
    pub fn horizontal(&self) -> (Vec3, Vec3) {
        let flatten = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
        (flatten(self.forward), flatten(self.right))
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Yaw-only rotation whose forward axis points along the horizontal part of `dir`.
///
/// Returns `None` for a direction with no horizontal component.
pub fn facing_toward(dir: Vec3) -> Option<Quat> {
    let flat = Vec3::new(dir.x, 0.0, dir.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}
