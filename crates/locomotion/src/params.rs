use serde::{Deserialize, Serialize};
use stride_common::{ConfigError, LayerMask};

/// Move amount at or above which the actor runs instead of walks.
///
/// Fixed for now; expose it per actor if designers need a different feel.
pub const RUN_THRESHOLD: f32 = 0.5;

/// Immutable per-actor movement tuning. Loaded once at spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionParameters {
    pub walking_speed: f32,
    pub running_speed: f32,
    pub sprinting_speed: f32,
    /// Facing slew rate; multiplied by `dt` to get the slerp fraction.
    pub rotation_speed: f32,
    pub jump_height: f32,
    /// Signed vertical acceleration; must be negative.
    pub gravity: f32,
    /// Forward force applied every airborne tick.
    pub leaping_velocity: f32,
    /// Downward force per second of air time.
    pub falling_velocity: f32,
    /// Height above the actor origin where the ground probe starts.
    pub probe_offset: f32,
    pub probe_radius: f32,
    /// Furthest the probe sphere may travel and still count as ground.
    pub probe_max_distance: f32,
    pub ground_mask: LayerMask,
}

impl Default for LocomotionParameters {
    fn default() -> Self {
        Self {
            walking_speed: 1.5,
            running_speed: 5.0,
            sprinting_speed: 7.0,
            rotation_speed: 12.0,
            jump_height: 4.0,
            gravity: -15.0,
            leaping_velocity: 3.0,
            falling_velocity: 33.0,
            probe_offset: 0.5,
            probe_radius: 0.3,
            probe_max_distance: 0.3,
            ground_mask: LayerMask::ALL,
        }
    }
}

impl LocomotionParameters {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("locomotion.walking_speed", self.walking_speed)?;
        ConfigError::require_non_negative("locomotion.running_speed", self.running_speed)?;
        ConfigError::require_non_negative("locomotion.sprinting_speed", self.sprinting_speed)?;
        ConfigError::require_positive("locomotion.rotation_speed", self.rotation_speed)?;
        ConfigError::require_non_negative("locomotion.jump_height", self.jump_height)?;
        if !(self.gravity.is_finite() && self.gravity < 0.0) {
            return Err(ConfigError::invalid(
                "locomotion.gravity",
                format!("must be negative, got {}", self.gravity),
            ));
        }
        ConfigError::require_non_negative("locomotion.leaping_velocity", self.leaping_velocity)?;
        ConfigError::require_non_negative("locomotion.falling_velocity", self.falling_velocity)?;
        ConfigError::require_non_negative("locomotion.probe_offset", self.probe_offset)?;
        ConfigError::require_positive("locomotion.probe_radius", self.probe_radius)?;
        ConfigError::require_non_negative("locomotion.probe_max_distance", self.probe_max_distance)?;
        if self.ground_mask == LayerMask::NONE {
            return Err(ConfigError::invalid(
                "locomotion.ground_mask",
                "probe would never hit anything",
            ));
        }
        Ok(())
    }

    /// Launch speed that peaks at `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (-2.0 * self.gravity * self.jump_height).sqrt()
    }
}
