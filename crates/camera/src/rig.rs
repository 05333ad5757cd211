use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stride_common::{CameraBasis, ConfigError, smooth_damp_vec3};

/// Tunables for the follow camera. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Approximate time for the rig to catch up with its subject.
    pub follow_smooth_time: f32,
    pub look_speed: f32,
    pub pivot_speed: f32,
    /// Multiplier for high-resolution pointer deltas (mouse).
    pub pointer_sensitivity: f32,
    /// Multiplier for analog-stick deflection.
    pub stick_sensitivity: f32,
    pub min_pivot: f32,
    pub max_pivot: f32,
    pub min_look: f32,
    pub max_look: f32,
    /// How quickly the rig orientation chases the look/pivot target, in 1/s.
    /// Zero snaps.
    pub rotation_speed: f32,
    /// Start with the cursor captured and allow toggling it.
    pub lock_cursor: bool,
    /// Height of the pivot above the subject's origin.
    pub pivot_height: f32,
    /// Distance from the pivot back to the eye.
    pub boom_length: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_smooth_time: 0.1,
            look_speed: 200.0,
            pivot_speed: 200.0,
            pointer_sensitivity: 0.1,
            stick_sensitivity: 1.0,
            min_pivot: -30.0,
            max_pivot: 30.0,
            min_look: -360.0,
            max_look: 360.0,
            rotation_speed: 25.0,
            lock_cursor: true,
            pivot_height: 1.6,
            boom_length: 4.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("camera.follow_smooth_time", self.follow_smooth_time)?;
        ConfigError::require_non_negative("camera.look_speed", self.look_speed)?;
        ConfigError::require_non_negative("camera.pivot_speed", self.pivot_speed)?;
        ConfigError::require_positive("camera.pointer_sensitivity", self.pointer_sensitivity)?;
        ConfigError::require_positive("camera.stick_sensitivity", self.stick_sensitivity)?;
        ConfigError::require_range("camera.pivot", self.min_pivot, self.max_pivot)?;
        ConfigError::require_range("camera.look", self.min_look, self.max_look)?;
        ConfigError::require_non_negative("camera.rotation_speed", self.rotation_speed)?;
        ConfigError::require_non_negative("camera.boom_length", self.boom_length)?;
        if !self.pivot_height.is_finite() {
            return Err(ConfigError::invalid("camera.pivot_height", "must be finite"));
        }
        Ok(())
    }
}

/// Angles and follow accumulator owned by the rig.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraState {
    pub look_angle: f32,
    pub pivot_angle: f32,
    pub follow_velocity: Vec3,
}

/// Third-person follow camera.
///
/// The rig root chases the subject with a critically damped spring and turns
/// about `Y` by the look angle; the pivot tilts about the local `X` axis.
/// Camera motion is presentation-rate and not part of the fixed-step state.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    state: CameraState,
    position: Vec3,
    yaw: Quat,
    pitch: Quat,
    cursor_locked: bool,
}

impl CameraRig {
    /// Build a rig already centred on `subject`.
    pub fn new(config: CameraConfig, subject: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;
        if !subject.is_finite() {
            return Err(ConfigError::invalid("camera.subject", "position must be finite"));
        }
        let cursor_locked = config.lock_cursor;
        Ok(Self {
            config,
            state: CameraState::default(),
            position: subject,
            yaw: Quat::IDENTITY,
            pitch: Quat::IDENTITY,
            cursor_locked,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Rig root position (the smoothed subject position).
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Full orientation: yaw then pivot tilt.
    pub fn rotation(&self) -> Quat {
        self.yaw * self.pitch
    }

    pub fn cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Flip cursor capture. No effect when locking is disabled in config.
    pub fn toggle_cursor_lock(&mut self) -> bool {
        if self.config.lock_cursor {
            self.cursor_locked = !self.cursor_locked;
            tracing::debug!(locked = self.cursor_locked, "cursor lock toggled");
        }
        self.cursor_locked
    }

    /// Advance one variable-rate tick.
    pub fn update(&mut self, look: Vec2, subject: Vec3, dt: f32) -> CameraState {
        self.position = smooth_damp_vec3(
            self.position,
            subject,
            &mut self.state.follow_velocity,
            self.config.follow_smooth_time,
            dt,
        );

        let look = if look.is_finite() { look } else { Vec2::ZERO };
        let pointer = look.x.abs() + look.y.abs() > 1.0;
        let sensitivity = if pointer {
            self.config.pointer_sensitivity
        } else {
            self.config.stick_sensitivity
        };
        // A free cursor belongs to the UI, not the camera.
        let look = if pointer && self.config.lock_cursor && !self.cursor_locked {
            Vec2::ZERO
        } else {
            look
        };

        self.state.look_angle += look.x * self.config.look_speed * sensitivity * dt;
        self.state.pivot_angle -= look.y * self.config.pivot_speed * sensitivity * dt;
        self.state.look_angle = self
            .state
            .look_angle
            .clamp(self.config.min_look, self.config.max_look);
        self.state.pivot_angle = self
            .state
            .pivot_angle
            .clamp(self.config.min_pivot, self.config.max_pivot);

        let target_yaw = Quat::from_rotation_y(-self.state.look_angle.to_radians());
        let target_pitch = Quat::from_rotation_x(-self.state.pivot_angle.to_radians());
        let t = if self.config.rotation_speed > 0.0 {
            1.0 - (-self.config.rotation_speed * dt).exp()
        } else {
            1.0
        };
        self.yaw = self.yaw.slerp(target_yaw, t).normalize();
        self.pitch = self.pitch.slerp(target_pitch, t).normalize();

        self.state
    }

    /// Forward/right axes for camera-relative movement.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis::from_rotation(self.rotation())
    }

    pub fn pivot_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.config.pivot_height
    }

    /// Eye position: behind the pivot along the boom.
    pub fn eye_position(&self) -> Vec3 {
        self.pivot_position() + self.rotation() * (Vec3::Z * self.config.boom_length)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye_position();
        let forward = self.rotation() * Vec3::NEG_Z;
        Mat4::look_to_rh(eye, forward, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn snapping_rig() -> CameraRig {
        CameraRig::new(
            CameraConfig {
                rotation_speed: 0.0,
                ..CameraConfig::default()
            },
            Vec3::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_pivot_range_fails_fast() {
        let config = CameraConfig {
            min_pivot: 30.0,
            max_pivot: -30.0,
            ..CameraConfig::default()
        };
        let err = CameraRig::new(config, Vec3::ZERO).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "camera.pivot", .. }));
    }

    #[test]
    fn non_finite_subject_fails_fast() {
        assert!(CameraRig::new(CameraConfig::default(), Vec3::NAN).is_err());
    }

    #[test]
    fn stick_look_uses_stick_sensitivity() {
        let mut rig = snapping_rig();
        let state = rig.update(Vec2::new(0.5, 0.0), Vec3::ZERO, DT);
        let expected = 0.5 * 200.0 * 1.0 * DT;
        assert!((state.look_angle - expected).abs() < 1e-5);
    }

    #[test]
    fn pointer_look_uses_pointer_sensitivity() {
        let mut rig = snapping_rig();
        let state = rig.update(Vec2::new(4.0, 0.0), Vec3::ZERO, DT);
        let expected = 4.0 * 200.0 * 0.1 * DT;
        assert!((state.look_angle - expected).abs() < 1e-5);
    }

    #[test]
    fn pivot_is_clamped() {
        let mut rig = snapping_rig();
        for _ in 0..200 {
            rig.update(Vec2::new(0.0, -1.0), Vec3::ZERO, DT);
        }
        assert_eq!(rig.state().pivot_angle, 30.0);
        for _ in 0..400 {
            rig.update(Vec2::new(0.0, 1.0), Vec3::ZERO, DT);
        }
        assert_eq!(rig.state().pivot_angle, -30.0);
    }

    #[test]
    fn look_is_clamped_to_wide_bound() {
        let mut rig = snapping_rig();
        for _ in 0..1000 {
            rig.update(Vec2::new(1.0, 0.0), Vec3::ZERO, DT);
        }
        assert_eq!(rig.state().look_angle, 360.0);
    }

    #[test]
    fn basis_turns_with_look_angle() {
        let mut rig = snapping_rig();
        // 0.9 * 200 * dt per tick; 30 ticks at dt = 1/60 gives 90 degrees.
        for _ in 0..30 {
            rig.update(Vec2::new(0.9, 0.0), Vec3::ZERO, DT);
        }
        assert!((rig.state().look_angle - 90.0).abs() < 1e-3);
        let (fwd, right) = rig.basis().horizontal();
        assert!((fwd - Vec3::X).length() < 1e-3);
        assert!((right - Vec3::Z).length() < 1e-3);
    }

    #[test]
    fn rotation_eases_toward_target() {
        let mut rig = CameraRig::new(CameraConfig::default(), Vec3::ZERO).unwrap();
        rig.update(Vec2::new(0.9, 0.0), Vec3::ZERO, DT);
        let target = Quat::from_rotation_y(-rig.state().look_angle.to_radians());
        let first = rig.rotation().angle_between(target);
        assert!(first > 0.0);
        for _ in 0..60 {
            rig.update(Vec2::ZERO, Vec3::ZERO, DT);
        }
        assert!(rig.rotation().angle_between(target) < first * 0.1);
    }

    #[test]
    fn follow_converges_on_subject() {
        let mut rig = snapping_rig();
        let subject = Vec3::new(5.0, 0.0, -3.0);
        let first = rig.update(Vec2::ZERO, subject, DT);
        assert!(first.follow_velocity.length() > 0.0);
        assert!(rig.position().distance(subject) < subject.length());
        for _ in 0..120 {
            rig.update(Vec2::ZERO, subject, DT);
        }
        assert!(rig.position().distance(subject) < 1e-3);
    }

    #[test]
    fn unlocked_cursor_ignores_pointer_but_not_stick() {
        let mut rig = snapping_rig();
        assert!(rig.cursor_locked());
        assert!(!rig.toggle_cursor_lock());
        rig.update(Vec2::new(5.0, 0.0), Vec3::ZERO, DT);
        assert_eq!(rig.state().look_angle, 0.0);
        rig.update(Vec2::new(0.5, 0.0), Vec3::ZERO, DT);
        assert!(rig.state().look_angle > 0.0);
    }

    #[test]
    fn eye_sits_behind_and_above_subject() {
        let rig = snapping_rig();
        let eye = rig.eye_position();
        assert!((eye - Vec3::new(0.0, 1.6, 4.0)).length() < 1e-5);
        let view = rig.view_matrix();
        assert!(!view.col(0).x.is_nan());
    }
}
