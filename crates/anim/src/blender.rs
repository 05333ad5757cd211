use serde::{Deserialize, Serialize};
use stride_common::{ConfigError, exp_damp};
use stride_locomotion::{AnimationFeedback, LocomotionEvent};

use crate::sink::{AnimationSink, param, state};
use crate::snap::snap_targets;

/// Animation blending tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// Time constant for blend parameters approaching their snapped target.
    pub damp_time: f32,
    /// Crossfade duration for transition requests.
    pub crossfade_duration: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            damp_time: 0.1,
            crossfade_duration: 0.2,
        }
    }
}

impl BlendConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_non_negative("blend.damp_time", self.damp_time)?;
        ConfigError::require_non_negative("blend.crossfade_duration", self.crossfade_duration)
    }
}

/// Per-tick output of the blender.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationSignal {
    /// Snapped horizontal target.
    pub target_horizontal: f32,
    /// Snapped vertical target, or the sprint sentinel.
    pub target_vertical: f32,
    /// Damped value sent to the animator.
    pub horizontal: f32,
    pub vertical: f32,
    pub is_grounded: bool,
    /// Last values confirmed by the animation layer.
    pub is_interacting: bool,
    pub is_jumping: bool,
}

impl AnimationSignal {
    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.is_grounded = grounded;
        self
    }
}

/// Turns movement input into blend-tree parameters and locomotion events
/// into crossfades.
#[derive(Debug, Clone)]
pub struct AnimationBlender {
    config: BlendConfig,
    horizontal: f32,
    vertical: f32,
    observed: AnimationFeedback,
}

impl AnimationBlender {
    pub fn new(config: BlendConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            horizontal: 0.0,
            vertical: 0.0,
            observed: AnimationFeedback::default(),
        })
    }

    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    /// Snap the inputs and advance the damped parameters by `dt`.
    pub fn blend(&mut self, horizontal: f32, vertical: f32, sprinting: bool, dt: f32) -> AnimationSignal {
        let (target_horizontal, target_vertical) = snap_targets(horizontal, vertical, sprinting);
        self.horizontal = exp_damp(self.horizontal, target_horizontal, self.config.damp_time, dt);
        self.vertical = exp_damp(self.vertical, target_vertical, self.config.damp_time, dt);
        AnimationSignal {
            target_horizontal,
            target_vertical,
            horizontal: self.horizontal,
            vertical: self.vertical,
            is_grounded: false,
            is_interacting: self.observed.is_interacting,
            is_jumping: self.observed.is_jumping,
        }
    }

    /// Write the blend parameters and grounded flag to the animator.
    ///
    /// `isInteracting` and `isJumping` are owned by the animation layer and
    /// are never written here.
    pub fn publish(&self, signal: &AnimationSignal, sink: &mut dyn AnimationSink) {
        sink.set_float(param::HORIZONTAL, signal.horizontal);
        sink.set_float(param::VERTICAL, signal.vertical);
        sink.set_bool(param::IS_GROUNDED, signal.is_grounded);
    }

    /// Translate a locomotion transition request into animator calls.
    pub fn request(&mut self, event: LocomotionEvent, sink: &mut dyn AnimationSink) {
        tracing::debug!(?event, "animation request");
        match event {
            LocomotionEvent::Jumped => {
                self.play_target_animation(sink, state::JUMP, false);
                sink.set_bool(param::IS_JUMPING, true);
            }
            LocomotionEvent::StartedFalling => self.play_target_animation(sink, state::FALLING, true),
            LocomotionEvent::Landed => self.play_target_animation(sink, state::LANDING, true),
        }
    }

    /// Crossfade to `name`, engaging the interaction lock when `interacting`.
    pub fn play_target_animation(&mut self, sink: &mut dyn AnimationSink, name: &str, interacting: bool) {
        sink.set_bool(param::IS_INTERACTING, interacting);
        sink.cross_fade(name, self.config.crossfade_duration);
    }

    /// Read back the animation-owned flags.
    pub fn observe(&mut self, sink: &dyn AnimationSink) -> AnimationFeedback {
        self.observed = AnimationFeedback {
            is_interacting: sink.get_bool(param::IS_INTERACTING),
            is_jumping: sink.get_bool(param::IS_JUMPING),
        };
        self.observed
    }
}
