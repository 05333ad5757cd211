use std::collections::BTreeMap;

/// Animator parameter names.
pub mod param {
    pub const HORIZONTAL: &str = "Horizontal";
    pub const VERTICAL: &str = "Vertical";
    pub const IS_INTERACTING: &str = "isInteracting";
    pub const IS_JUMPING: &str = "isJumping";
    pub const IS_GROUNDED: &str = "isGrounded";
}

/// Animator state names targeted by crossfades.
pub mod state {
    pub const JUMP: &str = "Jump";
    pub const FALLING: &str = "Falling";
    pub const LANDING: &str = "Landing";
}

/// The animation system as seen from the locomotion core.
pub trait AnimationSink {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn get_bool(&self, name: &str) -> bool;
    /// Blend into `state` over `duration` seconds.
    fn cross_fade(&mut self, state: &str, duration: f32);
    /// Advance animator time. Engine-backed sinks tick themselves and keep
    /// the default no-op.
    fn update(&mut self, _dt: f32) {}
}

impl<T: AnimationSink + ?Sized> AnimationSink for Box<T> {
    fn set_float(&mut self, name: &str, value: f32) {
        (**self).set_float(name, value)
    }
    fn set_bool(&mut self, name: &str, value: bool) {
        (**self).set_bool(name, value)
    }
    fn get_bool(&self, name: &str) -> bool {
        (**self).get_bool(name)
    }
    fn cross_fade(&mut self, state: &str, duration: f32) {
        (**self).cross_fade(state, duration)
    }
    fn update(&mut self, dt: f32) {
        (**self).update(dt)
    }
}

/// In-process animator: one-shot clips with fixed lengths and looping clips.
///
/// When a one-shot clip ends the animator drops back to locomotion and
/// clears `isInteracting` and `isJumping`.
#[derive(Debug, Clone)]
pub struct SimulatedAnimator {
    floats: BTreeMap<String, f32>,
    bools: BTreeMap<String, bool>,
    clips: BTreeMap<String, Option<f32>>,
    current: Option<String>,
    remaining: Option<f32>,
    history: Vec<(String, f32)>,
}

impl Default for SimulatedAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAnimator {
    pub const DEFAULT_CLIP_LENGTH: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            floats: BTreeMap::new(),
            bools: BTreeMap::new(),
            clips: BTreeMap::new(),
            current: None,
            remaining: None,
            history: Vec::new(),
        }
        .with_clip(state::JUMP, 0.5)
        .with_looping_clip(state::FALLING)
        .with_clip(state::LANDING, 0.3)
    }

    pub fn with_clip(mut self, name: &str, length: f32) -> Self {
        self.clips.insert(name.to_string(), Some(length));
        self
    }

    pub fn with_looping_clip(mut self, name: &str) -> Self {
        self.clips.insert(name.to_string(), None);
        self
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Every crossfade requested so far, oldest first.
    pub fn history(&self) -> &[(String, f32)] {
        &self.history
    }
}

impl AnimationSink for SimulatedAnimator {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    fn cross_fade(&mut self, state: &str, duration: f32) {
        let length = self
            .clips
            .get(state)
            .copied()
            .unwrap_or(Some(Self::DEFAULT_CLIP_LENGTH));
        self.current = Some(state.to_string());
        self.remaining = length;
        self.history.push((state.to_string(), duration));
        tracing::trace!(state, duration, "crossfade");
    }

    fn update(&mut self, dt: f32) {
        let Some(remaining) = self.remaining.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            tracing::trace!(state = ?self.current, "clip finished");
            self.remaining = None;
            self.current = None;
            self.bools.insert(param::IS_INTERACTING.to_string(), false);
            self.bools.insert(param::IS_JUMPING.to_string(), false);
        }
    }
}
