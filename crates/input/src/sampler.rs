use glam::Vec2;

use crate::source::{DeviceFrame, DeviceSource};

/// Minimum move amount for a held sprint control to count as sprinting.
pub const SPRINT_MIN_MOVE_AMOUNT: f32 = 0.5;

/// Normalized input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementInput {
    /// `x` strafes right, `y` moves forward. Each component in `[-1, 1]`.
    pub axis: Vec2,
    /// Look delta for this cycle; unbounded.
    pub look: Vec2,
    pub sprint_held: bool,
    /// The cursor-lock toggle was pressed this cycle.
    pub toggle_cursor_lock: bool,
    jump_requested: bool,
}

impl MovementInput {
    pub const NEUTRAL: Self = Self {
        axis: Vec2::ZERO,
        look: Vec2::ZERO,
        sprint_held: false,
        toggle_cursor_lock: false,
        jump_requested: false,
    };

    pub fn from_axis(horizontal: f32, vertical: f32) -> Self {
        Self {
            axis: Vec2::new(horizontal, vertical).clamp(Vec2::NEG_ONE, Vec2::ONE),
            ..Self::NEUTRAL
        }
    }

    pub fn with_sprint(mut self) -> Self {
        self.sprint_held = true;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump_requested = true;
        self
    }

    pub fn horizontal(&self) -> f32 {
        self.axis.x
    }

    pub fn vertical(&self) -> f32 {
        self.axis.y
    }

    /// `|h| + |v|` clamped to `[0, 1]`.
    pub fn move_amount(&self) -> f32 {
        (self.axis.x.abs() + self.axis.y.abs()).clamp(0.0, 1.0)
    }

    /// Sprint held while moving faster than a walk.
    pub fn is_sprinting(&self) -> bool {
        self.sprint_held && self.move_amount() > SPRINT_MIN_MOVE_AMOUNT
    }

    /// Whether an unconsumed jump request is present.
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// Read and clear the jump request. Returns `true` at most once per press.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Fold an unconsumed jump from an earlier sample into this one.
    pub fn carry_jump_from(&mut self, earlier: &MovementInput) {
        self.jump_requested |= earlier.jump_requested;
    }
}

/// Converts device frames into [`MovementInput`], tracking the jump edge.
#[derive(Debug, Default)]
pub struct InputSampler {
    jump_was_held: bool,
    gaps: u64,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll `source` once and normalize the result.
    ///
    /// An absent frame degrades to [`MovementInput::NEUTRAL`] and releases
    /// any held jump, so the next press triggers again.
    pub fn sample(&mut self, source: &mut dyn DeviceSource) -> MovementInput {
        match source.poll() {
            Some(frame) => self.normalize(frame),
            None => {
                self.gaps += 1;
                self.jump_was_held = false;
                tracing::trace!(gaps = self.gaps, "no device input this cycle");
                MovementInput::NEUTRAL
            }
        }
    }

    /// Number of cycles that produced no device input.
    pub fn gap_count(&self) -> u64 {
        self.gaps
    }

    fn normalize(&mut self, frame: DeviceFrame) -> MovementInput {
        let axis = Vec2::new(finite_or_zero(frame.movement.x), finite_or_zero(frame.movement.y))
            .clamp(Vec2::NEG_ONE, Vec2::ONE);
        let look = Vec2::new(finite_or_zero(frame.look.x), finite_or_zero(frame.look.y));

        let rising = frame.jump_held && !self.jump_was_held;
        let jump_requested = frame.jump_pressed || rising;
        self.jump_was_held = frame.jump_held;

        if jump_requested {
            tracing::trace!("jump edge sampled");
        }

        MovementInput {
            axis,
            look,
            sprint_held: frame.sprint,
            toggle_cursor_lock: frame.toggle_cursor_lock,
            jump_requested,
        }
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
