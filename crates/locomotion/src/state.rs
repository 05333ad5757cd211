use serde::{Deserialize, Serialize};

/// Vertical movement state. `Jumping` lasts exactly one fixed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    /// Optimistic initial state; corrected by the first probe.
    #[default]
    Grounded,
    Airborne,
    Jumping,
}

impl MovementState {
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Grounded)
    }
}

/// Transition requests the controller hands to the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocomotionEvent {
    /// A jump impulse fired this tick.
    Jumped,
    /// The actor started falling (walked off a ledge or finished a jump).
    StartedFalling,
    /// The probe found ground after a fall.
    Landed,
}

/// What the animation layer reports back at the end of a tick.
///
/// The animation system decides when a non-movement action is in progress
/// and when a jump animation is still playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationFeedback {
    pub is_interacting: bool,
    pub is_jumping: bool,
}
