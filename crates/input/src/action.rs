use glam::Vec2;

/// A discrete device event, as delivered by an event-driven input backend.
///
/// Backends translate keys, sticks and mouse motion into these; the sampler
/// never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Movement stick or WASD composite changed to this value.
    Move(Vec2),
    /// Look delta since the previous event (mouse counts or stick deflection).
    Look(Vec2),
    /// Sprint control pressed (`true`) or released (`false`).
    Sprint(bool),
    /// Jump control pressed (`true`) or released (`false`).
    Jump(bool),
    /// Flip the camera's cursor lock.
    ToggleCursorLock,
    /// Unbound input.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_move_is_constructible() {
        let a = Action::Move(Vec2::new(1.0, 0.0));
        assert!(matches!(a, Action::Move(v) if v.x == 1.0));
    }

    #[test]
    fn action_buttons_carry_state() {
        assert!(matches!(Action::Jump(true), Action::Jump(true)));
        assert_ne!(Action::Sprint(true), Action::Sprint(false));
    }
}
