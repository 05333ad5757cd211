use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Action;

/// Raw device state for one sampling cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceFrame {
    pub movement: Vec2,
    pub look: Vec2,
    pub sprint: bool,
    /// Jump control is currently held.
    pub jump_held: bool,
    /// Jump was pressed at least once since the previous poll, even if
    /// already released again.
    pub jump_pressed: bool,
    pub toggle_cursor_lock: bool,
}

/// Anything the sampler can poll once per variable-rate tick.
///
/// `None` means no device input this cycle.
pub trait DeviceSource {
    fn poll(&mut self) -> Option<DeviceFrame>;
}

impl<T: DeviceSource + ?Sized> DeviceSource for Box<T> {
    fn poll(&mut self) -> Option<DeviceFrame> {
        (**self).poll()
    }
}

/// Event-driven device: folds [`Action`]s into a persistent frame.
///
/// Stick values persist until the next `Move` event; look deltas accumulate
/// until polled.
#[derive(Debug, Default)]
pub struct ActionSource {
    frame: DeviceFrame,
    connected: bool,
}

impl ActionSource {
    pub fn new() -> Self {
        Self {
            frame: DeviceFrame::default(),
            connected: true,
        }
    }

    pub fn push(&mut self, action: Action) {
        match action {
            Action::Move(v) => self.frame.movement = v,
            Action::Look(d) => self.frame.look += d,
            Action::Sprint(held) => self.frame.sprint = held,
            Action::Jump(true) => {
                self.frame.jump_held = true;
                self.frame.jump_pressed = true;
            }
            Action::Jump(false) => self.frame.jump_held = false,
            Action::ToggleCursorLock => self.frame.toggle_cursor_lock = true,
            Action::Noop => {}
        }
    }

    /// Device unplugged: polls report nothing until reconnected.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
        if !connected {
            self.frame = DeviceFrame::default();
        }
    }
}

impl DeviceSource for ActionSource {
    fn poll(&mut self) -> Option<DeviceFrame> {
        if !self.connected {
            return None;
        }
        let out = self.frame;
        self.frame.look = Vec2::ZERO;
        self.frame.jump_pressed = false;
        self.frame.toggle_cursor_lock = false;
        Some(out)
    }
}

/// Pre-recorded frames, one per poll. Runs dry into input gaps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Option<DeviceFrame>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `count` copies of `frame`.
    pub fn hold(mut self, frame: DeviceFrame, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(Some(frame), count));
        self
    }

    /// Queue `count` polls with no device input.
    pub fn gap(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(None, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl DeviceSource for ScriptedSource {
    fn poll(&mut self) -> Option<DeviceFrame> {
        self.frames.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_source_accumulates_look_and_resets_on_poll() {
        let mut src = ActionSource::new();
        src.push(Action::Look(Vec2::new(1.0, 2.0)));
        src.push(Action::Look(Vec2::new(3.0, -1.0)));
        let frame = src.poll().unwrap();
        assert_eq!(frame.look, Vec2::new(4.0, 1.0));
        assert_eq!(src.poll().unwrap().look, Vec2::ZERO);
    }

    #[test]
    fn action_source_keeps_stick_and_sprint() {
        let mut src = ActionSource::new();
        src.push(Action::Move(Vec2::new(0.0, 1.0)));
        src.push(Action::Sprint(true));
        src.poll();
        let frame = src.poll().unwrap();
        assert_eq!(frame.movement, Vec2::new(0.0, 1.0));
        assert!(frame.sprint);
    }

    #[test]
    fn action_source_reports_tap_between_polls() {
        let mut src = ActionSource::new();
        src.push(Action::Jump(true));
        src.push(Action::Jump(false));
        let frame = src.poll().unwrap();
        assert!(frame.jump_pressed);
        assert!(!frame.jump_held);
        assert!(!src.poll().unwrap().jump_pressed);
    }

    #[test]
    fn disconnected_source_yields_nothing() {
        let mut src = ActionSource::new();
        src.push(Action::Move(Vec2::X));
        src.set_connected(false);
        assert!(src.poll().is_none());
    }

    #[test]
    fn scripted_source_plays_in_order_then_gaps() {
        let walk = DeviceFrame {
            movement: Vec2::Y,
            ..DeviceFrame::default()
        };
        let mut src = ScriptedSource::new().hold(walk, 2).gap(1);
        assert_eq!(src.remaining(), 3);
        assert_eq!(src.poll(), Some(walk));
        assert_eq!(src.poll(), Some(walk));
        assert_eq!(src.poll(), None);
        assert_eq!(src.poll(), None);
    }
}
