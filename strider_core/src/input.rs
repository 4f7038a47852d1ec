//! Input intent.
//!
//! A fixed set of logical actions with edge-aware button state. The
//! windowing layer feeds raw press/release events into an
//! `InputTracker`; the frame loop snapshots one `InputFrame` per
//! rendered frame and decays the edges afterwards, so simulation steps
//! see plain values instead of querying a live event source.

use crate::math::Vector2;

/// Logical control actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Jump,
}

impl Action {
    pub const COUNT: usize = 5;

    pub const ALL: [Action; Self::COUNT] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Jump,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

bitflags::bitflags! {
    /// Button state for one action. `DOWN` tracks the level, `EDGE`
    /// marks a transition this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonState: u8 {
        const DOWN = 1 << 0;
        const EDGE = 1 << 1;
    }
}

impl ButtonState {
    pub const UP: Self = Self::empty();
    pub const PRESSED: Self = Self::DOWN.union(Self::EDGE);
    pub const RELEASED: Self = Self::EDGE;

    pub fn is_down(self) -> bool {
        self.contains(Self::DOWN)
    }

    pub fn pressed_edge(self) -> bool {
        self == Self::PRESSED
    }

    pub fn released_edge(self) -> bool {
        self == Self::RELEASED
    }
}

/// Per-frame input snapshot handed to simulation steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    states: [ButtonState; Action::COUNT],
    /// Accumulated mouse movement since the last frame.
    pub look_delta: Vector2,
}

impl InputFrame {
    pub fn state(&self, action: Action) -> ButtonState {
        self.states[action.index()]
    }
}

/// Latches raw input events between frames.
#[derive(Debug, Default)]
pub struct InputTracker {
    states: [ButtonState; Action::COUNT],
    look_delta: Vector2,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key press from the event layer. Repeats while already down are
    /// ignored so they cannot re-trigger the edge.
    pub fn key_down(&mut self, action: Action) {
        let state = &mut self.states[action.index()];
        if !state.is_down() {
            *state = ButtonState::PRESSED;
        }
    }

    pub fn key_up(&mut self, action: Action) {
        let state = &mut self.states[action.index()];
        if state.is_down() {
            *state = ButtonState::RELEASED;
        }
    }

    pub fn add_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.look_delta.x += dx;
        self.look_delta.y += dy;
    }

    /// Snapshot for the frame about to be simulated.
    pub fn frame(&self) -> InputFrame {
        InputFrame {
            states: self.states,
            look_delta: self.look_delta,
        }
    }

    /// Decays edges (Pressed -> Down, Released -> Up) and zeroes the
    /// look delta. Called once per rendered frame, after its
    /// simulation steps ran.
    pub fn post_step(&mut self) {
        for state in &mut self.states {
            state.remove(ButtonState::EDGE);
        }
        self.look_delta = Vector2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_lifecycle() {
        let mut tracker = InputTracker::new();

        tracker.key_down(Action::Jump);
        let frame = tracker.frame();
        assert!(frame.state(Action::Jump).pressed_edge());
        assert!(frame.state(Action::Jump).is_down());

        tracker.post_step();
        let frame = tracker.frame();
        assert!(frame.state(Action::Jump).is_down());
        assert!(!frame.state(Action::Jump).pressed_edge());

        tracker.key_up(Action::Jump);
        let frame = tracker.frame();
        assert!(frame.state(Action::Jump).released_edge());
        assert!(!frame.state(Action::Jump).is_down());

        tracker.post_step();
        assert_eq!(tracker.frame().state(Action::Jump), ButtonState::UP);
    }

    #[test]
    fn key_repeat_does_not_retrigger_edge() {
        let mut tracker = InputTracker::new();
        tracker.key_down(Action::MoveForward);
        tracker.post_step();

        tracker.key_down(Action::MoveForward);
        assert!(!tracker.frame().state(Action::MoveForward).pressed_edge());
        assert!(tracker.frame().state(Action::MoveForward).is_down());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = InputTracker::new();
        tracker.key_up(Action::StrafeLeft);
        assert_eq!(tracker.frame().state(Action::StrafeLeft), ButtonState::UP);
    }

    #[test]
    fn mouse_delta_accumulates_until_post_step() {
        let mut tracker = InputTracker::new();
        tracker.add_mouse_delta(2.0, -1.0);
        tracker.add_mouse_delta(0.5, 0.5);

        let frame = tracker.frame();
        assert_eq!(frame.look_delta, Vector2::new(2.5, -0.5));

        tracker.post_step();
        assert_eq!(tracker.frame().look_delta, Vector2::ZERO);
    }

    #[test]
    fn actions_cover_the_state_table() {
        let mut tracker = InputTracker::new();
        for action in Action::ALL {
            tracker.key_down(action);
        }
        for action in Action::ALL {
            assert!(tracker.frame().state(action).is_down());
        }
    }
}
