// Per-player input state management

use std::collections::HashSet;

use glam::Vec2;

use super::action::{Action, InputEvent};

/// Turns button edges for one player into locomotion events
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Axis last reported through `InputEvent::Move`
    last_axis: Vec2,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new() -> Self {
        Self {
            pressed: HashSet::new(),
            last_axis: Vec2::ZERO,
        }
    }

    /// Movement axis from the held directions, each component in [-1, 1]
    pub fn axis(&self) -> Vec2 {
        self.pressed
            .iter()
            .map(Action::axis_contribution)
            .sum::<Vec2>()
            .clamp(Vec2::NEG_ONE, Vec2::ONE)
    }

    /// Register an action press
    ///
    /// Repeated presses of a held action produce nothing.
    pub fn press(&mut self, action: Action) -> Option<InputEvent> {
        if !self.pressed.insert(action) {
            return None;
        }
        match action {
            Action::Jump => Some(InputEvent::JumpPressed),
            _ => self.axis_event(),
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) -> Option<InputEvent> {
        if !self.pressed.remove(&action) {
            return None;
        }
        match action {
            Action::Jump => Some(InputEvent::JumpReleased),
            _ => self.axis_event(),
        }
    }

    /// A `Move` event if the axis differs from the last one reported
    fn axis_event(&mut self) -> Option<InputEvent> {
        let axis = self.axis();
        if axis == self.last_axis {
            return None;
        }
        self.last_axis = axis;
        Some(InputEvent::Move(axis))
    }
}
