// Game action definitions

use glam::Vec2;

/// Buttons the locomotion controller listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement axis
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    Jump,
}

impl Action {
    /// Contribution of this action to the movement axis
    pub fn axis_contribution(&self) -> Vec2 {
        match self {
            Self::MoveLeft => Vec2::NEG_X,
            Self::MoveRight => Vec2::X,
            Self::MoveUp => Vec2::Y,
            Self::MoveDown => Vec2::NEG_Y,
            Self::Jump => Vec2::ZERO,
        }
    }
}

/// Edge-triggered events delivered to a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Movement axis changed; components in [-1, 1]
    Move(Vec2),
    JumpPressed,
    JumpReleased,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::MoveUp);
    }

    #[test]
    fn test_axis_contribution() {
        assert_eq!(Action::MoveLeft.axis_contribution(), Vec2::new(-1.0, 0.0));
        assert_eq!(Action::MoveUp.axis_contribution(), Vec2::new(0.0, 1.0));
        assert_eq!(Action::Jump.axis_contribution(), Vec2::ZERO);
    }
}
