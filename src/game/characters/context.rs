// Movement context shared by the locomotion states

use glam::Vec2;

use crate::core::math::{near_zero, sign_or_zero};

use super::stats::CharacterStats;

/// Discrete animation mode written by state entry actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationMode {
    #[default]
    Idle,
    Walking,
    /// Rising part of a jump
    Ascend,
    /// Descending, either after a jump or off a ledge
    Fall,
}

impl AnimationMode {
    /// Name of the looping clip for this mode
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Ascend => "airborne-ascend",
            Self::Fall => "airborne-fall",
        }
    }
}

/// Mutable per-character data read and written by the active state
///
/// Owned by the state machine; states borrow it for the duration of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementContext {
    /// Last reported movement axis, components in [-1, 1]
    pub move_input: Vec2,
    /// Horizontal velocity the driver should apply on the next physics step
    pub controlled_velocity: f32,
    /// -1.0 facing left, 1.0 facing right
    pub facing_sign: f32,
    /// Jump button currently held. Informational only.
    pub jump_held: bool,
    /// Set by the animation collaborator when the ascent clip completes
    pub jump_finished: bool,
    /// Output for the animation collaborator
    pub animation: AnimationMode,
    /// Tunables, fixed for the character's lifetime
    pub stats: CharacterStats,
}

impl MovementContext {
    pub fn new(stats: CharacterStats) -> Self {
        Self {
            move_input: Vec2::ZERO,
            controlled_velocity: 0.0,
            facing_sign: 1.0,
            jump_held: false,
            jump_finished: false,
            animation: AnimationMode::Idle,
            stats,
        }
    }

    /// Whether the horizontal axis is outside the input dead zone
    pub fn has_horizontal_input(&self) -> bool {
        !near_zero(self.move_input.x, self.stats.input_epsilon)
    }

    /// Sign of the horizontal axis, 0.0 inside the dead zone
    pub fn horizontal_sign(&self) -> f32 {
        sign_or_zero(self.move_input.x, self.stats.input_epsilon)
    }

    pub fn walk_speed(&self) -> f32 {
        self.stats.walk_speed
    }

    pub fn jump_impulse(&self) -> f32 {
        self.stats.jump_impulse
    }
}

impl Default for MovementContext {
    fn default() -> Self {
        Self::new(CharacterStats::default())
    }
}
