// Character locomotion tunables
// Every character shares these unless a level overrides them

/// Errors produced when validating character tunables
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("{field} must be a finite, non-negative number, got {value}")]
    InvalidMagnitude { field: &'static str, value: f32 },

    #[error("air_control must lie in [0, 1], got {0}")]
    AirControlOutOfRange(f32),

    #[error("{field} must be a finite, positive threshold, got {value}")]
    InvalidEpsilon { field: &'static str, value: f32 },
}

/// Immutable movement parameters read by the locomotion states
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    /// Horizontal speed at full stick deflection (units/second)
    pub walk_speed: f32,
    /// Upward impulse requested when a jump starts
    pub jump_impulse: f32,
    /// Multiplier applied to air steering once control is reduced
    pub air_control: f32,
    /// Horizontal input below this magnitude counts as no input
    pub input_epsilon: f32,
    /// Vertical speed below this magnitude counts as standing on ground
    pub grounded_epsilon: f32,
}

/// Default tuning for a player character
pub const BASE_STATS: CharacterStats = CharacterStats {
    walk_speed: 5.0,
    jump_impulse: 8.0,
    air_control: 0.6,
    input_epsilon: 1e-3,
    // Resting contacts jitter a little in the solver
    grounded_epsilon: 1e-2,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Default stats with a custom walk speed and jump impulse
    pub fn with_movement(walk_speed: f32, jump_impulse: f32) -> Self {
        Self {
            walk_speed,
            jump_impulse,
            ..BASE_STATS
        }
    }

    /// Override the reduced air-control multiplier
    pub fn with_air_control(mut self, air_control: f32) -> Self {
        self.air_control = air_control;
        self
    }

    /// Check that every tunable is usable by the state machine
    pub fn validate(&self) -> Result<(), StatsError> {
        for (field, value) in [
            ("walk_speed", self.walk_speed),
            ("jump_impulse", self.jump_impulse),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StatsError::InvalidMagnitude { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.air_control) {
            return Err(StatsError::AirControlOutOfRange(self.air_control));
        }

        for (field, value) in [
            ("input_epsilon", self.input_epsilon),
            ("grounded_epsilon", self.grounded_epsilon),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StatsError::InvalidEpsilon { field, value });
            }
        }

        Ok(())
    }
}
