// Air control shared by the Jumping and Falling states

use glam::Vec2;

use crate::core::math::{near_zero, sign_or_zero};

use super::context::MovementContext;

/// Steering data for one airborne episode
///
/// Created fresh every time the character enters Jumping or Falling.
/// A character that leaves the ground with horizontal intent steers at the
/// reduced `air_control` rate for the whole episode. One that leaves from a
/// standstill keeps full control until its first commitment to a direction,
/// after which control is reduced too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirControl {
    /// Sign of the horizontal input at takeoff: -1, 0 or 1
    takeoff_dir_sign: f32,
    /// Latched once set; only cleared by the next airborne entry
    low_control: bool,
}

impl AirControl {
    /// Capture takeoff data from the current input
    pub fn enter(ctx: &MovementContext) -> Self {
        let takeoff_dir_sign = ctx.horizontal_sign();
        Self {
            takeoff_dir_sign,
            low_control: takeoff_dir_sign != 0.0,
        }
    }

    pub fn takeoff_dir_sign(&self) -> f32 {
        self.takeoff_dir_sign
    }

    pub fn low_control(&self) -> bool {
        self.low_control
    }

    /// Current steering multiplier
    pub fn control_factor(&self, ctx: &MovementContext) -> f32 {
        if self.low_control {
            ctx.stats.air_control
        } else {
            1.0
        }
    }

    /// Record new input and recompute the airborne horizontal velocity
    pub fn on_move_input(&mut self, ctx: &mut MovementContext, input: Vec2) {
        ctx.move_input = input;

        if !self.low_control && ctx.horizontal_sign() != self.takeoff_dir_sign {
            self.low_control = true;
        }

        self.recompute(ctx);
    }

    /// Airborne horizontal velocity and facing from the current input
    ///
    /// Runs on every input change and every airborne tick.
    pub fn recompute(&self, ctx: &mut MovementContext) {
        ctx.controlled_velocity = ctx.walk_speed() * ctx.move_input.x * self.control_factor(ctx);

        // Only turn around on a real reversal, not while passing through zero
        let epsilon = ctx.stats.input_epsilon;
        if !near_zero(ctx.controlled_velocity, epsilon) {
            let velocity_sign = sign_or_zero(ctx.controlled_velocity, epsilon);
            if velocity_sign != ctx.facing_sign {
                ctx.facing_sign = velocity_sign;
            }
        }
    }
}
