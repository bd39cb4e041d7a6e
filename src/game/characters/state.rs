// Character locomotion state machine

use glam::Vec2;
use log::{debug, error};

use crate::core::math::near_zero;

use super::airborne::AirControl;
use super::context::{AnimationMode, MovementContext};
use super::stats::{CharacterStats, StatsError};

/// Locomotion mode of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Walking,
    /// In the air, ascent animation still playing
    Jumping,
    /// In the air, gravity has taken over
    Falling,
}

impl CharacterState {
    /// Check if the character is on the ground
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Idle | Self::Walking)
    }

    /// Check if the character is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    /// Check if a jump press starts a jump
    pub fn can_jump(&self) -> bool {
        self.is_grounded()
    }

    /// Animation mode set when entering this state
    pub fn animation_mode(&self) -> AnimationMode {
        match self {
            Self::Idle => AnimationMode::Idle,
            Self::Walking => AnimationMode::Walking,
            Self::Jumping => AnimationMode::Ascend,
            Self::Falling => AnimationMode::Fall,
        }
    }
}

/// Side effect requested from the driver by an entry action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Switch the looping animation
    SetAnimation(AnimationMode),
    /// Start the one-shot jump animation
    TriggerJumpAnimation,
    /// Apply a one-shot upward impulse to the body
    ApplyImpulse { vertical: f32 },
}

/// Active state together with its state-local data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveState {
    Idle,
    Walking,
    Jumping(AirControl),
    Falling(AirControl),
}

impl ActiveState {
    pub fn kind(&self) -> CharacterState {
        match self {
            Self::Idle => CharacterState::Idle,
            Self::Walking => CharacterState::Walking,
            Self::Jumping(_) => CharacterState::Jumping,
            Self::Falling(_) => CharacterState::Falling,
        }
    }

    /// Air-control data while airborne
    pub fn air_control(&self) -> Option<&AirControl> {
        match self {
            Self::Jumping(air) | Self::Falling(air) => Some(air),
            Self::Idle | Self::Walking => None,
        }
    }

    fn air_control_mut(&mut self) -> Option<&mut AirControl> {
        match self {
            Self::Jumping(air) | Self::Falling(air) => Some(air),
            Self::Idle | Self::Walking => None,
        }
    }
}

/// Walking velocity and facing, recomputed from scratch
fn recompute_walking(ctx: &mut MovementContext) {
    ctx.controlled_velocity = ctx.walk_speed() * ctx.move_input.x;
    if ctx.has_horizontal_input() {
        ctx.facing_sign = ctx.horizontal_sign();
    }
}

/// State machine driving a character's locomotion
///
/// Events are delivered by the driver; every handler runs synchronously and
/// returns the effects produced by entry actions of any transition it caused.
#[derive(Debug)]
pub struct CharacterStateMachine {
    context: MovementContext,
    current: Option<ActiveState>,
    previous_state: CharacterState,
    transition_count: u64,
    changed_on_last_event: bool,
}

impl Default for CharacterStateMachine {
    fn default() -> Self {
        Self::new(CharacterStats::default())
    }
}

impl CharacterStateMachine {
    /// Create a machine that has not been started yet
    pub fn new(stats: CharacterStats) -> Self {
        Self {
            context: MovementContext::new(stats),
            current: None,
            previous_state: CharacterState::Idle,
            transition_count: 0,
            changed_on_last_event: false,
        }
    }

    /// Validate the stats before creating the machine
    pub fn try_new(stats: CharacterStats) -> Result<Self, StatsError> {
        stats.validate()?;
        Ok(Self::new(stats))
    }

    /// Enter Idle. Must be called before any other event.
    pub fn begin(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.changed_on_last_event = false;
        self.transition_to(CharacterState::Idle, &mut effects);
        effects
    }

    /// Whether `begin` has been called
    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// Get the current state
    ///
    /// Reports Idle before `begin`, the state `begin` always enters.
    pub fn state(&self) -> CharacterState {
        self.current
            .map(|state| state.kind())
            .unwrap_or(CharacterState::Idle)
    }

    /// Get the active state with its local data
    pub fn active_state(&self) -> Option<&ActiveState> {
        self.current.as_ref()
    }

    /// Get the previous state
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Number of transitions performed, including the one made by `begin`
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// Check if the last delivered event changed state
    pub fn state_just_changed(&self) -> bool {
        self.changed_on_last_event
    }

    pub fn context(&self) -> &MovementContext {
        &self.context
    }

    /// Movement axis changed
    pub fn on_move_input(&mut self, input: Vec2) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(state) = self.started("move input") else {
            return effects;
        };

        match state {
            ActiveState::Idle => {
                self.context.move_input = input;
                if self.context.has_horizontal_input() {
                    self.transition_to(CharacterState::Walking, &mut effects);
                }
            }
            ActiveState::Walking => {
                self.context.move_input = input;
                if self.context.has_horizontal_input() {
                    recompute_walking(&mut self.context);
                } else {
                    self.transition_to(CharacterState::Idle, &mut effects);
                }
            }
            ActiveState::Jumping(_) | ActiveState::Falling(_) => {
                if let Some(air) = self.current.as_mut().and_then(ActiveState::air_control_mut) {
                    air.on_move_input(&mut self.context, input);
                }
            }
        }

        effects
    }

    /// Jump button pressed
    pub fn on_jump_pressed(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(state) = self.started("jump press") else {
            return effects;
        };

        self.context.jump_held = true;
        if state.kind().can_jump() {
            self.transition_to(CharacterState::Jumping, &mut effects);
        }

        effects
    }

    /// Jump button released. Never changes state.
    pub fn on_jump_held_released(&mut self) -> Vec<Effect> {
        if self.started("jump release").is_some() {
            self.context.jump_held = false;
        }
        Vec::new()
    }

    /// The ascent animation completed
    pub fn on_jump_animation_finished(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.started("jump animation finished").is_none() {
            return effects;
        }

        self.context.jump_finished = true;
        self.check_fall(&mut effects);
        effects
    }

    /// Fixed-rate poll after the driver applied velocity and stepped physics
    pub fn on_physics_tick(&mut self, vertical_velocity: f32) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.started("physics tick").is_none() {
            return effects;
        }

        if near_zero(vertical_velocity, self.context.stats.grounded_epsilon) {
            self.check_grounded(&mut effects);
        } else {
            self.check_fall(&mut effects);
        }

        // Still airborne after the checks: refresh air steering
        if let Some(air) = self.current.as_ref().and_then(ActiveState::air_control) {
            air.recompute(&mut self.context);
        }
        effects
    }

    fn check_grounded(&mut self, effects: &mut Vec<Effect>) {
        if let Some(ActiveState::Falling(_)) = self.current {
            // Land using the latest input, not the takeoff input
            let next = if self.context.has_horizontal_input() {
                CharacterState::Walking
            } else {
                CharacterState::Idle
            };
            self.transition_to(next, effects);
        }
    }

    fn check_fall(&mut self, effects: &mut Vec<Effect>) {
        if let Some(ActiveState::Jumping(_)) = self.current {
            if self.context.jump_finished {
                self.transition_to(CharacterState::Falling, effects);
            }
        }
    }

    /// Active state, or `None` when `begin` has not been called
    fn started(&mut self, event: &str) -> Option<ActiveState> {
        self.changed_on_last_event = false;
        debug_assert!(self.current.is_some(), "{event} delivered before begin()");
        if self.current.is_none() {
            error!("Ignoring {event}: state machine has not begun");
        }
        self.current
    }

    /// Swap in `next` and run its entry action
    fn transition_to(&mut self, next: CharacterState, effects: &mut Vec<Effect>) {
        let from = self.current.map(|state| state.kind());
        let ctx = &mut self.context;

        ctx.animation = next.animation_mode();
        effects.push(Effect::SetAnimation(ctx.animation));

        let state = match next {
            CharacterState::Idle => {
                ctx.controlled_velocity = 0.0;
                ActiveState::Idle
            }
            CharacterState::Walking => {
                recompute_walking(ctx);
                ActiveState::Walking
            }
            CharacterState::Jumping => {
                let air = AirControl::enter(ctx);
                ctx.jump_finished = false;
                effects.push(Effect::TriggerJumpAnimation);
                effects.push(Effect::ApplyImpulse {
                    vertical: ctx.jump_impulse(),
                });
                air.recompute(ctx);
                ActiveState::Jumping(air)
            }
            CharacterState::Falling => {
                let air = AirControl::enter(ctx);
                air.recompute(ctx);
                ActiveState::Falling(air)
            }
        };

        debug!("Locomotion state {:?} -> {:?}", from, next);

        if let Some(from) = from {
            self.previous_state = from;
        }
        self.current = Some(state);
        self.transition_count += 1;
        self.changed_on_last_event = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn started() -> CharacterStateMachine {
        let mut sm = CharacterStateMachine::new(CharacterStats::with_movement(5.0, 8.0));
        sm.begin();
        sm
    }

    fn falling_from_standstill() -> CharacterStateMachine {
        let mut sm = started();
        sm.on_jump_pressed();
        sm.on_jump_animation_finished();
        assert_eq!(sm.state(), CharacterState::Falling);
        sm
    }

    #[test]
    fn test_begin_enters_idle() {
        let mut sm = CharacterStateMachine::default();
        assert!(!sm.is_started());

        let effects = sm.begin();
        assert!(sm.is_started());
        assert_eq!(sm.state(), CharacterState::Idle);
        assert_eq!(effects, vec![Effect::SetAnimation(AnimationMode::Idle)]);
        assert_eq!(sm.context().controlled_velocity, 0.0);
        assert_eq!(sm.transition_count(), 1);
    }

    #[test]
    fn test_try_new_rejects_invalid_stats() {
        let stats = CharacterStats::default().with_air_control(-0.1);
        assert!(CharacterStateMachine::try_new(stats).is_err());
        assert!(CharacterStateMachine::try_new(CharacterStats::default()).is_ok());
    }

    #[test]
    fn test_idle_to_walking() {
        let mut sm = started();
        let effects = sm.on_move_input(Vec2::new(0.5, 0.0));

        assert_eq!(sm.state(), CharacterState::Walking);
        assert_eq!(sm.previous_state(), CharacterState::Idle);
        assert!(sm.state_just_changed());
        assert_relative_eq!(sm.context().controlled_velocity, 2.5);
        assert_eq!(sm.context().facing_sign, 1.0);
        assert_eq!(effects, vec![Effect::SetAnimation(AnimationMode::Walking)]);
    }

    #[test]
    fn test_idle_zero_input_stays_idle() {
        let mut sm = started();
        for _ in 0..3 {
            let effects = sm.on_move_input(Vec2::ZERO);
            assert!(effects.is_empty());
            assert_eq!(sm.state(), CharacterState::Idle);
        }
        assert_eq!(sm.transition_count(), 1);
    }

    #[test]
    fn test_idle_vertical_only_input_stays_idle() {
        let mut sm = started();
        let before = sm.context().clone();

        sm.on_move_input(Vec2::new(0.0, -1.0));
        assert_eq!(sm.state(), CharacterState::Idle);

        let after = sm.context();
        assert_eq!(after.move_input, Vec2::new(0.0, -1.0));
        assert_eq!(after.controlled_velocity, before.controlled_velocity);
        assert_eq!(after.facing_sign, before.facing_sign);
        assert_eq!(after.animation, before.animation);
    }

    #[test]
    fn test_walking_speed_and_stop() {
        let mut sm = started();
        sm.on_move_input(Vec2::new(1.0, 0.0));
        assert_relative_eq!(sm.context().controlled_velocity, 5.0);

        sm.on_move_input(Vec2::new(0.0, 0.0));
        assert_eq!(sm.state(), CharacterState::Idle);
        assert_eq!(sm.context().controlled_velocity, 0.0);
        assert_eq!(sm.context().animation, AnimationMode::Idle);
    }

    #[test]
    fn test_walking_recomputes_on_reversal() {
        let mut sm = started();
        sm.on_move_input(Vec2::new(1.0, 0.0));
        let effects = sm.on_move_input(Vec2::new(-0.4, 0.0));

        assert!(effects.is_empty());
        assert_eq!(sm.state(), CharacterState::Walking);
        assert_relative_eq!(sm.context().controlled_velocity, -2.0);
        assert_eq!(sm.context().facing_sign, -1.0);
    }

    #[test]
    fn test_grounded_states_ignore_ticks() {
        let mut sm = started();
        sm.on_physics_tick(0.0);
        sm.on_physics_tick(-3.0);
        assert_eq!(sm.state(), CharacterState::Idle);

        sm.on_move_input(Vec2::new(1.0, 0.0));
        let before = sm.context().clone();
        sm.on_physics_tick(-3.0);
        sm.on_physics_tick(0.0);
        assert_eq!(sm.state(), CharacterState::Walking);
        assert_eq!(sm.context(), &before);
    }

    #[test]
    fn test_jump_from_idle() {
        let mut sm = started();
        let effects = sm.on_jump_pressed();

        assert_eq!(sm.state(), CharacterState::Jumping);
        assert!(sm.context().jump_held);
        assert!(!sm.context().jump_finished);
        assert_eq!(sm.context().animation, AnimationMode::Ascend);
        assert_eq!(
            effects,
            vec![
                Effect::SetAnimation(AnimationMode::Ascend),
                Effect::TriggerJumpAnimation,
                Effect::ApplyImpulse { vertical: 8.0 },
            ]
        );

        sm.on_physics_tick(4.0);
        assert_eq!(sm.state(), CharacterState::Jumping);
    }

    #[test]
    fn test_jump_from_walking_damps_air_speed() {
        let mut sm = started();
        sm.on_move_input(Vec2::new(1.0, 0.0));
        assert_relative_eq!(sm.context().controlled_velocity, 5.0);

        sm.on_jump_pressed();
        assert_eq!(sm.state(), CharacterState::Jumping);
        assert_relative_eq!(sm.context().controlled_velocity, 3.0);
        let air = sm.active_state().and_then(|s| s.air_control()).copied();
        assert!(air.is_some_and(|a| a.low_control()));
    }

    #[test]
    fn test_airborne_ticks_keep_damped_speed() {
        let mut sm = started();
        sm.on_move_input(Vec2::new(1.0, 0.0));
        sm.on_jump_pressed();
        for _ in 0..30 {
            sm.on_physics_tick(3.0);
            assert_relative_eq!(sm.context().controlled_velocity, 3.0);
        }

        sm.on_jump_animation_finished();
        for _ in 0..30 {
            sm.on_physics_tick(-3.0);
        }
        assert_eq!(sm.state(), CharacterState::Falling);
        assert_relative_eq!(sm.context().controlled_velocity, 3.0);
        assert_eq!(sm.context().facing_sign, 1.0);

        sm.on_physics_tick(0.0);
        assert_eq!(sm.state(), CharacterState::Walking);
        assert_relative_eq!(sm.context().controlled_velocity, 5.0);
    }

    #[test]
    fn test_airborne_ignores_jump_press() {
        let mut sm = started();
        sm.on_jump_pressed();
        let effects = sm.on_jump_pressed();
        assert!(effects.is_empty());
        assert_eq!(sm.state(), CharacterState::Jumping);
        assert_eq!(sm.transition_count(), 2);

        sm.on_jump_animation_finished();
        assert!(sm.on_jump_pressed().is_empty());
        assert_eq!(sm.state(), CharacterState::Falling);
    }

    #[test]
    fn test_jump_release_only_clears_flag() {
        let mut sm = started();
        sm.on_jump_pressed();
        assert!(sm.context().jump_held);

        let effects = sm.on_jump_held_released();
        assert!(effects.is_empty());
        assert!(!sm.context().jump_held);
        assert_eq!(sm.state(), CharacterState::Jumping);
    }

    #[test]
    fn test_animation_finished_starts_falling() {
        let mut sm = started();
        sm.on_jump_pressed();
        let effects = sm.on_jump_animation_finished();

        assert!(sm.context().jump_finished);
        assert_eq!(sm.state(), CharacterState::Falling);
        assert_eq!(effects, vec![Effect::SetAnimation(AnimationMode::Fall)]);
    }

    #[test]
    fn test_jumping_waits_for_animation_before_falling() {
        let mut sm = started();
        sm.on_jump_pressed();
        sm.on_physics_tick(-2.0);
        sm.on_physics_tick(0.0);
        assert_eq!(sm.state(), CharacterState::Jumping);
    }

    #[test]
    fn test_animation_finished_outside_jumping_only_sets_flag() {
        let mut sm = started();
        let effects = sm.on_jump_animation_finished();
        assert!(effects.is_empty());
        assert!(sm.context().jump_finished);
        assert_eq!(sm.state(), CharacterState::Idle);
    }

    #[test]
    fn test_low_control_latches_on_first_commitment() {
        let mut sm = started();
        sm.on_jump_pressed();

        let air = |sm: &CharacterStateMachine| {
            *sm.active_state()
                .and_then(|s| s.air_control())
                .expect("airborne")
        };
        assert!(!air(&sm).low_control());

        sm.on_move_input(Vec2::new(-1.0, 0.0));
        assert!(air(&sm).low_control());
        assert_relative_eq!(sm.context().controlled_velocity, -3.0);
        assert_eq!(sm.context().facing_sign, -1.0);

        sm.on_move_input(Vec2::new(1.0, 0.0));
        assert!(air(&sm).low_control());
        assert_relative_eq!(sm.context().controlled_velocity, 3.0);
        assert_eq!(sm.context().facing_sign, 1.0);
    }

    #[test]
    fn test_falling_fall_check_is_noop() {
        let mut sm = falling_from_standstill();
        let before = sm.context().clone();
        sm.on_physics_tick(-6.0);
        sm.on_jump_animation_finished();
        assert_eq!(sm.state(), CharacterState::Falling);
        assert_eq!(sm.context(), &before);
    }

    #[test]
    fn test_landing_without_input_goes_idle() {
        let mut sm = falling_from_standstill();
        let effects = sm.on_physics_tick(0.001);
        assert_eq!(sm.state(), CharacterState::Idle);
        assert_eq!(effects, vec![Effect::SetAnimation(AnimationMode::Idle)]);
    }

    #[test]
    fn test_landing_uses_current_input() {
        let mut sm = started();
        sm.on_move_input(Vec2::new(1.0, 0.0));
        sm.on_jump_pressed();
        sm.on_jump_animation_finished();
        sm.on_move_input(Vec2::new(-0.5, 0.0));

        sm.on_physics_tick(0.0);
        assert_eq!(sm.state(), CharacterState::Walking);
        assert_relative_eq!(sm.context().controlled_velocity, -2.5);
        assert_eq!(sm.context().facing_sign, -1.0);
    }

    #[test]
    fn test_falling_entry_resets_air_control() {
        let mut sm = started();
        sm.on_jump_pressed();
        sm.on_move_input(Vec2::new(1.0, 0.0));
        sm.on_move_input(Vec2::ZERO);
        sm.on_jump_animation_finished();

        let air = sm.active_state().and_then(|s| s.air_control()).copied();
        assert!(air.is_some_and(|a| !a.low_control() && a.takeoff_dir_sign() == 0.0));
    }

    #[test]
    fn test_round_trip_restores_rest() {
        let mut sm = started();
        sm.on_move_input(Vec2::new(-1.0, 0.0));
        sm.on_move_input(Vec2::ZERO);
        assert_eq!(sm.context().facing_sign, -1.0);

        sm.on_jump_pressed();
        sm.on_physics_tick(6.0);
        sm.on_jump_animation_finished();
        sm.on_physics_tick(-4.0);
        sm.on_physics_tick(0.0);

        assert_eq!(sm.state(), CharacterState::Idle);
        assert_eq!(sm.previous_state(), CharacterState::Falling);
        assert_eq!(sm.context().controlled_velocity, 0.0);
        assert_eq!(sm.context().facing_sign, -1.0);
    }

    #[test]
    fn test_state_helpers() {
        assert!(CharacterState::Idle.is_grounded());
        assert!(CharacterState::Walking.can_jump());
        assert!(CharacterState::Jumping.is_airborne());
        assert!(!CharacterState::Falling.can_jump());
        assert_eq!(CharacterState::Falling.animation_mode(), AnimationMode::Fall);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "before begin()")]
    fn test_event_before_begin_asserts() {
        let mut sm = CharacterStateMachine::default();
        sm.on_physics_tick(0.0);
    }
}
