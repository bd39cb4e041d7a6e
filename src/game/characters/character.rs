// Character entity: wires the locomotion state machine to physics and animation

use log::info;

use crate::engine::input::InputEvent;
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};

use super::animation::AnimationPlayer;
use super::state::{CharacterState, CharacterStateMachine, Effect};
use super::stats::{CharacterStats, StatsError};

/// Character capsule width in world units
pub const CHARACTER_WIDTH: f32 = 1.0;
/// Character capsule height in world units
pub const CHARACTER_HEIGHT: f32 = 2.0;

/// Unique identifier for a character
pub type CharacterId = u32;

/// A player character in the physics world
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display and logs)
    pub name: String,

    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's collider
    pub collider_handle: ColliderHandle,

    state_machine: CharacterStateMachine,
    animation: AnimationPlayer,
}

impl Character {
    /// Create a character, add it to the physics world and enter Idle
    pub fn spawn(
        id: CharacterId,
        name: &str,
        stats: CharacterStats,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Result<Self, StatsError> {
        let state_machine = CharacterStateMachine::try_new(stats)?;

        let body_handle = physics.add_rigid_body(presets::player_body(spawn_x, spawn_y));
        let collider_handle = physics.add_collider(
            presets::player_collider(CHARACTER_WIDTH, CHARACTER_HEIGHT),
            body_handle,
        );

        let mut character = Self {
            id,
            name: name.to_string(),
            body_handle,
            collider_handle,
            state_machine,
            animation: AnimationPlayer::with_standard_animations(),
        };

        let effects = character.state_machine.begin();
        character.apply_effects(physics, &effects);
        info!(
            "Spawned character {} '{}' at ({}, {})",
            id, name, spawn_x, spawn_y
        );

        Ok(character)
    }

    /// Route an input event into the state machine
    pub fn handle_input(&mut self, physics: &mut PhysicsWorld, event: InputEvent) {
        let effects = match event {
            InputEvent::Move(axis) => self.state_machine.on_move_input(axis),
            InputEvent::JumpPressed => self.state_machine.on_jump_pressed(),
            InputEvent::JumpReleased => self.state_machine.on_jump_held_released(),
        };
        self.apply_effects(physics, &effects);
    }

    /// Push the controlled velocity to the body
    ///
    /// Runs before the physics step so the grounded check that follows sees
    /// the velocity produced by the previous tick's output.
    pub fn pre_physics(&mut self, physics: &mut PhysicsWorld) {
        let ctx = self.state_machine.context();
        physics.set_horizontal_velocity(self.body_handle, ctx.controlled_velocity);
        self.animation.set_flip_horizontal(ctx.facing_sign < 0.0);
    }

    /// Feed the stepped vertical velocity and the animation clock back in
    pub fn post_physics(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let Some(velocity) = physics.linvel(self.body_handle) else {
            return;
        };

        let effects = self.state_machine.on_physics_tick(velocity.y);
        self.apply_effects(physics, &effects);

        if self.animation.update(dt) {
            let effects = self.state_machine.on_jump_animation_finished();
            self.apply_effects(physics, &effects);
        }
    }

    /// Carry out the effects requested by state entry actions
    fn apply_effects(&mut self, physics: &mut PhysicsWorld, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::SetAnimation(mode) => self.animation.apply_mode(mode),
                Effect::TriggerJumpAnimation => self.animation.trigger_jump(),
                Effect::ApplyImpulse { vertical } => {
                    physics.apply_vertical_impulse(self.body_handle, vertical)
                }
            }
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn state_machine(&self) -> &CharacterStateMachine {
        &self.state_machine
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Option<(f32, f32)> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let pos = body.translation();
            (pos.x, pos.y)
        })
    }

    /// Get character's current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<(f32, f32)> {
        physics.linvel(self.body_handle).map(|vel| (vel.x, vel.y))
    }
}
