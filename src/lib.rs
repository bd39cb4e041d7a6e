// Locomotion state machine for a 2D platformer character
//
// `game::characters` holds the state machine and the character that drives
// it; `engine` provides the physics and input collaborators.

pub mod core;
pub mod engine;
pub mod game;
