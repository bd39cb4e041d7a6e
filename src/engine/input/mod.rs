// Input handling
//
// Converts button edges into the events a character's locomotion state
// machine consumes.
//
// - `action`: buttons and the events they produce
// - `player`: per-player pressed state and axis tracking
// - `script`: tick-scheduled button edges for headless runs

pub mod action;
pub mod player;
pub mod script;

// Re-export commonly used types
pub use action::{Action, InputEvent};
pub use player::PlayerInput;
pub use script::{ButtonState, InputScript, ScriptStep};
