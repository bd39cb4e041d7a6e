// Character system
//
// - Movement context and tunables shared by the locomotion states
// - State machine for Idle / Walking / Jumping / Falling
// - Air control used by both airborne states
// - Animation playback and the character entity that drives it all

pub mod airborne;
pub mod animation;
pub mod character;
pub mod context;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use airborne::AirControl;
pub use animation::{AnimationClip, AnimationPlayer};
pub use character::{Character, CharacterId};
pub use context::{AnimationMode, MovementContext};
pub use state::{ActiveState, CharacterState, CharacterStateMachine, Effect};
pub use stats::{CharacterStats, StatsError, BASE_STATS};
