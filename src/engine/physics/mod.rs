// Physics system using rapier2d

pub mod body;
mod world;

pub use body::presets;
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, Vector};
