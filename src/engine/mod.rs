// Engine modules: physics, input

pub mod input;
pub mod physics;
