use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Body configurations for the character and its ground
pub mod presets {
    use super::*;

    /// Player character body: dynamic, upright, never sleeps
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .locked_axes(LockedAxes::ROTATION_LOCKED)
            .can_sleep(false)
            .build()
    }

    /// Player capsule sized to `width` x `height`
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = (height / 2.0 - radius).max(0.0);

        // Frictionless so the controlled velocity is the only horizontal drive
        ColliderBuilder::capsule_y(half_height, radius)
            .friction(0.0)
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Static ground slab whose top surface sits at `top_y`
    pub fn ground_body(center_x: Real, top_y: Real, thickness: Real) -> RigidBody {
        RigidBodyBuilder::fixed()
            .translation(vector![center_x, top_y - thickness / 2.0])
            .build()
    }

    pub fn ground_collider(width: Real, thickness: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, thickness / 2.0)
            .friction(0.3)
            .build()
    }
}
