use rapier2d::prelude::*;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Linear velocity of a body
    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vector<Real>> {
        self.get_rigid_body(handle).map(|body| *body.linvel())
    }

    /// Overwrite the horizontal velocity, leaving the vertical one to gravity
    pub fn set_horizontal_velocity(&mut self, handle: RigidBodyHandle, vx: Real) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            let mut velocity = *body.linvel();
            velocity.x = vx;
            body.set_linvel(velocity, true);
        }
    }

    /// Apply a one-shot upward impulse
    pub fn apply_vertical_impulse(&mut self, handle: RigidBodyHandle, impulse: Real) {
        if let Some(body) = self.get_rigid_body_mut(handle) {
            body.apply_impulse(vector![0.0, impulse], true);
        }
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::presets;
    use super::*;

    #[test]
    fn test_default_world() {
        let world = PhysicsWorld::new();
        assert_eq!(world.gravity().y, -9.81);
        assert!((world.timestep() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_falls_under_gravity() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);

        world.step();
        let velocity = world.linvel(handle).unwrap();
        assert!(velocity.y < 0.0);
    }

    #[test]
    fn test_horizontal_velocity_keeps_vertical() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);
        world.step();

        let before = world.linvel(handle).unwrap();
        world.set_horizontal_velocity(handle, 3.0);
        let after = world.linvel(handle).unwrap();
        assert_eq!(after.x, 3.0);
        assert_eq!(after.y, before.y);
    }

    #[test]
    fn test_vertical_impulse_pushes_up() {
        let mut world = PhysicsWorld::with_gravity(vector![0.0, 0.0]);
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);
        // Mass properties settle on the first step
        world.step();

        world.apply_vertical_impulse(handle, 5.0);
        assert!(world.linvel(handle).unwrap().y > 0.0);
    }
}
