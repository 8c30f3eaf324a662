use rapier2d::parry::shape::Ball;
use rapier2d::prelude::*;

use super::collision::{CollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// The rapier pipeline plus the sets it steps
pub struct PhysicsWorld {
    /// Default: -9.81 on y
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Raycasts and overlap tests; refreshed by every step
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    collision_events: CollisionEventQueue,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = crate::engine::game_loop::FIXED_TIMESTEP;

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
            collision_events: CollisionEventQueue::new(),
        }
    }

    /// Advance one fixed step. Collision events pile up until drained.
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
            &self.collision_events,
        );
    }

    /// Rebuild the query structures without stepping, e.g. right after
    /// building a level
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.rigid_body_set, &self.collider_set);
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    pub fn add_collider(&mut self, collider: Collider, parent: RigidBodyHandle) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Remove a body together with its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    pub fn rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// First hit along a ray as (collider, time of impact)
    pub fn raycast(
        &self,
        origin: Point<Real>,
        direction: Vector<Real>,
        max_toi: Real,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(origin, direction);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            true,
            filter,
        )
    }

    /// Any collider overlapping a circle of `radius` at `center`
    pub fn overlap_circle(
        &self,
        center: Point<Real>,
        radius: Real,
        filter: QueryFilter,
    ) -> Option<ColliderHandle> {
        let shape = Ball::new(radius);
        let position = Isometry::translation(center.x, center.y);
        self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &position,
            &shape,
            filter,
        )
    }

    /// Every collision event since the last drain
    pub fn drain_collision_events(&self) -> Vec<CollisionEvent> {
        self.collision_events.drain()
    }

    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
