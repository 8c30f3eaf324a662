// rapier2d implementation of the player body port
//
// Borrowed for one call at a time: the controller gets a fresh view over the
// world every tick, so nothing outlives a frame.

use glam::Vec2;
use rapier2d::prelude::*;

use super::body::presets;
use super::collision::CollisionGroups;
use super::world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::game::player::{PlayerBody, SensorReadings};

/// Player capsule handles and sensor tuning
#[derive(Debug, Clone, Copy)]
pub struct PlayerRig {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    /// Distance from the body centre to the bottom of the capsule
    pub foot_offset: f32,
    /// Extra ray length below the feet that still counts as standing
    pub ground_tolerance: f32,
    /// Radius of the overlap probe used for ladders and water
    pub probe_radius: f32,
    /// Half the capsule width; ground rays are cast from both edges and the centre
    pub half_width: f32,
}

impl PlayerRig {
    pub fn new(body: RigidBodyHandle, collider: ColliderHandle, width: f32, height: f32) -> Self {
        Self {
            body,
            collider,
            foot_offset: height / 2.0,
            ground_tolerance: 0.08,
            probe_radius: width * 0.25,
            half_width: width * 0.4,
        }
    }

    /// Add a player capsule of `size` at `position` to the world
    pub fn spawn(world: &mut PhysicsWorld, position: Vec2, size: Vec2) -> Self {
        let body = world.add_rigid_body(presets::player_body(position));
        let collider = world.add_collider(presets::player_collider(size), body);
        Self::new(body, collider, size.x, size.y)
    }
}

/// `PlayerBody` over a rapier rigid body
pub struct RapierPlayerBody<'w> {
    world: &'w mut PhysicsWorld,
    rig: PlayerRig,
}

impl<'w> RapierPlayerBody<'w> {
    pub fn new(world: &'w mut PhysicsWorld, rig: PlayerRig) -> Self {
        Self { world, rig }
    }

    fn body(&self) -> Option<&RigidBody> {
        self.world.rigid_body(self.rig.body)
    }

    fn body_mut(&mut self) -> Option<&mut RigidBody> {
        self.world.rigid_body_mut(self.rig.body)
    }

    fn filter(&self, target: CollisionGroups) -> QueryFilter<'static> {
        QueryFilter::new()
            .groups(target.player_query())
            .exclude_rigid_body(self.rig.body)
    }

    fn grounded(&self, position: Vec2) -> bool {
        let filter = self.filter(CollisionGroups::Platform).exclude_sensors();
        // Start inside the capsule so a body resting on the floor still hits
        let start = self.rig.foot_offset * 0.5;
        let reach = self.rig.foot_offset - start + self.rig.ground_tolerance;

        [-self.rig.half_width, 0.0, self.rig.half_width]
            .into_iter()
            .any(|dx| {
                let origin = point![position.x + dx, position.y - start];
                self.world
                    .raycast(origin, vector![0.0, -1.0], reach, filter)
                    .is_some()
            })
    }

    fn overlaps(&self, position: Vec2, target: CollisionGroups) -> bool {
        self.world
            .overlap_circle(
                point![position.x, position.y],
                self.rig.probe_radius,
                self.filter(target),
            )
            .is_some()
    }
}

fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

impl PlayerBody for RapierPlayerBody<'_> {
    fn position(&self) -> Vec2 {
        self.body()
            .map_or(Vec2::ZERO, |body| to_vec2(body.translation()))
    }

    fn velocity(&self) -> Vec2 {
        self.body().map_or(Vec2::ZERO, |body| to_vec2(body.linvel()))
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if let Some(body) = self.body_mut() {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        if let Some(body) = self.body_mut() {
            body.apply_impulse(to_vector(impulse), true);
        }
    }

    fn mass(&self) -> f32 {
        self.body().map_or(1.0, |body| body.mass())
    }

    fn gravity_scale(&self) -> f32 {
        self.body().map_or(1.0, |body| body.gravity_scale())
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        if let Some(body) = self.body_mut() {
            body.set_gravity_scale(scale, true);
        }
    }

    fn set_position(&mut self, position: Vec2) {
        if let Some(body) = self.body_mut() {
            body.set_translation(to_vector(position), true);
        }
    }

    fn sense(&self) -> SensorReadings {
        let position = self.position();
        SensorReadings {
            grounded: self.grounded(position),
            touching_ladder: self.overlaps(position, CollisionGroups::Ladder),
            in_water: self.overlaps(position, CollisionGroups::Water),
        }
    }

    fn cast_grapple(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<Vec2> {
        let direction = direction.try_normalize()?;
        let (anchor, _) = self.world.raycast(
            point![origin.x, origin.y],
            to_vector(direction),
            max_distance,
            self.filter(CollisionGroups::Grapple),
        )?;
        self.world
            .collider(anchor)
            .map(|collider| to_vec2(collider.translation()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(0.8, 1.6);

    fn spawn_player(world: &mut PhysicsWorld, x: f32, y: f32) -> PlayerRig {
        PlayerRig::spawn(world, Vec2::new(x, y), SIZE)
    }

    fn add_static(world: &mut PhysicsWorld, x: f32, y: f32, collider: Collider) {
        let body = world.add_rigid_body(presets::static_body(Vec2::new(x, y)));
        world.add_collider(collider, body);
    }

    #[test]
    fn test_standing_on_floor_is_grounded() {
        let mut world = PhysicsWorld::new();
        add_static(&mut world, 0.0, -0.5, presets::platform_collider(Vec2::new(20.0, 1.0)));
        let rig = spawn_player(&mut world, 0.0, SIZE.y / 2.0);
        world.refresh_queries();

        let body = RapierPlayerBody::new(&mut world, rig);
        let sensors = body.sense();
        assert!(sensors.grounded);
        assert!(!sensors.in_water);
        assert!(!sensors.touching_ladder);
    }

    #[test]
    fn test_high_in_the_air_is_not_grounded() {
        let mut world = PhysicsWorld::new();
        add_static(&mut world, 0.0, -0.5, presets::platform_collider(Vec2::new(20.0, 1.0)));
        let rig = spawn_player(&mut world, 0.0, 5.0);
        world.refresh_queries();

        assert!(!RapierPlayerBody::new(&mut world, rig).sense().grounded);
    }

    #[test]
    fn test_ladder_and_water_probes() {
        let mut world = PhysicsWorld::new();
        add_static(
            &mut world,
            0.0,
            2.0,
            presets::trigger_collider(CollisionGroups::Ladder, Vec2::new(1.0, 6.0)),
        );
        add_static(
            &mut world,
            10.0,
            0.0,
            presets::trigger_collider(CollisionGroups::Water, Vec2::splat(4.0)),
        );
        let on_ladder = spawn_player(&mut world, 0.0, 2.0);
        let in_pool = spawn_player(&mut world, 10.0, 0.0);
        world.refresh_queries();

        let ladder = RapierPlayerBody::new(&mut world, on_ladder).sense();
        assert!(ladder.touching_ladder && !ladder.in_water);

        let pool = RapierPlayerBody::new(&mut world, in_pool).sense();
        assert!(pool.in_water && !pool.touching_ladder);
    }

    #[test]
    fn test_grapple_hits_anchor_centre() {
        let mut world = PhysicsWorld::new();
        add_static(&mut world, 3.0, 3.0, presets::grapple_anchor_collider(0.3));
        let rig = spawn_player(&mut world, 0.0, 0.0);
        world.refresh_queries();

        let body = RapierPlayerBody::new(&mut world, rig);
        let direction = Vec2::new(1.0, 1.0);
        assert_eq!(
            body.cast_grapple(Vec2::ZERO, direction, 10.0),
            Some(Vec2::new(3.0, 3.0))
        );
        assert_eq!(body.cast_grapple(Vec2::ZERO, direction, 2.0), None);
        assert_eq!(body.cast_grapple(Vec2::ZERO, Vec2::new(-1.0, 1.0), 10.0), None);
    }

    #[test]
    fn test_writes_reach_the_rigid_body() {
        let mut world = PhysicsWorld::new();
        let rig = spawn_player(&mut world, 0.0, 0.0);

        let mut body = RapierPlayerBody::new(&mut world, rig);
        body.set_velocity(Vec2::new(2.0, 0.0));
        body.set_gravity_scale(0.3);
        body.teleport(Vec2::new(4.0, 1.0));

        assert_eq!(body.position(), Vec2::new(4.0, 1.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.gravity_scale(), 0.3);
    }
}
