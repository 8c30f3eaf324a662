// Demo level: a handful of platforms and triggers laid out in the physics
// world, plus the glue that turns trigger overlaps into player events.

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, info};

use super::player::{Interactor, PlayerBody, PlayerController};
use super::respawn::RespawnDirector;
use crate::engine::physics::{
    presets, Collider, ColliderHandle, CollisionEvent, CollisionGroups, PhysicsWorld,
};

/// Where the player first appears
pub const SPAWN_POINT: Vec2 = Vec2::new(0.0, 1.5);

/// Player capsule size in world units
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);

/// What a collider stands for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelObject {
    Platform,
    Ladder,
    Water,
    GrappleAnchor,
    /// Spikes; hurts on contact
    Hazard { damage: i32 },
    /// Bottomless pit; kills on contact
    KillZone,
    Checkpoint { respawn_point: Vec2 },
}

/// Something the player touched this step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelEvent {
    HazardTouched { damage: i32 },
    FellOut,
    CheckpointReached { respawn_point: Vec2 },
}

impl LevelEvent {
    /// Route the event to the controller or the respawn director
    pub fn apply(
        self,
        controller: &mut PlayerController,
        body: &mut dyn PlayerBody,
        respawn: &mut RespawnDirector,
    ) {
        match self {
            LevelEvent::HazardTouched { damage } => {
                let outcome = controller.apply_damage(damage, body);
                debug!("hazard hit for {damage}: {outcome:?}");
            }
            LevelEvent::FellOut => controller.kill(body),
            LevelEvent::CheckpointReached { respawn_point } => {
                respawn.set_respawn_point(respawn_point)
            }
        }
    }
}

/// Level colliders keyed by handle
#[derive(Debug, Default)]
pub struct Level {
    objects: HashMap<ColliderHandle, LevelObject>,
    spawn_point: Vec2,
}

impl Level {
    pub fn new(spawn_point: Vec2) -> Self {
        Self {
            objects: HashMap::new(),
            spawn_point,
        }
    }

    /// Lay out the demo course
    pub fn build_demo(world: &mut PhysicsWorld) -> Self {
        let mut level = Self::new(SPAWN_POINT);

        // Ground, with a gap over the pit at x in [24, 28]
        level.add_platform(world, Vec2::new(2.0, -0.5), 44.0, 1.0);
        level.add_platform(world, Vec2::new(36.0, -0.5), 16.0, 1.0);
        level.add_platform(world, Vec2::new(6.0, 3.0), 4.0, 0.5);

        // Ladder up to a ledge
        level.add_trigger(world, Vec2::new(12.0, 3.0), 1.0, 6.0, LevelObject::Ladder);
        level.add_platform(world, Vec2::new(15.0, 6.25), 5.0, 0.5);

        // Pool resting on the ground
        level.add_trigger(world, Vec2::new(-14.0, 2.0), 8.0, 4.0, LevelObject::Water);

        level.add_trigger(
            world,
            Vec2::new(20.0, 0.25),
            2.0,
            0.5,
            LevelObject::Hazard { damage: 1 },
        );
        level.add_trigger(world, Vec2::new(26.0, -20.0), 120.0, 2.0, LevelObject::KillZone);
        level.add_trigger(
            world,
            Vec2::new(32.0, 1.0),
            1.0,
            2.0,
            LevelObject::Checkpoint {
                respawn_point: Vec2::new(32.0, 1.5),
            },
        );

        // Anchors over the pit for the spider
        level.add_anchor(world, Vec2::new(24.0, 8.0));
        level.add_anchor(world, Vec2::new(28.0, 8.0));

        info!("demo level built with {} objects", level.len());
        level
    }

    pub fn add_platform(
        &mut self,
        world: &mut PhysicsWorld,
        center: Vec2,
        width: f32,
        height: f32,
    ) -> ColliderHandle {
        let collider = presets::platform_collider(Vec2::new(width, height));
        self.insert(world, center, collider, LevelObject::Platform)
    }

    /// Box sensor for ladders, water, hazards and checkpoints
    pub fn add_trigger(
        &mut self,
        world: &mut PhysicsWorld,
        center: Vec2,
        width: f32,
        height: f32,
        object: LevelObject,
    ) -> ColliderHandle {
        let collider = presets::trigger_collider(group_for(object), Vec2::new(width, height));
        self.insert(world, center, collider, object)
    }

    pub fn add_anchor(&mut self, world: &mut PhysicsWorld, center: Vec2) -> ColliderHandle {
        let collider = presets::grapple_anchor_collider(0.3);
        self.insert(world, center, collider, LevelObject::GrappleAnchor)
    }

    fn insert(
        &mut self,
        world: &mut PhysicsWorld,
        center: Vec2,
        collider: Collider,
        object: LevelObject,
    ) -> ColliderHandle {
        let body = world.add_rigid_body(presets::static_body(center));
        let handle = world.add_collider(collider, body);
        self.objects.insert(handle, object);
        handle
    }

    pub fn object(&self, collider: ColliderHandle) -> Option<LevelObject> {
        self.objects.get(&collider).copied()
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Translate this step's overlap starts involving `player` into level events.
    /// Ladder, water and platform contacts are sensed by queries instead.
    pub fn player_events(&self, events: &[CollisionEvent], player: ColliderHandle) -> Vec<LevelEvent> {
        events
            .iter()
            .filter(|event| event.is_started())
            .filter_map(|event| event.other(player))
            .filter_map(|other| match self.object(other)? {
                LevelObject::Hazard { damage } => Some(LevelEvent::HazardTouched { damage }),
                LevelObject::KillZone => Some(LevelEvent::FellOut),
                LevelObject::Checkpoint { respawn_point } => {
                    Some(LevelEvent::CheckpointReached { respawn_point })
                }
                _ => None,
            })
            .collect()
    }
}

fn group_for(object: LevelObject) -> CollisionGroups {
    match object {
        LevelObject::Platform => CollisionGroups::Platform,
        LevelObject::Ladder => CollisionGroups::Ladder,
        LevelObject::Water => CollisionGroups::Water,
        LevelObject::GrappleAnchor => CollisionGroups::Grapple,
        LevelObject::Hazard { .. } | LevelObject::KillZone => CollisionGroups::Hazard,
        LevelObject::Checkpoint { .. } => CollisionGroups::Checkpoint,
    }
}

/// A switch the player can flip with Interact
#[derive(Debug, Clone, PartialEq)]
pub struct Lever {
    pub name: String,
    pub position: Vec2,
    pub on: bool,
}

/// Interactor that flips the nearest lever within reach
#[derive(Debug, Clone)]
pub struct LeverInteractor {
    levers: Vec<Lever>,
    reach: f32,
}

impl LeverInteractor {
    pub fn new(reach: f32) -> Self {
        Self {
            levers: Vec::new(),
            reach,
        }
    }

    /// The demo level's levers
    pub fn demo() -> Self {
        Self::new(1.5)
            .with_lever("gate", Vec2::new(4.0, 0.5))
            .with_lever("bridge", Vec2::new(16.0, 7.0))
    }

    pub fn with_lever(mut self, name: &str, position: Vec2) -> Self {
        self.levers.push(Lever {
            name: name.to_string(),
            position,
            on: false,
        });
        self
    }

    pub fn levers(&self) -> &[Lever] {
        &self.levers
    }
}

impl Interactor for LeverInteractor {
    fn try_interact(&mut self, position: Vec2) -> bool {
        let reach = self.reach;
        let nearest = self
            .levers
            .iter_mut()
            .map(|lever| (lever.position.distance(position), lever))
            .filter(|(distance, _)| *distance <= reach)
            .min_by(|(a, _), (b, _)| a.total_cmp(b));

        match nearest {
            Some((_, lever)) => {
                lever.on = !lever.on;
                info!("lever '{}' switched {}", lever.name, if lever.on { "on" } else { "off" });
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::physics::{PlayerRig, RapierPlayerBody};
    use crate::game::player::testing::TestBody;
    use crate::game::player::{PlayerControllerBuilder, PlayerSettings};

    fn spawn_player(world: &mut PhysicsWorld, at: Vec2) -> PlayerRig {
        PlayerRig::spawn(world, at, PLAYER_SIZE)
    }

    #[test]
    fn test_demo_level_sensors() {
        let mut world = PhysicsWorld::new();
        let level = Level::build_demo(&mut world);
        assert!(!level.is_empty());

        let start = spawn_player(&mut world, Vec2::new(0.0, PLAYER_SIZE.y / 2.0));
        let pool = spawn_player(&mut world, Vec2::new(-14.0, 1.5));
        let ladder = spawn_player(&mut world, Vec2::new(12.0, 2.0));
        world.refresh_queries();

        let at_start = RapierPlayerBody::new(&mut world, start).sense();
        assert!(at_start.grounded && !at_start.in_water && !at_start.touching_ladder);

        assert!(RapierPlayerBody::new(&mut world, pool).sense().in_water);
        assert!(RapierPlayerBody::new(&mut world, ladder).sense().touching_ladder);
    }

    #[test]
    fn test_spikes_report_hazard() {
        let mut world = PhysicsWorld::new();
        let level = Level::build_demo(&mut world);
        let rig = spawn_player(&mut world, Vec2::new(20.0, 0.8));

        world.step();
        let events = level.player_events(&world.drain_collision_events(), rig.collider);

        assert_eq!(events, vec![LevelEvent::HazardTouched { damage: 1 }]);
    }

    #[test]
    fn test_checkpoint_moves_respawn_point() {
        let mut world = PhysicsWorld::new();
        let level = Level::build_demo(&mut world);
        let rig = spawn_player(&mut world, Vec2::new(32.0, 0.8));

        world.step();
        let events = level.player_events(&world.drain_collision_events(), rig.collider);
        assert_eq!(
            events,
            vec![LevelEvent::CheckpointReached {
                respawn_point: Vec2::new(32.0, 1.5)
            }]
        );

        let mut body = TestBody::default();
        let mut controller = PlayerControllerBuilder::new(Arc::new(PlayerSettings::default()))
            .build(&mut body)
            .expect("controller builds");
        let mut respawn = RespawnDirector::new(level.spawn_point(), 1.0);
        for event in events {
            event.apply(&mut controller, &mut body, &mut respawn);
        }
        assert_eq!(respawn.respawn_point(), Vec2::new(32.0, 1.5));
    }

    #[test]
    fn test_hazard_and_pit_events_hurt_the_player() {
        let mut body = TestBody::default();
        let mut controller = PlayerControllerBuilder::new(Arc::new(PlayerSettings::default()))
            .build(&mut body)
            .expect("controller builds");
        let mut respawn = RespawnDirector::new(SPAWN_POINT, 1.0);
        let full = controller.current_health();

        LevelEvent::HazardTouched { damage: 1 }.apply(&mut controller, &mut body, &mut respawn);
        assert_eq!(controller.current_health(), full - 1);
        assert!(!controller.is_dead());

        LevelEvent::FellOut.apply(&mut controller, &mut body, &mut respawn);
        assert!(controller.is_dead());
    }

    #[test]
    fn test_lever_needs_reach() {
        let mut levers = LeverInteractor::demo();

        assert!(!levers.try_interact(Vec2::new(-10.0, 0.0)));
        assert!(levers.try_interact(Vec2::new(4.5, 0.8)));
        assert!(levers.levers()[0].on);
        assert!(!levers.levers()[1].on);

        assert!(levers.try_interact(Vec2::new(4.5, 0.8)));
        assert!(!levers.levers()[0].on);
    }

    #[test]
    fn test_stopped_and_unrelated_events_are_ignored() {
        let mut world = PhysicsWorld::new();
        let mut level = Level::new(SPAWN_POINT);
        let spikes = level.add_trigger(
            &mut world,
            Vec2::ZERO,
            1.0,
            1.0,
            LevelObject::Hazard { damage: 2 },
        );
        let rig = spawn_player(&mut world, Vec2::new(50.0, 50.0));

        let events = [
            CollisionEvent::Stopped {
                collider1: spikes,
                collider2: rig.collider,
                sensor: true,
            },
            CollisionEvent::Started {
                collider1: spikes,
                collider2: ColliderHandle::invalid(),
                sensor: true,
            },
        ];
        assert!(level.player_events(&events, rig.collider).is_empty());
    }
}
