use glam::Vec2;
use rapier2d::prelude::*;

use super::collision::CollisionGroups;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Rigid body recipe over rapier's builder, positioned with glam vectors
pub struct BodyBuilder {
    inner: RigidBodyBuilder,
}

impl BodyBuilder {
    /// Moved by gravity, impulses and contacts
    pub fn dynamic() -> Self {
        Self {
            inner: RigidBodyBuilder::dynamic(),
        }
    }

    /// Level geometry; never moves
    pub fn fixed() -> Self {
        Self {
            inner: RigidBodyBuilder::fixed(),
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.inner = self.inner.translation(vector![position.x, position.y]);
        self
    }

    /// Never tips over
    pub fn upright(mut self) -> Self {
        self.inner = self.inner.lock_rotations();
        self
    }

    /// Keep simulating while at rest, so sensors stay fresh
    pub fn always_awake(mut self) -> Self {
        self.inner = self.inner.can_sleep(false);
        self
    }

    /// Continuous collision detection, for fast bodies such as a super jump
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.inner = self.inner.ccd_enabled(enabled);
        self
    }

    pub fn build(self) -> RigidBody {
        self.inner.build()
    }
}

/// Collider recipe tagged with a collision layer
pub struct ColliderBuilder2D {
    inner: ColliderBuilder,
}

impl ColliderBuilder2D {
    fn from_shape(shape: SharedShape) -> Self {
        Self {
            inner: ColliderBuilder::new(shape)
                .restitution(0.0)
                .active_events(ActiveEvents::COLLISION_EVENTS),
        }
        .layer(CollisionGroups::Default)
    }

    /// Axis-aligned box of the given full size
    pub fn rectangle(size: Vec2) -> Self {
        Self::from_shape(SharedShape::cuboid(size.x / 2.0, size.y / 2.0))
    }

    pub fn circle(radius: Real) -> Self {
        Self::from_shape(SharedShape::ball(radius))
    }

    /// Upright capsule fitting inside `size`
    pub fn capsule(size: Vec2) -> Self {
        let radius = size.x / 2.0;
        let half_segment = (size.y / 2.0 - radius).max(0.0);
        Self::from_shape(SharedShape::capsule_y(half_segment, radius))
    }

    /// Layer and filter; trigger layers become sensors
    pub fn layer(mut self, layer: CollisionGroups) -> Self {
        self.inner = self
            .inner
            .collision_groups(layer.to_interaction_groups())
            .sensor(layer.is_trigger());
        self
    }

    pub fn friction(mut self, friction: Real) -> Self {
        self.inner = self.inner.friction(friction);
        self
    }

    pub fn build(self) -> Collider {
        self.inner.build()
    }
}

/// Bodies and colliders for the player and level pieces
pub mod presets {
    use super::*;

    pub fn player_body(position: Vec2) -> RigidBody {
        BodyBuilder::dynamic()
            .at(position)
            .upright()
            .always_awake()
            .ccd(true)
            .build()
    }

    /// Frictionless so the player never sticks to walls
    pub fn player_collider(size: Vec2) -> Collider {
        ColliderBuilder2D::capsule(size)
            .layer(CollisionGroups::Player)
            .friction(0.0)
            .build()
    }

    pub fn static_body(position: Vec2) -> RigidBody {
        BodyBuilder::fixed().at(position).build()
    }

    pub fn platform_collider(size: Vec2) -> Collider {
        ColliderBuilder2D::rectangle(size)
            .layer(CollisionGroups::Platform)
            .friction(0.3)
            .build()
    }

    /// Box sensor for ladders, water, hazards and checkpoints
    pub fn trigger_collider(layer: CollisionGroups, size: Vec2) -> Collider {
        ColliderBuilder2D::rectangle(size).layer(layer).build()
    }

    pub fn grapple_anchor_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .layer(CollisionGroups::Grapple)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_placed() {
        let body = BodyBuilder::dynamic().at(Vec2::new(10.0, 20.0)).build();
        assert!(body.is_dynamic());
        assert_eq!(*body.translation(), vector![10.0, 20.0]);
    }

    #[test]
    fn test_player_stays_upright_and_slides() {
        let body = presets::player_body(Vec2::ZERO);
        let collider = presets::player_collider(Vec2::new(0.8, 1.6));

        assert!(body.is_rotation_locked());
        assert!(body.is_ccd_enabled());
        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(
            collider.collision_groups(),
            CollisionGroups::Player.to_interaction_groups()
        );
    }

    #[test]
    fn test_capsule_never_goes_negative() {
        let squat = presets::player_collider(Vec2::new(2.0, 1.0));
        let capsule = squat.shape().as_capsule().map(|c| c.half_height());
        assert_eq!(capsule, Some(0.0));
    }

    #[test]
    fn test_trigger_layers_are_sensors() {
        for layer in [
            CollisionGroups::Ladder,
            CollisionGroups::Water,
            CollisionGroups::Hazard,
            CollisionGroups::Checkpoint,
        ] {
            assert!(presets::trigger_collider(layer, Vec2::ONE).is_sensor());
        }
        assert!(presets::grapple_anchor_collider(0.3).is_sensor());
        assert!(!presets::platform_collider(Vec2::new(4.0, 1.0)).is_sensor());
    }
}
