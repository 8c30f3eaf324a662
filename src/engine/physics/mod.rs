// Physics system using rapier2d

pub mod body;
mod collision;
mod player_body;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionEventQueue, CollisionGroups};
pub use player_body::{PlayerRig, RapierPlayerBody};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{point, vector, Collider, Real, RigidBody};
