use std::sync::Mutex;

use rapier2d::prelude::*;

/// Collision layers of the level
///
/// Everything except the player and platforms is a sensor: it reports
/// overlaps but never pushes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionGroups {
    /// Interacts with everything
    Default = 0b0000_0001,

    Player = 0b0000_0010,

    /// Solid ground and walls
    Platform = 0b0000_0100,

    Ladder = 0b0000_1000,

    Water = 0b0001_0000,

    /// Points the rope can attach to
    Grapple = 0b0010_0000,

    /// Spikes and the like
    Hazard = 0b0100_0000,

    /// Respawn points
    Checkpoint = 0b1000_0000,
}

impl CollisionGroups {
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Whether colliders of this layer are sensors
    pub fn is_trigger(self) -> bool {
        !matches!(self, Self::Default | Self::Player | Self::Platform)
    }

    pub fn to_interaction_groups(self) -> InteractionGroups {
        let filter = match self {
            // The player touches the ground and every trigger it should
            // hear about. Grapple anchors are only ever raycast.
            CollisionGroups::Player => {
                Self::Platform.group()
                    | Self::Ladder.group()
                    | Self::Water.group()
                    | Self::Hazard.group()
                    | Self::Checkpoint.group()
            }

            CollisionGroups::Platform => Self::Player.group() | Self::Platform.group(),

            CollisionGroups::Ladder
            | CollisionGroups::Water
            | CollisionGroups::Grapple
            | CollisionGroups::Hazard
            | CollisionGroups::Checkpoint => Self::Player.group(),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(self.group(), filter)
    }

    /// Groups for a query made on behalf of the player that only sees `self`
    pub fn player_query(self) -> InteractionGroups {
        InteractionGroups::new(Self::Player.group(), self.group())
    }
}

/// Overlap start/stop reported by a physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
}

impl CollisionEvent {
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            Self::Started {
                collider1,
                collider2,
                ..
            }
            | Self::Stopped {
                collider1,
                collider2,
                ..
            } => (collider1, collider2),
        }
    }

    /// The collider paired with `collider`, if it is part of this event
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        match self.colliders() {
            (a, b) if a == collider => Some(b),
            (a, b) if b == collider => Some(a),
            _ => None,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Collects events across physics steps until drained
#[derive(Debug, Default)]
pub struct CollisionEventQueue {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every event collected so far
    pub fn drain(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let sensor = event.sensor();
        self.push(match event {
            rapier2d::prelude::CollisionEvent::Started(collider1, collider2, _) => {
                CollisionEvent::Started {
                    collider1,
                    collider2,
                    sensor,
                }
            }
            rapier2d::prelude::CollisionEvent::Stopped(collider1, collider2, _) => {
                CollisionEvent::Stopped {
                    collider1,
                    collider2,
                    sensor,
                }
            }
        });
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
