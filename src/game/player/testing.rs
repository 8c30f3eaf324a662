// Test doubles for the player core

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;

use super::body::{PlayerBody, SensorReadings};
use super::context::{PlayerContext, PlayerRuntime};
use super::presentation::{Interactor, PresentationBinder, PresentationDescriptor};
use super::settings::PlayerSettings;

/// Point mass with hand-set sensors
#[derive(Debug, Clone)]
pub struct TestBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub mass: f32,
    pub sensors: SensorReadings,
    pub grapple_anchor: Option<Vec2>,
    pub impulses: usize,
}

impl Default for TestBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            mass: 1.0,
            sensors: SensorReadings::grounded(),
            grapple_anchor: None,
            impulses: 0,
        }
    }
}

impl TestBody {
    pub fn airborne() -> Self {
        Self {
            sensors: SensorReadings::airborne(),
            ..Default::default()
        }
    }

    /// Integrate gravity and velocity over `dt`
    pub fn integrate(&mut self, dt: f32) {
        self.velocity.y -= 9.81 * self.gravity_scale * dt;
        self.position += self.velocity * dt;
    }
}

impl PlayerBody for TestBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
        self.impulses += 1;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn sense(&self) -> SensorReadings {
        self.sensors
    }

    fn cast_grapple(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<Vec2> {
        let anchor = self.grapple_anchor?;
        let along = (anchor - origin).dot(direction);
        (along > 0.0 && origin.distance(anchor) <= max_distance).then_some(anchor)
    }
}

/// Runtime with default settings and no interactor
pub fn test_runtime() -> PlayerRuntime {
    PlayerRuntime::new(
        Arc::new(PlayerSettings::default()),
        Box::new(CountingInteractor::default()),
    )
}

/// Run `f` with a context over a fresh default runtime
pub fn with_context<R>(body: &mut TestBody, f: impl FnOnce(&mut PlayerContext<'_>) -> R) -> R {
    let mut rt = test_runtime();
    let mut ctx = PlayerContext::new(body, &mut rt);
    f(&mut ctx)
}

/// Records every presentation call; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    pub calls: Rc<RefCell<Vec<(String, bool)>>>,
}

impl RecordingPresentation {
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last(&self) -> Option<(String, bool)> {
        self.calls.borrow().last().cloned()
    }
}

impl PresentationBinder for RecordingPresentation {
    fn apply_presentation(&mut self, descriptor: &PresentationDescriptor, play_effect: bool) {
        self.calls
            .borrow_mut()
            .push((descriptor.sprite.clone(), play_effect));
    }
}

/// Counts interactions; clones share the counter
#[derive(Debug, Clone, Default)]
pub struct CountingInteractor {
    pub count: Rc<RefCell<usize>>,
}

impl CountingInteractor {
    pub fn count(&self) -> usize {
        *self.count.borrow()
    }
}

impl Interactor for CountingInteractor {
    fn try_interact(&mut self, _position: Vec2) -> bool {
        *self.count.borrow_mut() += 1;
        true
    }
}
