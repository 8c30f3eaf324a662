// Presentation and interaction collaborators
//
// The core never renders or resolves interactions itself. It hands an opaque
// descriptor to whoever binds sprites, and asks an interactor to fire whatever
// is in reach.

use glam::Vec2;
use log::debug;

/// Opaque per-form/skin visual descriptor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresentationDescriptor {
    pub sprite: String,
    pub animator_override: Option<String>,
    pub switch_sfx: Option<String>,
    pub switch_vfx: Option<String>,
}

impl PresentationDescriptor {
    pub fn sprite(sprite: &str) -> Self {
        Self {
            sprite: sprite.to_string(),
            ..Default::default()
        }
    }

    pub fn with_switch_effects(mut self, sfx: &str, vfx: &str) -> Self {
        self.switch_sfx = Some(sfx.to_string());
        self.switch_vfx = Some(vfx.to_string());
        self
    }
}

/// Receives the active form's descriptor once per form or skin activation
pub trait PresentationBinder {
    /// `play_effect` is false for the very first activation of a session
    fn apply_presentation(&mut self, descriptor: &PresentationDescriptor, play_effect: bool);
}

/// Fires the interaction side effect for whatever is in range
pub trait Interactor {
    /// Returns whether something was interacted with
    fn try_interact(&mut self, position: Vec2) -> bool;
}

/// Binder that only logs
#[derive(Debug, Default)]
pub struct LogPresentation;

impl PresentationBinder for LogPresentation {
    fn apply_presentation(&mut self, descriptor: &PresentationDescriptor, play_effect: bool) {
        debug!(
            "presentation -> {} (effect: {})",
            descriptor.sprite, play_effect
        );
    }
}

/// Interactor with nothing in reach
#[derive(Debug, Default)]
pub struct NoInteractions;

impl Interactor for NoInteractions {
    fn try_interact(&mut self, _position: Vec2) -> bool {
        false
    }
}
