// Respawn scheduling: waits out the delay after a death, then puts the
// player back at the last checkpoint with full health.

use glam::Vec2;
use log::{debug, info};

use super::player::{PlayerBody, PlayerController};

/// Revives a dead player after a fixed delay
#[derive(Debug, Clone)]
pub struct RespawnDirector {
    respawn_point: Vec2,
    delay: f32,
    /// Seconds left until the revive; `None` while alive
    timer: Option<f32>,
}

impl RespawnDirector {
    pub fn new(respawn_point: Vec2, delay: f32) -> Self {
        Self {
            respawn_point,
            delay: delay.max(0.0),
            timer: None,
        }
    }

    /// Director using the controller's configured respawn delay
    pub fn for_controller(controller: &PlayerController, respawn_point: Vec2) -> Self {
        Self::new(respawn_point, controller.settings().lifecycle.respawn_delay)
    }

    /// Where the next respawn lands, e.g. after touching a checkpoint
    pub fn set_respawn_point(&mut self, point: Vec2) {
        if point != self.respawn_point {
            debug!("respawn point moved to {point}");
        }
        self.respawn_point = point;
    }

    pub fn respawn_point(&self) -> Vec2 {
        self.respawn_point
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Seconds until the pending revive, if one is scheduled
    pub fn remaining(&self) -> Option<f32> {
        self.timer
    }

    /// Poll once per logic tick. Returns true on the tick the player is revived.
    pub fn update(
        &mut self,
        controller: &mut PlayerController,
        body: &mut dyn PlayerBody,
        dt: f32,
    ) -> bool {
        if !controller.is_dead() {
            self.timer = None;
            return false;
        }

        let remaining = match self.timer {
            Some(remaining) => remaining - dt.max(0.0),
            None => {
                debug!("respawn in {:.2}s", self.delay);
                self.delay
            }
        };

        if remaining > 0.0 {
            self.timer = Some(remaining);
            return false;
        }

        self.timer = None;
        controller.teleport(body, self.respawn_point);
        controller.reset_health();
        let revived = controller.revive(body);
        if revived {
            info!("respawned at {}", self.respawn_point);
        }
        revived
    }

    /// Drop a pending respawn, e.g. when the level is reloaded
    pub fn cancel(&mut self) {
        self.timer = None;
    }
}
