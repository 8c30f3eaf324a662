// The physical body port and the locomotion actuator that drives it
//
// The physics engine lives behind `PlayerBody`. The core never resolves
// collisions: it writes velocities and impulses, and reads back positions,
// velocities and three sensor booleans.

use glam::Vec2;

use super::form::{MovementAdjustment, MovementProfile, SwimSettings};
use super::settings::LadderSettings;

/// Floor applied to every jump multiplier so a jump is never forceless
pub const MIN_JUMP_MULTIPLIER: f32 = 0.1;

/// Environmental sensors sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorReadings {
    pub grounded: bool,
    pub touching_ladder: bool,
    pub in_water: bool,
}

impl SensorReadings {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }
}

/// The physics collaborator's view of the player's rigid body
pub trait PlayerBody {
    fn position(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    fn set_velocity(&mut self, velocity: Vec2);

    /// Instantaneous change of momentum
    fn apply_impulse(&mut self, impulse: Vec2);

    fn mass(&self) -> f32;

    fn gravity_scale(&self) -> f32;

    fn set_gravity_scale(&mut self, scale: f32);

    /// Move to `position`, keeping the velocity
    fn set_position(&mut self, position: Vec2);

    /// Move to `position` and zero the velocity
    fn teleport(&mut self, position: Vec2) {
        self.set_position(position);
        self.set_velocity(Vec2::ZERO);
    }

    /// Ground, ladder and water sensors at the body's current position
    fn sense(&self) -> SensorReadings;

    /// First grapple anchor hit along `direction`, if any, within `max_distance`
    fn cast_grapple(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<Vec2>;
}

/// Turns normalized intents into velocity and impulse writes.
/// Knows nothing about states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    pub move_speed: f32,
    pub jump_force: f32,
    pub ladder: LadderSettings,
    pub swim: SwimSettings,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::from_profile(&MovementProfile::default(), MovementAdjustment::IDENTITY)
    }
}

impl Locomotion {
    pub fn from_profile(profile: &MovementProfile, adjustment: MovementAdjustment) -> Self {
        let mut locomotion = Self {
            move_speed: profile.move_speed,
            jump_force: profile.jump_force,
            ladder: LadderSettings::default(),
            swim: SwimSettings::default(),
        };
        locomotion.apply_profile(profile, adjustment);
        locomotion
    }

    /// Overwrite speed and jump force from a profile scaled by a factory adjustment
    pub fn apply_profile(&mut self, profile: &MovementProfile, adjustment: MovementAdjustment) {
        self.move_speed = profile.move_speed * adjustment.move_multiplier.max(0.1);
        self.jump_force = profile.jump_force * adjustment.jump_multiplier.max(0.1);
    }

    /// Set horizontal velocity from input in [-1, 1], keeping vertical velocity
    pub fn move_horizontal(&self, body: &mut dyn PlayerBody, input: f32) {
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(input.clamp(-1.0, 1.0) * self.move_speed, velocity.y));
    }

    /// Zero horizontal velocity
    pub fn stop(&self, body: &mut dyn PlayerBody) {
        self.move_horizontal(body, 0.0);
    }

    /// Cancel vertical velocity, then kick upward with `jump_force * multiplier`
    pub fn jump(&self, body: &mut dyn PlayerBody, multiplier: f32) {
        self.vertical_impulse(body, self.jump_force * multiplier.max(MIN_JUMP_MULTIPLIER));
    }

    /// Climb a ladder: vertical input only, horizontal motion stops
    pub fn climb(&self, body: &mut dyn PlayerBody, vertical: f32) {
        body.set_velocity(Vec2::new(
            0.0,
            vertical.clamp(-1.0, 1.0) * self.ladder.climb_speed,
        ));
    }

    pub fn jump_off_ladder(&self, body: &mut dyn PlayerBody) {
        self.vertical_impulse(body, self.ladder.ladder_jump_force);
    }

    /// Free movement on both axes while swimming. Without vertical input the
    /// current vertical velocity (a stroke, or sinking) is kept.
    pub fn swim(&self, body: &mut dyn PlayerBody, horizontal: f32, vertical: f32) {
        let velocity = body.velocity();
        let vy = if vertical == 0.0 {
            velocity.y
        } else {
            vertical.clamp(-1.0, 1.0) * self.swim.swim_speed
        };
        body.set_velocity(Vec2::new(
            horizontal.clamp(-1.0, 1.0) * self.swim.swim_speed,
            vy,
        ));
    }

    /// Upward stroke in water
    pub fn swim_stroke(&self, body: &mut dyn PlayerBody) {
        self.vertical_impulse(body, self.jump_force * self.swim.stroke_fraction);
    }

    /// Damp vertical drift while idling in water
    pub fn swim_drag(&self, body: &mut dyn PlayerBody, dt: f32) {
        let velocity = body.velocity();
        let damping = (1.0 - self.swim.drag * dt).max(0.0);
        body.set_velocity(Vec2::new(velocity.x, velocity.y * damping));
    }

    fn vertical_impulse(&self, body: &mut dyn PlayerBody, strength: f32) {
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(velocity.x, 0.0));
        body.apply_impulse(Vec2::new(0.0, strength));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::testing::TestBody;
    use approx::assert_relative_eq;

    #[test]
    fn test_move_keeps_vertical_velocity() {
        let locomotion = Locomotion::default();
        let mut body = TestBody::default();
        body.velocity = Vec2::new(0.0, -3.0);

        locomotion.move_horizontal(&mut body, 0.5);

        assert_relative_eq!(body.velocity.x, 0.5 * locomotion.move_speed);
        assert_relative_eq!(body.velocity.y, -3.0);
    }

    #[test]
    fn test_move_clamps_input() {
        let locomotion = Locomotion::default();
        let mut body = TestBody::default();
        locomotion.move_horizontal(&mut body, 4.0);
        assert_relative_eq!(body.velocity.x, locomotion.move_speed);
    }

    #[test]
    fn test_jump_resets_fall_speed_before_impulse() {
        let locomotion = Locomotion::default();
        let mut body = TestBody::default();
        body.velocity = Vec2::new(1.0, -7.0);

        locomotion.jump(&mut body, 1.0);

        assert_relative_eq!(body.velocity.y, locomotion.jump_force);
        assert_relative_eq!(body.velocity.x, 1.0);
    }

    #[test]
    fn test_jump_multiplier_is_floored() {
        let locomotion = Locomotion::default();
        let mut body = TestBody::default();
        locomotion.jump(&mut body, 0.0);
        assert_relative_eq!(body.velocity.y, locomotion.jump_force * MIN_JUMP_MULTIPLIER);
    }

    #[test]
    fn test_adjustment_scales_profile() {
        let profile = MovementProfile {
            move_speed: 10.0,
            jump_force: 20.0,
            gravity_multiplier: 1.0,
        };
        let locomotion =
            Locomotion::from_profile(&profile, MovementAdjustment::new(0.5, 1.5, 1.0));
        assert_relative_eq!(locomotion.move_speed, 5.0);
        assert_relative_eq!(locomotion.jump_force, 30.0);
    }

    #[test]
    fn test_climb_stops_horizontal_motion() {
        let locomotion = Locomotion::default();
        let mut body = TestBody::default();
        body.velocity = Vec2::new(4.0, 0.0);

        locomotion.climb(&mut body, 1.0);

        assert_eq!(body.velocity.x, 0.0);
        assert_relative_eq!(body.velocity.y, locomotion.ladder.climb_speed);
    }

    #[test]
    fn test_swim_drag_damps_vertical_only() {
        let locomotion = Locomotion::default();
        let mut body = TestBody::default();
        body.velocity = Vec2::new(2.0, -2.0);

        locomotion.swim_drag(&mut body, 0.1);

        assert_eq!(body.velocity.x, 2.0);
        assert!(body.velocity.y > -2.0 && body.velocity.y < 0.0);
    }
}
