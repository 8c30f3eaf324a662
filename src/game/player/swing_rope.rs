// Grapple rope for the swing ability
//
// The rope is a distance limit around an anchor: the body may move inside
// the circle freely, and is projected back onto it when it drifts outside.

use glam::Vec2;

use super::body::PlayerBody;
use super::form::SwingSettings;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwingRope {
    settings: SwingSettings,
    anchor: Option<Vec2>,
    length: f32,
}

impl SwingRope {
    pub fn new(settings: SwingSettings) -> Self {
        Self {
            settings,
            anchor: None,
            length: 0.0,
        }
    }

    pub fn configure(&mut self, settings: SwingSettings) {
        self.settings = settings;
        self.length = self.clamp_length(self.length);
    }

    pub fn settings(&self) -> &SwingSettings {
        &self.settings
    }

    /// Launch direction for a rope shot: 45 degrees up on the facing side
    pub fn launch_direction(facing: f32) -> Vec2 {
        let side = if facing < 0.0 { -1.0 } else { 1.0 };
        Vec2::new(side, 1.0).normalize()
    }

    /// Attach to `anchor` with the current distance as rope length
    pub fn attach(&mut self, anchor: Vec2, position: Vec2) {
        self.anchor = Some(anchor);
        self.length = self.clamp_length(anchor.distance(position));
    }

    pub fn detach(&mut self) {
        self.anchor = None;
    }

    pub fn is_attached(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// One physics step: reel with vertical input, push with horizontal
    /// input, then enforce the rope length
    pub fn step(&mut self, body: &mut dyn PlayerBody, horizontal: f32, vertical: f32, dt: f32) {
        let Some(anchor) = self.anchor else {
            return;
        };

        // Up reels in, down lets out
        self.length = self.clamp_length(self.length - vertical * self.settings.climb_speed * dt);

        if horizontal != 0.0 {
            body.apply_impulse(Vec2::new(
                horizontal.clamp(-1.0, 1.0) * self.settings.swing_force * dt,
                0.0,
            ));
        }

        let offset = body.position() - anchor;
        let distance = offset.length();
        if distance <= self.length || distance <= f32::EPSILON {
            return;
        }

        let direction = offset / distance;
        body.set_position(anchor + direction * self.length);

        let velocity = body.velocity();
        let outward = velocity.dot(direction);
        if outward > 0.0 {
            body.set_velocity(velocity - direction * outward);
        }
    }

    fn clamp_length(&self, length: f32) -> f32 {
        let min = self.settings.min_length.max(0.0);
        length.clamp(min, self.settings.max_distance.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::testing::TestBody;
    use approx::assert_relative_eq;

    fn rope() -> SwingRope {
        SwingRope::new(SwingSettings::default())
    }

    #[test]
    fn test_launch_direction_is_diagonal() {
        let right = SwingRope::launch_direction(1.0);
        let left = SwingRope::launch_direction(-1.0);
        assert_relative_eq!(right.x, right.y);
        assert_relative_eq!(left.x, -left.y);
        assert_relative_eq!(right.length(), 1.0);
    }

    #[test]
    fn test_attach_measures_length() {
        let mut rope = rope();
        rope.attach(Vec2::new(0.0, 5.0), Vec2::new(3.0, 1.0));
        assert!(rope.is_attached());
        assert_relative_eq!(rope.length(), 5.0);
    }

    #[test]
    fn test_length_is_clamped() {
        let mut rope = rope();
        rope.attach(Vec2::ZERO, Vec2::new(0.1, 0.0));
        assert_relative_eq!(rope.length(), SwingSettings::default().min_length);
    }

    #[test]
    fn test_body_is_pulled_back_onto_rope() {
        let mut rope = rope();
        let anchor = Vec2::new(0.0, 4.0);
        rope.attach(anchor, Vec2::new(0.0, 0.0));

        let mut body = TestBody::default();
        body.position = Vec2::new(0.0, -1.0);
        body.velocity = Vec2::new(0.0, -5.0);

        rope.step(&mut body, 0.0, 0.0, 1.0 / 60.0);

        assert_relative_eq!(body.position.distance(anchor), 4.0, epsilon = 1e-4);
        assert_relative_eq!(body.velocity.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_reeling_in_shortens_rope() {
        let mut rope = rope();
        rope.attach(Vec2::new(0.0, 4.0), Vec2::ZERO);
        let mut body = TestBody::default();

        rope.step(&mut body, 0.0, 1.0, 0.5);

        assert_relative_eq!(rope.length(), 4.0 - SwingSettings::default().climb_speed * 0.5);
    }

    #[test]
    fn test_detached_rope_does_nothing() {
        let mut rope = rope();
        let mut body = TestBody::default();
        body.velocity = Vec2::new(1.0, -2.0);

        rope.step(&mut body, 1.0, 1.0, 0.1);

        assert_eq!(body.velocity, Vec2::new(1.0, -2.0));
    }
}
