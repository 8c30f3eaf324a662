use super::PlayerContext;
use crate::game::player::context::{SWING_JUMP_MULTIPLIER, VELOCITY_TOLERANCE};
use crate::game::player::state::{PlayerState, StateId};

/// Hanging from the grapple rope. The controller attaches the rope before
/// entering; leaving always detaches it.
#[derive(Debug, Default)]
pub struct SwingState;

impl PlayerState for SwingState {
    fn id(&self) -> StateId {
        StateId::Swing
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if ctx.consume_jump() {
            ctx.set_jump_multiplier(SWING_JUMP_MULTIPLIER);
            return Some(StateId::Jump);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        if ctx.is_grounded() && ctx.vertical_velocity() <= VELOCITY_TOLERANCE {
            return Some(StateId::Idle);
        }
        (!ctx.rope_attached()).then_some(StateId::Fall)
    }

    fn physics_update(&mut self, ctx: &mut PlayerContext<'_>, dt: f32) {
        ctx.step_rope(dt);
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.detach_rope();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::commands::LatchedInput;
    use crate::game::player::testing::{test_runtime, TestBody};
    use glam::Vec2;

    #[test]
    fn test_jump_leaves_rope_with_reduced_multiplier() {
        let mut body = TestBody::airborne();
        let mut rt = test_runtime();
        rt.latch.push(LatchedInput::Jump);
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(SwingState.handle_input(&mut ctx), Some(StateId::Jump));
        assert_eq!(ctx.rt.pending_jump_multiplier, Some(SWING_JUMP_MULTIPLIER));
    }

    #[test]
    fn test_landing_ends_swing() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.sensors.grounded = true;
        rt.rope.attach(Vec2::new(0.0, 5.0), Vec2::ZERO);
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(SwingState.logic_update(&mut ctx, 0.016), Some(StateId::Idle));
    }

    #[test]
    fn test_lost_rope_falls() {
        let mut body = TestBody::airborne();
        let mut rt = test_runtime();
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(SwingState.logic_update(&mut ctx, 0.016), Some(StateId::Fall));
    }

    #[test]
    fn test_exit_detaches_rope() {
        let mut body = TestBody::airborne();
        let mut rt = test_runtime();
        rt.rope.attach(Vec2::new(0.0, 5.0), Vec2::ZERO);
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        SwingState.exit(&mut ctx);

        assert!(!ctx.rope_attached());
    }
}
