use super::PlayerContext;
use crate::game::player::state::{PlayerState, StateId};

/// Climbing a ladder with gravity switched off
#[derive(Debug, Default)]
pub struct OnLadderState;

impl PlayerState for OnLadderState {
    fn id(&self) -> StateId {
        StateId::OnLadder
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.set_gravity_fraction(0.0);
        let vertical = ctx.vertical();
        ctx.climb(vertical);
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if ctx.consume_jump() {
            ctx.restore_form_gravity();
            ctx.jump_off_ladder();
            return Some(StateId::Fall);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        if !ctx.touching_ladder() {
            return Some(if ctx.is_grounded() {
                StateId::Idle
            } else {
                StateId::Fall
            });
        }
        let vertical = ctx.vertical();
        ctx.climb(vertical);
        None
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.restore_form_gravity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::body::PlayerBody;
    use crate::game::player::commands::LatchedInput;
    use crate::game::player::testing::{test_runtime, TestBody};
    use approx::assert_relative_eq;

    #[test]
    fn test_ladder_disables_gravity_until_exit() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.sensors.touching_ladder = true;
        rt.set_axes(0.0, 1.0);
        let climb_speed = rt.locomotion.ladder.climb_speed;
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        let mut state = OnLadderState;
        state.enter(&mut ctx);
        assert_eq!(ctx.body.gravity_scale(), 0.0);

        assert_eq!(state.logic_update(&mut ctx, 0.016), None);
        assert_relative_eq!(ctx.vertical_velocity(), climb_speed);

        state.exit(&mut ctx);
        assert_relative_eq!(ctx.body.gravity_scale(), ctx.rt.form_gravity_scale);
    }

    #[test]
    fn test_jump_off_ladder() {
        let mut body = TestBody::airborne();
        let mut rt = test_runtime();
        rt.latch.push(LatchedInput::Jump);
        let jump_force = rt.locomotion.ladder.ladder_jump_force;
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        let mut state = OnLadderState;
        state.enter(&mut ctx);

        assert_eq!(state.handle_input(&mut ctx), Some(StateId::Fall));
        assert_relative_eq!(ctx.vertical_velocity(), jump_force);
        assert_relative_eq!(ctx.body.gravity_scale(), 1.0);
    }

    #[test]
    fn test_leaving_ladder_depends_on_ground() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.sensors.grounded = true;
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(OnLadderState.logic_update(&mut ctx, 0.016), Some(StateId::Idle));

        ctx.rt.sensors.grounded = false;
        assert_eq!(OnLadderState.logic_update(&mut ctx, 0.016), Some(StateId::Fall));
    }
}
