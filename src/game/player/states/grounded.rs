// Idle and Run

use super::{environment_override, PlayerContext};
use crate::game::player::context::VELOCITY_TOLERANCE;
use crate::game::player::state::{PlayerState, StateId};

/// Standing still on ground
#[derive(Debug, Default)]
pub struct IdleState;

impl PlayerState for IdleState {
    fn id(&self) -> StateId {
        StateId::Idle
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.stop();
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        let swim_target = if ctx.has_movement_input() {
            StateId::SwimRun
        } else {
            StateId::SwimIdle
        };
        if let Some(target) = environment_override(ctx, swim_target) {
            return Some(target);
        }
        if ctx.is_grounded() && ctx.consume_jump() {
            return Some(StateId::Jump);
        }
        if ctx.consume_interact() {
            return Some(StateId::Interact);
        }
        if ctx.has_horizontal_input() {
            return Some(StateId::Run);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        ctx.move_horizontal(0.0);
        (!ctx.is_grounded() && ctx.vertical_velocity() <= 0.0).then_some(StateId::Fall)
    }
}

/// Moving horizontally on ground
#[derive(Debug, Default)]
pub struct RunState;

impl PlayerState for RunState {
    fn id(&self) -> StateId {
        StateId::Run
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if let Some(target) = environment_override(ctx, StateId::SwimRun) {
            return Some(target);
        }
        if ctx.is_grounded() && ctx.consume_jump() {
            return Some(StateId::Jump);
        }
        if ctx.consume_interact() {
            return Some(StateId::Interact);
        }
        if !ctx.has_horizontal_input() {
            return Some(StateId::Idle);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        let horizontal = ctx.horizontal();
        ctx.move_horizontal(horizontal);
        (!ctx.is_grounded() && ctx.vertical_velocity() <= 0.0).then_some(StateId::Fall)
    }
}

/// Grounded check used after landing: touching ground and not still rising
/// out of a bounce
pub(super) fn has_landed(ctx: &PlayerContext<'_>) -> bool {
    ctx.is_grounded() && ctx.vertical_velocity() >= -VELOCITY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::body::PlayerBody;
    use crate::game::player::commands::LatchedInput;
    use crate::game::player::testing::{test_runtime, TestBody};
    use crate::game::player::FormKind;
    use glam::Vec2;

    #[test]
    fn test_idle_priority_swim_before_ladder_before_jump() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.form = FormKind::Fish;
        rt.sensors.in_water = true;
        rt.sensors.touching_ladder = true;
        rt.set_axes(0.0, 1.0);
        rt.latch.push(LatchedInput::Jump);
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(IdleState.handle_input(&mut ctx), Some(StateId::SwimRun));

        ctx.rt.sensors.in_water = false;
        assert_eq!(IdleState.handle_input(&mut ctx), Some(StateId::OnLadder));

        ctx.rt.sensors.touching_ladder = false;
        assert_eq!(IdleState.handle_input(&mut ctx), Some(StateId::Jump));
        assert!(!ctx.rt.latch.has(LatchedInput::Jump));
    }

    #[test]
    fn test_non_swimming_form_ignores_water() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.sensors.in_water = true;
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(IdleState.handle_input(&mut ctx), None);
    }

    #[test]
    fn test_airborne_jump_stays_latched() {
        let mut body = TestBody::airborne();
        let mut rt = test_runtime();
        rt.sensors.grounded = false;
        rt.latch.push(LatchedInput::Jump);
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(IdleState.handle_input(&mut ctx), None);
        assert!(ctx.rt.latch.has(LatchedInput::Jump));
    }

    #[test]
    fn test_idle_to_run_and_back() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.sensors.grounded = true;
        rt.set_axes(0.5, 0.0);
        let mut ctx = PlayerContext::new(&mut body, &mut rt);
        assert_eq!(IdleState.handle_input(&mut ctx), Some(StateId::Run));

        ctx.rt.set_axes(0.005, 0.0);
        assert_eq!(RunState.handle_input(&mut ctx), Some(StateId::Idle));
    }

    #[test]
    fn test_run_moves_and_falls_off_ledge() {
        let mut body = TestBody::default();
        let mut rt = test_runtime();
        rt.set_axes(1.0, 0.0);
        rt.sensors.grounded = true;
        let speed = rt.locomotion.move_speed;
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(RunState.logic_update(&mut ctx, 0.016), None);
        assert_eq!(ctx.body.velocity().x, speed);

        ctx.rt.sensors.grounded = false;
        assert_eq!(RunState.logic_update(&mut ctx, 0.016), Some(StateId::Fall));
    }

    #[test]
    fn test_idle_and_run_fall_at_zero_vertical_speed() {
        let mut body = TestBody::airborne();
        let mut rt = test_runtime();
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        assert_eq!(IdleState.logic_update(&mut ctx, 0.016), Some(StateId::Fall));
        assert_eq!(RunState.logic_update(&mut ctx, 0.016), Some(StateId::Fall));

        ctx.body.set_velocity(Vec2::new(0.0, 1.0));
        assert_eq!(IdleState.logic_update(&mut ctx, 0.016), None);
        assert_eq!(RunState.logic_update(&mut ctx, 0.016), None);
    }

    #[test]
    fn test_idle_entry_stops_horizontal_motion() {
        let mut body = TestBody::default();
        body.velocity = Vec2::new(3.0, 1.0);
        let mut rt = test_runtime();
        let mut ctx = PlayerContext::new(&mut body, &mut rt);

        IdleState.enter(&mut ctx);

        assert_eq!(ctx.body.velocity(), Vec2::new(0.0, 1.0));
    }
}
