// Airborne states: Jump, SuperJump, Flight rise; Fall descends

use super::grounded::has_landed;
use super::{grounded_target, PlayerContext};
use crate::game::player::state::{PlayerState, StateId};

/// Steer while rising; hand over to Fall at the apex
fn rise(ctx: &mut PlayerContext<'_>) -> Option<StateId> {
    let horizontal = ctx.horizontal();
    ctx.move_horizontal(horizontal);
    (ctx.vertical_velocity() <= 0.0).then_some(StateId::Fall)
}

/// Rising after a jump impulse
#[derive(Debug, Default)]
pub struct JumpState;

impl PlayerState for JumpState {
    fn id(&self) -> StateId {
        StateId::Jump
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        let multiplier = ctx.take_jump_multiplier();
        ctx.execute_jump(multiplier);
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if ctx.wants_ladder() {
            return Some(StateId::OnLadder);
        }
        if ctx.consume_interact() {
            return Some(StateId::Interact);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        rise(ctx)
    }
}

/// Rising after a released charge
#[derive(Debug, Default)]
pub struct SuperJumpState;

impl PlayerState for SuperJumpState {
    fn id(&self) -> StateId {
        StateId::SuperJump
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        let multiplier = ctx.take_super_jump_multiplier();
        ctx.execute_jump(multiplier);
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        ctx.consume_interact().then_some(StateId::Interact)
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        rise(ctx)
    }
}

/// Jump replacement for gliding forms; the low gravity comes from the form
#[derive(Debug, Default)]
pub struct FlightState;

impl PlayerState for FlightState {
    fn id(&self) -> StateId {
        StateId::Flight
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        let multiplier = ctx.take_jump_multiplier();
        ctx.execute_jump(multiplier);
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        ctx.consume_interact().then_some(StateId::Interact)
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        rise(ctx)
    }
}

/// Airborne and descending
#[derive(Debug, Default)]
pub struct FallState;

impl PlayerState for FallState {
    fn id(&self) -> StateId {
        StateId::Fall
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if ctx.should_swim() {
            return Some(StateId::SwimIdle);
        }
        if ctx.wants_ladder() {
            return Some(StateId::OnLadder);
        }
        if ctx.consume_interact() {
            return Some(StateId::Interact);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        let horizontal = ctx.horizontal();
        ctx.move_horizontal(horizontal);
        has_landed(ctx).then(|| grounded_target(ctx))
    }
}
