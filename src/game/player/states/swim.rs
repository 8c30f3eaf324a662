// Swimming states for aquatic forms
//
// Both states run with a reduced gravity scale taken from the form's swim
// settings. A jump press is a stroke upward, not a transition.

use super::PlayerContext;
use crate::game::player::state::{PlayerState, StateId};

fn enter_water(ctx: &mut PlayerContext<'_>) {
    let fraction = ctx.rt.swim_settings().gravity_fraction;
    ctx.set_gravity_fraction(fraction);
}

/// Floating in place
#[derive(Debug, Default)]
pub struct SwimIdleState;

impl PlayerState for SwimIdleState {
    fn id(&self) -> StateId {
        StateId::SwimIdle
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        enter_water(ctx);
        ctx.stop();
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if !ctx.in_water() {
            return Some(StateId::Idle);
        }
        if ctx.consume_jump() {
            ctx.swim_up();
        }
        if ctx.consume_interact() {
            return Some(StateId::Interact);
        }
        ctx.has_movement_input().then_some(StateId::SwimRun)
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, dt: f32) -> Option<StateId> {
        ctx.stop();
        ctx.apply_swim_drag(dt);
        None
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.restore_form_gravity();
    }
}

/// Swimming with input on either axis
#[derive(Debug, Default)]
pub struct SwimRunState;

impl PlayerState for SwimRunState {
    fn id(&self) -> StateId {
        StateId::SwimRun
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        enter_water(ctx);
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if !ctx.in_water() {
            return Some(StateId::Run);
        }
        if ctx.consume_jump() {
            ctx.swim_up();
        }
        if ctx.consume_interact() {
            return Some(StateId::Interact);
        }
        (!ctx.has_movement_input()).then_some(StateId::SwimIdle)
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        let (horizontal, vertical) = (ctx.horizontal(), ctx.vertical());
        ctx.swim(horizontal, vertical);
        None
    }

    fn exit(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.restore_form_gravity();
    }
}
