use super::PlayerContext;
use crate::game::player::state::{PlayerState, StateId};

/// Control suspended. No transitions out; only the controller's revive leaves.
#[derive(Debug, Default)]
pub struct DeadState;

impl PlayerState for DeadState {
    fn id(&self) -> StateId {
        StateId::Dead
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.zero_input();
        ctx.stop();
        ctx.set_gravity_fraction(1.0);
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        ctx.stop();
        None
    }
}
