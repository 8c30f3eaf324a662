use super::{grounded_target, PlayerContext};
use crate::game::player::state::{PlayerState, StateId};

/// Holds the player in place while an interaction fires
#[derive(Debug, Default)]
pub struct InteractState {
    /// Seconds left before control returns; only meaningful between Enter and Exit
    lock_remaining: f32,
}

impl InteractState {
    fn fire(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.perform_interaction();
        self.lock_remaining = ctx.interaction_lock();
    }
}

impl PlayerState for InteractState {
    fn id(&self) -> StateId {
        StateId::Interact
    }

    fn enter(&mut self, ctx: &mut PlayerContext<'_>) {
        ctx.stop();
        self.fire(ctx);
    }

    fn handle_input(&mut self, ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        if ctx.is_grounded() && ctx.consume_jump() {
            return Some(StateId::Jump);
        }
        if ctx.consume_interact() {
            self.fire(ctx);
        }
        None
    }

    fn logic_update(&mut self, ctx: &mut PlayerContext<'_>, dt: f32) -> Option<StateId> {
        ctx.stop();
        self.lock_remaining -= dt;
        (self.lock_remaining <= 0.0).then(|| grounded_target(ctx))
    }

    fn exit(&mut self, _ctx: &mut PlayerContext<'_>) {
        self.lock_remaining = 0.0;
    }
}
