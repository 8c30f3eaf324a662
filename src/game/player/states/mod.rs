// Concrete player states
//
// Every state is a small behaviour object. The only data a state keeps lives
// between its own Enter and Exit (the interact lock timer); everything that
// must survive a transition lives in the runtime.

mod airborne;
mod dead;
mod grounded;
mod interact;
mod ladder;
mod swim;
mod swing;

pub use airborne::{FallState, FlightState, JumpState, SuperJumpState};
pub use dead::DeadState;
pub use grounded::{IdleState, RunState};
pub use interact::InteractState;
pub use ladder::OnLadderState;
pub use swim::{SwimIdleState, SwimRunState};
pub use swing::SwingState;

use super::context::PlayerContext;
use super::state::StateId;

/// Sensor overrides shared by the grounded states: water first, then ladder
fn environment_override(ctx: &PlayerContext<'_>, swim_target: StateId) -> Option<StateId> {
    if ctx.should_swim() {
        return Some(swim_target);
    }
    if ctx.wants_ladder() {
        return Some(StateId::OnLadder);
    }
    None
}

/// Where to go after landing or finishing a grounded action
fn grounded_target(ctx: &PlayerContext<'_>) -> StateId {
    if ctx.has_horizontal_input() {
        StateId::Run
    } else {
        StateId::Idle
    }
}
