// Player state machine
//
// States are behaviour objects owned by per-form bundles. The machine only
// remembers which one is current (`StateRef`) and resolves it through a
// `StateStore` on every call, so the controller can hand out the body and the
// runtime alongside it without shared ownership.

use std::fmt;

use log::debug;

use super::context::PlayerContext;
use super::form::FormKind;

/// Abstract state identifiers shared by every form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateId {
    /// Standing still on ground
    Idle,
    /// Moving horizontally on ground
    Run,
    /// Rising after a jump impulse
    Jump,
    /// Airborne and descending
    Fall,
    /// Locked in place while an interaction fires
    Interact,
    /// Rising after a charged jump
    SuperJump,
    /// Hanging from a grapple rope
    Swing,
    /// Climbing a ladder, gravity off
    OnLadder,
    /// Floating in water
    SwimIdle,
    /// Moving in water
    SwimRun,
    /// Low gravity jump replacement
    Flight,
    /// Control suspended until revive
    Dead,
}

impl StateId {
    pub const ALL: [StateId; 12] = [
        StateId::Idle,
        StateId::Run,
        StateId::Jump,
        StateId::Fall,
        StateId::Interact,
        StateId::SuperJump,
        StateId::Swing,
        StateId::OnLadder,
        StateId::SwimIdle,
        StateId::SwimRun,
        StateId::Flight,
        StateId::Dead,
    ];

    /// Whether the state writes its own gravity scale while active
    pub fn overrides_gravity(&self) -> bool {
        matches!(
            self,
            Self::OnLadder | Self::SwimIdle | Self::SwimRun | Self::Dead
        )
    }

    /// Whether the state is one of the two grounded locomotion states
    pub fn is_grounded_locomotion(&self) -> bool {
        matches!(self, Self::Idle | Self::Run)
    }

    pub fn is_swimming(&self) -> bool {
        matches!(self, Self::SwimIdle | Self::SwimRun)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Interact => "interact",
            Self::SuperJump => "super_jump",
            Self::Swing => "swing",
            Self::OnLadder => "ladder",
            Self::SwimIdle => "swim_idle",
            Self::SwimRun => "swim",
            Self::Flight => "flight",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.animation_name())
    }
}

/// A behaviour the player can be in
///
/// `handle_input` and `logic_update` return the id of the state they want to
/// move to; the controller decides whether that id is bound for the active form.
pub trait PlayerState {
    fn id(&self) -> StateId;

    /// One-time setup when the state becomes current
    fn enter(&mut self, _ctx: &mut PlayerContext<'_>) {}

    /// Evaluate latched inputs and sensors in priority order
    fn handle_input(&mut self, _ctx: &mut PlayerContext<'_>) -> Option<StateId> {
        None
    }

    /// Continuous behaviour for one logic tick
    fn logic_update(&mut self, _ctx: &mut PlayerContext<'_>, _dt: f32) -> Option<StateId> {
        None
    }

    /// Runs before every fixed physics step
    fn physics_update(&mut self, _ctx: &mut PlayerContext<'_>, _dt: f32) {}

    /// Teardown when the state stops being current
    fn exit(&mut self, _ctx: &mut PlayerContext<'_>) {}
}

/// Identity of a concrete state instance: the bundle's form plus the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateRef {
    pub form: FormKind,
    pub slot: usize,
}

impl StateRef {
    pub fn new(form: FormKind, slot: usize) -> Self {
        Self { form, slot }
    }
}

/// Where state instances live
pub trait StateStore {
    fn state_mut(&mut self, state: StateRef) -> Option<&mut dyn PlayerState>;
}

/// Holds exactly one current state once initialized
#[derive(Debug, Default)]
pub struct PlayerStateMachine {
    current: Option<StateRef>,
    current_id: Option<StateId>,
    previous_id: Option<StateId>,
    state_time: f32,
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<StateRef> {
        self.current
    }

    /// Get the current state's id
    pub fn current_id(&self) -> Option<StateId> {
        self.current_id
    }

    /// Get the previous state's id
    pub fn previous_id(&self) -> Option<StateId> {
        self.previous_id
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// First entry: Enter the target with no Exit. Returns false if the
    /// target is not in the store.
    pub fn initialize(
        &mut self,
        target: StateRef,
        store: &mut dyn StateStore,
        ctx: &mut PlayerContext<'_>,
    ) -> bool {
        let Some(state) = store.state_mut(target) else {
            return false;
        };
        state.enter(ctx);
        self.current = Some(target);
        self.current_id = Some(state.id());
        self.state_time = 0.0;
        debug!("state machine initialized in {}", state.id());
        true
    }

    /// Exit the current state, swap, then Enter the target.
    /// No-op when the target is absent, equal to the current state, or unknown
    /// to the store.
    pub fn change_state(
        &mut self,
        target: Option<StateRef>,
        store: &mut dyn StateStore,
        ctx: &mut PlayerContext<'_>,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };
        if self.current == Some(target) {
            return false;
        }
        if store.state_mut(target).is_none() {
            return false;
        }
        let Some(current) = self.current else {
            return self.initialize(target, store, ctx);
        };

        if let Some(state) = store.state_mut(current) {
            state.exit(ctx);
        }

        let Some(next) = store.state_mut(target) else {
            return false;
        };
        self.previous_id = self.current_id;
        self.current = Some(target);
        self.current_id = Some(next.id());
        self.state_time = 0.0;
        next.enter(ctx);
        true
    }

    pub fn handle_input(
        &mut self,
        store: &mut dyn StateStore,
        ctx: &mut PlayerContext<'_>,
    ) -> Option<StateId> {
        let state = store.state_mut(self.current?)?;
        state.handle_input(ctx)
    }

    pub fn logic_update(
        &mut self,
        store: &mut dyn StateStore,
        ctx: &mut PlayerContext<'_>,
        dt: f32,
    ) -> Option<StateId> {
        let state = store.state_mut(self.current?)?;
        self.state_time += dt;
        state.logic_update(ctx, dt)
    }

    pub fn physics_update(
        &mut self,
        store: &mut dyn StateStore,
        ctx: &mut PlayerContext<'_>,
        dt: f32,
    ) {
        if let Some(state) = self.current.and_then(|current| store.state_mut(current)) {
            state.physics_update(ctx, dt);
        }
    }
}
