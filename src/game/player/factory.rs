// Form factories and their registry
//
// One factory per form: it knows which states the form gets and how the
// form bends the shared movement numbers. The registry builds each factory on
// first request from an explicit constructor table and caches it.

use std::collections::HashMap;

use super::bundle::FormStateBundle;
use super::context::PlayerRuntime;
use super::form::{FormKind, MovementAdjustment};
use super::settings::FormSettings;
use super::state::StateId;
use super::states::{
    DeadState, FallState, FlightState, IdleState, InteractState, JumpState, OnLadderState,
    RunState, SuperJumpState, SwimIdleState, SwimRunState, SwingState,
};

/// Builds one form's states and pushes its settings on activation
pub trait FormFactory {
    fn kind(&self) -> FormKind;

    /// Full state map for this form, built once per session
    fn create_bundle(&self) -> FormStateBundle;

    /// Scaling layered on top of the form's movement profile
    fn movement_adjustment(&self) -> MovementAdjustment {
        MovementAdjustment::IDENTITY
    }

    /// Push profile and ability settings into the runtime, then the
    /// factory's own adjustment
    fn apply_form_settings(&self, skin: &FormSettings, rt: &mut PlayerRuntime) {
        rt.apply_form(self.kind(), skin, self.movement_adjustment());
    }
}

/// Add the climb and death states every form shares
fn with_shared_states(bundle: FormStateBundle) -> FormStateBundle {
    bundle
        .with(Box::new(OnLadderState))
        .with(Box::new(DeadState))
        .with_default(StateId::Idle)
}

/// Idle, Run, Fall and Interact: the grounded core without any jump
fn grounded_core(form: FormKind) -> FormStateBundle {
    FormStateBundle::new(form)
        .with(Box::new(IdleState))
        .with(Box::new(RunState))
        .with(Box::new(FallState))
        .with(Box::new(InteractState::default()))
}

/// Idle, Run, Jump, Fall and Interact, plus the shared ladder and death states
pub fn default_state_set(form: FormKind) -> FormStateBundle {
    with_shared_states(grounded_core(form).with(Box::new(JumpState)))
}

macro_rules! default_form_factory {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl FormFactory for $name {
            fn kind(&self) -> FormKind {
                $kind
            }

            fn create_bundle(&self) -> FormStateBundle {
                default_state_set(self.kind())
            }
        }
    };
}

default_form_factory!(NormalHeadFactory, FormKind::NormalHead);
default_form_factory!(VanguardFactory, FormKind::Vanguard);

/// Heavy: slower, higher jump, stronger gravity
#[derive(Debug, Default)]
pub struct SentinelFactory;

impl FormFactory for SentinelFactory {
    fn kind(&self) -> FormKind {
        FormKind::Sentinel
    }

    fn create_bundle(&self) -> FormStateBundle {
        default_state_set(self.kind())
    }

    fn movement_adjustment(&self) -> MovementAdjustment {
        MovementAdjustment::new(0.85, 1.15, 1.2)
    }
}

#[derive(Debug, Default)]
pub struct FishFactory;

impl FormFactory for FishFactory {
    fn kind(&self) -> FormKind {
        FormKind::Fish
    }

    fn create_bundle(&self) -> FormStateBundle {
        default_state_set(self.kind())
            .with(Box::new(SwimIdleState))
            .with(Box::new(SwimRunState))
    }
}

/// Jump is replaced by the charge sub-machine, so there is no plain Jump
#[derive(Debug, Default)]
pub struct SuperJumpFactory;

impl FormFactory for SuperJumpFactory {
    fn kind(&self) -> FormKind {
        FormKind::SuperJump
    }

    fn create_bundle(&self) -> FormStateBundle {
        with_shared_states(grounded_core(self.kind()).with(Box::new(SuperJumpState)))
    }
}

#[derive(Debug, Default)]
pub struct SpiderFactory;

impl FormFactory for SpiderFactory {
    fn kind(&self) -> FormKind {
        FormKind::Spider
    }

    fn create_bundle(&self) -> FormStateBundle {
        default_state_set(self.kind()).with(Box::new(SwingState))
    }
}

/// Glider: Jump resolves to the Flight instance, gravity is low
#[derive(Debug, Default)]
pub struct CryFactory;

impl FormFactory for CryFactory {
    fn kind(&self) -> FormKind {
        FormKind::Cry
    }

    fn create_bundle(&self) -> FormStateBundle {
        with_shared_states(grounded_core(self.kind()).with(Box::new(FlightState)))
            .with_alias(StateId::Jump, StateId::Flight)
    }

    fn movement_adjustment(&self) -> MovementAdjustment {
        MovementAdjustment::new(1.15, 1.0, 0.4)
    }
}

pub type FactoryConstructor = fn() -> Box<dyn FormFactory>;

/// Lazy, cached factory lookup by form
#[derive(Default)]
pub struct FormFactoryRegistry {
    constructors: HashMap<FormKind, FactoryConstructor>,
    cache: HashMap<FormKind, Box<dyn FormFactory>>,
}

impl FormFactoryRegistry {
    /// Registry with no forms at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in form
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(FormKind::NormalHead, || Box::new(NormalHeadFactory));
        registry.register(FormKind::Fish, || Box::new(FishFactory));
        registry.register(FormKind::SuperJump, || Box::new(SuperJumpFactory));
        registry.register(FormKind::Spider, || Box::new(SpiderFactory));
        registry.register(FormKind::Cry, || Box::new(CryFactory));
        registry.register(FormKind::Sentinel, || Box::new(SentinelFactory));
        registry.register(FormKind::Vanguard, || Box::new(VanguardFactory));
        registry
    }

    /// Register (or replace) the constructor for a form. Drops any cached
    /// factory for it.
    pub fn register(&mut self, form: FormKind, constructor: FactoryConstructor) -> &mut Self {
        self.constructors.insert(form, constructor);
        self.cache.remove(&form);
        self
    }

    pub fn is_registered(&self, form: FormKind) -> bool {
        self.constructors.contains_key(&form)
    }

    /// Factory for `form`, constructing it on first request
    pub fn factory(&mut self, form: FormKind) -> Option<&dyn FormFactory> {
        if !self.cache.contains_key(&form) {
            let constructor = self.constructors.get(&form)?;
            self.cache.insert(form, constructor());
        }
        self.cache.get(&form).map(|factory| &**factory)
    }

    /// Number of factories constructed so far
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}
