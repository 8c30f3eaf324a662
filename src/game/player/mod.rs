// Player core
//
// A form-scoped state machine: every form gets its own bundle of state
// instances, the controller resolves state ids against the active bundle and
// runs the tick phases in a fixed order. The physics body, presentation and
// interactions are reached only through the traits in `body` and
// `presentation`.

pub mod body;
pub mod bundle;
pub mod charge;
pub mod commands;
pub mod context;
pub mod controller;
pub mod drowning;
pub mod error;
pub mod factory;
pub mod form;
pub mod health;
pub mod presentation;
pub mod settings;
pub mod state;
pub mod states;
pub mod swing_rope;
pub mod unlocks;

#[cfg(test)]
pub mod testing;

pub use body::{Locomotion, PlayerBody, SensorReadings};
pub use commands::PlayerCommands;
pub use controller::{PlayerController, PlayerControllerBuilder, PlayerEvent};
pub use error::ControllerError;
pub use factory::{FormFactory, FormFactoryRegistry};
pub use form::{FormKind, MovementAdjustment, MovementProfile};
pub use health::DamageOutcome;
pub use presentation::{Interactor, PresentationBinder, PresentationDescriptor};
pub use settings::{FormSettings, PlayerSettings};
pub use state::StateId;
pub use unlocks::{FormUnlocks, UnlockStore};
