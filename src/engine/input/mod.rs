// Keyboard and mouse input
//
// - `action`: the actions the player can trigger and their default bindings
// - `config`: remappable source → action bindings
// - `manager`: folds winit events into held/pressed/released sets and
//   produces one `PlayerCommands` per logic tick
//
// ```ignore
// let mut input = InputManager::new(InputBindings::default());
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per frame
// controller.update(&mut body, &input.commands(), dt);
// input.end_frame();
// ```

pub mod action;
pub mod config;
pub mod manager;

pub use action::{Action, InputSource};
pub use config::InputBindings;
pub use manager::InputManager;
