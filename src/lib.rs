// Form-scoped player locomotion and ability state machine for a 2D platformer.
//
// - `core`: small math helpers shared by every layer
// - `engine`: adapters for the outside world (rapier2d physics, winit keyboard input, frame clock)
// - `game`: the player state machine, forms, controller and respawn lifecycle

pub mod core;
pub mod engine;
pub mod game;
