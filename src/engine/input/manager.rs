// Input manager: winit events in, player commands out

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

use super::action::{Action, InputSource};
use super::config::InputBindings;
use crate::game::player::PlayerCommands;

/// Tracks held actions plus this frame's press and release edges
#[derive(Debug, Default)]
pub struct InputManager {
    bindings: InputBindings,
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
    just_released: HashSet<Action>,
}

impl InputManager {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Feed a winit keyboard event. Key repeats are ignored.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if event.repeat {
            return;
        }
        self.process_source(InputSource::key(code), event.state);
    }

    pub fn process_mouse_event(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state);
    }

    fn process_source(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.bindings.action(source) else {
            return;
        };
        match state {
            ElementState::Pressed => self.press(action),
            ElementState::Released => self.release(action),
        }
    }

    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Clear this frame's edges. Call once per frame after the logic tick.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// (horizontal, vertical) in [-1, 1]; opposite keys cancel
    pub fn axes(&self) -> (f32, f32) {
        let axis = |negative: Action, positive: Action| {
            let mut value = 0.0;
            if self.is_pressed(negative) {
                value -= 1.0;
            }
            if self.is_pressed(positive) {
                value += 1.0;
            }
            value
        };
        (
            axis(Action::MoveLeft, Action::MoveRight),
            axis(Action::MoveDown, Action::MoveUp),
        )
    }

    /// This frame's commands for the player controller
    pub fn commands(&self) -> PlayerCommands {
        let (horizontal, vertical) = self.axes();
        PlayerCommands {
            horizontal,
            vertical,
            jump_pressed: self.just_pressed(Action::Jump),
            jump_held: self.is_pressed(Action::Jump),
            jump_released: self.just_released(Action::Jump),
            interact_pressed: self.just_pressed(Action::Interact),
            swing_pressed: self.just_pressed(Action::Swing),
            fire_pressed: self.just_pressed(Action::Fire),
            next_form: self.just_pressed(Action::NextForm),
            previous_form: self.just_pressed(Action::PreviousForm),
        }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut InputBindings {
        &mut self.bindings
    }
}
