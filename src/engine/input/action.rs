// Player actions and their default key bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Everything the keyboard and mouse can ask of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,

    // Abilities
    Interact,
    Swing,
    Fire,

    // Forms
    NextForm,
    PreviousForm,

    // Meta
    Pause,
}

/// A physical input that can be bound to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default layout: WASD or arrows to move, Space to jump, E to interact,
/// mouse buttons for the rope and ink, Q/Tab to cycle forms
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::KeyS), Action::MoveDown),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::KeyE), Action::Interact),
        (InputSource::mouse(MouseButton::Right), Action::Swing),
        (InputSource::key(KeyCode::KeyF), Action::Swing),
        (InputSource::mouse(MouseButton::Left), Action::Fire),
        (InputSource::key(KeyCode::KeyJ), Action::Fire),
        (InputSource::key(KeyCode::Tab), Action::NextForm),
        (InputSource::key(KeyCode::KeyQ), Action::PreviousForm),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_input_source_constructors() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_every_action_has_a_default() {
        let bound: HashSet<Action> = default_bindings().into_iter().map(|(_, a)| a).collect();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::MoveUp,
            Action::MoveDown,
            Action::Jump,
            Action::Interact,
            Action::Swing,
            Action::Fire,
            Action::NextForm,
            Action::PreviousForm,
            Action::Pause,
        ] {
            assert!(bound.contains(&action), "{action:?} has no default binding");
        }
    }

    #[test]
    fn test_no_duplicate_sources() {
        let mut seen = HashSet::new();
        for (source, _) in default_bindings() {
            assert!(seen.insert(source), "{source:?} bound twice");
        }
    }
}
