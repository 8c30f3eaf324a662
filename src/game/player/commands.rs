// Per-tick player commands and the discrete input latch

/// Normalized intent for one logic tick
///
/// Axes are in [-1, 1]. The edge flags are true only on the tick the edge
/// happened; `jump_held` is true on every tick the button is down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerCommands {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub interact_pressed: bool,
    pub swing_pressed: bool,
    pub fire_pressed: bool,
    pub next_form: bool,
    pub previous_form: bool,
}

impl PlayerCommands {
    /// Pure movement, no buttons
    pub fn axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    /// A jump press on this tick (button also counts as held)
    pub fn jump() -> Self {
        Self {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        }
    }

    pub fn interact() -> Self {
        Self {
            interact_pressed: true,
            ..Default::default()
        }
    }

    pub fn with_axes(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }
}

/// Discrete inputs that wait to be consumed by a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatchedInput {
    Jump,
    Interact,
}

/// Holds jump and interact presses until a state consumes them
///
/// A press is consumable for the tick it arrives in; the controller clears
/// whatever is left at the end of the tick. Repeated presses collapse into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    jump: bool,
    interact: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a press
    pub fn push(&mut self, input: LatchedInput) {
        *self.slot(input) = true;
    }

    /// Check if a press is waiting
    pub fn has(&self, input: LatchedInput) -> bool {
        match input {
            LatchedInput::Jump => self.jump,
            LatchedInput::Interact => self.interact,
        }
    }

    /// Consume a latched press, returning whether there was one
    pub fn consume(&mut self, input: LatchedInput) -> bool {
        std::mem::take(self.slot(input))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        !self.jump && !self.interact
    }

    fn slot(&mut self, input: LatchedInput) -> &mut bool {
        match input {
            LatchedInput::Jump => &mut self.jump,
            LatchedInput::Interact => &mut self.interact,
        }
    }
}
