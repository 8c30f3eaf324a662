// Per-tick state shared between the controller and the active state
//
// `PlayerRuntime` is the durable data the controller owns across ticks.
// `PlayerContext` borrows it together with the physical body for the duration
// of one state callback, and gives states a small vocabulary of intents.

use std::sync::Arc;

use glam::Vec2;

use crate::core::math::is_near_zero;

use super::body::{Locomotion, PlayerBody, SensorReadings};
use super::charge::ChargeJump;
use super::commands::{InputLatch, LatchedInput};
use super::form::{FormKind, MovementAdjustment, SwimSettings, SwingSettings};
use super::presentation::Interactor;
use super::settings::{FormSettings, PlayerSettings};
use super::swing_rope::SwingRope;

/// Axis values at or below this count as "no input"
pub const INPUT_DEAD_ZONE: f32 = 0.01;

/// Vertical speed tolerance for landing and ladder checks
pub const VELOCITY_TOLERANCE: f32 = 0.1;

/// Jump multiplier used when leaving a rope
pub const SWING_JUMP_MULTIPLIER: f32 = 0.5;

/// Durable player data owned by the controller
pub struct PlayerRuntime {
    pub settings: Arc<PlayerSettings>,
    pub form: FormKind,
    pub latch: InputLatch,
    pub horizontal: f32,
    pub vertical: f32,
    pub sensors: SensorReadings,
    pub locomotion: Locomotion,
    pub charge: ChargeJump,
    pub rope: SwingRope,
    pub interactor: Box<dyn Interactor>,
    /// Base gravity scale times the form's multipliers
    pub form_gravity_scale: f32,
    /// One-shot multiplier for the next Jump entry
    pub pending_jump_multiplier: Option<f32>,
    /// -1.0 or 1.0
    pub facing: f32,
}

impl PlayerRuntime {
    pub fn new(settings: Arc<PlayerSettings>, interactor: Box<dyn Interactor>) -> Self {
        let mut locomotion = Locomotion::default();
        locomotion.ladder = settings.ladder;
        let base_gravity = settings.base_gravity_scale;

        Self {
            form: settings.starting_form,
            settings,
            latch: InputLatch::new(),
            horizontal: 0.0,
            vertical: 0.0,
            sensors: SensorReadings::default(),
            locomotion,
            charge: ChargeJump::default(),
            rope: SwingRope::default(),
            interactor,
            form_gravity_scale: base_gravity,
            pending_jump_multiplier: None,
            facing: 1.0,
        }
    }

    pub fn base_gravity_scale(&self) -> f32 {
        self.settings.base_gravity_scale
    }

    /// Push a form skin's numbers into the runtime
    pub fn apply_form(
        &mut self,
        form: FormKind,
        skin: &FormSettings,
        adjustment: MovementAdjustment,
    ) {
        self.form = form;
        self.locomotion.apply_profile(&skin.profile, adjustment);
        self.locomotion.ladder = self.settings.ladder;
        self.locomotion.swim = skin.swim().unwrap_or_default();
        self.form_gravity_scale = self.base_gravity_scale()
            * skin.profile.gravity_multiplier.max(0.0)
            * adjustment.gravity_multiplier.max(0.0);

        if let Some(charge) = skin.charge() {
            self.charge.configure(charge);
        } else {
            self.charge.reset();
        }
        self.rope
            .configure(skin.swing().unwrap_or_else(SwingSettings::default));
    }

    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = sanitize_axis(horizontal);
        self.vertical = sanitize_axis(vertical);
        if !is_near_zero(self.horizontal, INPUT_DEAD_ZONE) {
            self.facing = self.horizontal.signum();
        }
    }

    pub fn zero_axes(&mut self) {
        self.horizontal = 0.0;
        self.vertical = 0.0;
    }

    pub fn swim_settings(&self) -> &SwimSettings {
        &self.locomotion.swim
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// What a state sees during one callback
pub struct PlayerContext<'a> {
    pub body: &'a mut dyn PlayerBody,
    pub rt: &'a mut PlayerRuntime,
}

impl<'a> PlayerContext<'a> {
    pub fn new(body: &'a mut dyn PlayerBody, rt: &'a mut PlayerRuntime) -> Self {
        Self { body, rt }
    }

    // Input

    pub fn horizontal(&self) -> f32 {
        self.rt.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.rt.vertical
    }

    pub fn has_horizontal_input(&self) -> bool {
        !is_near_zero(self.rt.horizontal, INPUT_DEAD_ZONE)
    }

    pub fn has_vertical_input(&self) -> bool {
        !is_near_zero(self.rt.vertical, INPUT_DEAD_ZONE)
    }

    pub fn has_movement_input(&self) -> bool {
        self.has_horizontal_input() || self.has_vertical_input()
    }

    /// Ladder grab needs a clear up/down intent, not stick noise
    pub fn wants_ladder(&self) -> bool {
        self.rt.sensors.touching_ladder && self.rt.vertical.abs() > VELOCITY_TOLERANCE
    }

    pub fn consume_jump(&mut self) -> bool {
        self.rt.latch.consume(LatchedInput::Jump)
    }

    pub fn consume_interact(&mut self) -> bool {
        self.rt.latch.consume(LatchedInput::Interact)
    }

    // Sensors

    pub fn is_grounded(&self) -> bool {
        self.rt.sensors.grounded
    }

    pub fn touching_ladder(&self) -> bool {
        self.rt.sensors.touching_ladder
    }

    pub fn in_water(&self) -> bool {
        self.rt.sensors.in_water
    }

    /// In water with a form that can swim
    pub fn should_swim(&self) -> bool {
        self.rt.sensors.in_water && self.rt.form.can_swim()
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.body.velocity().y
    }

    // Locomotion

    pub fn move_horizontal(&mut self, input: f32) {
        self.rt.locomotion.move_horizontal(self.body, input);
    }

    pub fn stop(&mut self) {
        self.rt.locomotion.stop(self.body);
    }

    pub fn execute_jump(&mut self, multiplier: f32) {
        self.rt.locomotion.jump(self.body, multiplier);
    }

    /// Pending Jump override, or 1.0
    pub fn take_jump_multiplier(&mut self) -> f32 {
        self.rt.pending_jump_multiplier.take().unwrap_or(1.0)
    }

    pub fn set_jump_multiplier(&mut self, multiplier: f32) {
        self.rt.pending_jump_multiplier = Some(multiplier);
    }

    /// Released charge, or the charge minimum
    pub fn take_super_jump_multiplier(&mut self) -> f32 {
        self.rt.charge.take_multiplier_or_min()
    }

    /// Gravity scale as a fraction of the base scale
    pub fn set_gravity_fraction(&mut self, fraction: f32) {
        let scale = self.rt.base_gravity_scale() * fraction;
        self.body.set_gravity_scale(scale);
    }

    pub fn restore_form_gravity(&mut self) {
        self.body.set_gravity_scale(self.rt.form_gravity_scale);
    }

    pub fn climb(&mut self, vertical: f32) {
        self.rt.locomotion.climb(self.body, vertical);
    }

    pub fn jump_off_ladder(&mut self) {
        self.rt.locomotion.jump_off_ladder(self.body);
    }

    pub fn swim(&mut self, horizontal: f32, vertical: f32) {
        self.rt.locomotion.swim(self.body, horizontal, vertical);
    }

    pub fn swim_up(&mut self) {
        self.rt.locomotion.swim_stroke(self.body);
    }

    pub fn apply_swim_drag(&mut self, dt: f32) {
        self.rt.locomotion.swim_drag(self.body, dt);
    }

    pub fn zero_input(&mut self) {
        self.rt.zero_axes();
    }

    // Abilities

    pub fn perform_interaction(&mut self) -> bool {
        let position: Vec2 = self.body.position();
        self.rt.interactor.try_interact(position)
    }

    pub fn interaction_lock(&self) -> f32 {
        self.rt.settings.interaction.lock_duration.max(0.0)
    }

    pub fn rope_attached(&self) -> bool {
        self.rt.rope.is_attached()
    }

    pub fn step_rope(&mut self, dt: f32) {
        let (horizontal, vertical) = (self.rt.horizontal, self.rt.vertical);
        self.rt.rope.step(self.body, horizontal, vertical, dt);
    }

    pub fn detach_rope(&mut self) {
        self.rt.rope.detach();
    }
}
