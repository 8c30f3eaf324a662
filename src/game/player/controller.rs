// Player controller
//
// The only code that changes the player's state. Each logic tick runs in a
// fixed order: sensor refresh, drowning, command dispatch, HandleInput, then
// LogicUpdate. Physics-phase callbacks run separately before each fixed step.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use log::{debug, error, info, warn};

use crate::core::math::clamp01;

use super::body::{Locomotion, PlayerBody};
use super::bundle::{FormBundles, StateBindings};
use super::charge::ChargeJump;
use super::commands::{LatchedInput, PlayerCommands};
use super::context::{PlayerContext, PlayerRuntime};
use super::drowning::{DrowningStatus, DrowningTimer};
use super::error::ControllerError;
use super::factory::FormFactoryRegistry;
use super::form::FormKind;
use super::health::{DamageOutcome, Health};
use super::presentation::{Interactor, LogPresentation, NoInteractions, PresentationBinder};
use super::settings::PlayerSettings;
use super::state::{PlayerStateMachine, StateId, StateRef};
use super::swing_rope::SwingRope;
use super::unlocks::{FormUnlocks, UnlockStore};

/// Things that happened since the last drain
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    StateChanged {
        from: Option<StateId>,
        to: StateId,
    },
    FormChanged {
        from: Option<FormKind>,
        to: FormKind,
    },
    SkinChanged {
        form: FormKind,
        skin: usize,
    },
    Died,
    Revived,
    ProjectileFired {
        origin: Vec2,
        direction: Vec2,
        speed: f32,
        lifetime: f32,
    },
}

/// Collects the controller's collaborators
pub struct PlayerControllerBuilder {
    settings: Arc<PlayerSettings>,
    registry: FormFactoryRegistry,
    unlocks: Box<dyn UnlockStore>,
    presentation: Box<dyn PresentationBinder>,
    interactor: Box<dyn Interactor>,
}

impl PlayerControllerBuilder {
    pub fn new(settings: Arc<PlayerSettings>) -> Self {
        Self {
            settings,
            registry: FormFactoryRegistry::with_defaults(),
            unlocks: Box::new(FormUnlocks::new()),
            presentation: Box::new(LogPresentation),
            interactor: Box::new(NoInteractions),
        }
    }

    pub fn registry(mut self, registry: FormFactoryRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn unlocks(mut self, unlocks: Box<dyn UnlockStore>) -> Self {
        self.unlocks = unlocks;
        self
    }

    pub fn presentation(mut self, presentation: Box<dyn PresentationBinder>) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn interactor(mut self, interactor: Box<dyn Interactor>) -> Self {
        self.interactor = interactor;
        self
    }

    /// Build the controller and activate the starting form
    pub fn build(self, body: &mut dyn PlayerBody) -> Result<PlayerController, ControllerError> {
        let starting_form = self.settings.starting_form;
        let health = Health::new(self.settings.combat.sanitized_max_health());
        let drowning = DrowningTimer::new(self.settings.lifecycle.drown_time);

        let mut controller = PlayerController {
            runtime: PlayerRuntime::new(Arc::clone(&self.settings), self.interactor),
            settings: self.settings,
            registry: self.registry,
            unlocks: self.unlocks,
            presentation: self.presentation,
            bundles: FormBundles::new(),
            bindings: StateBindings::default(),
            machine: PlayerStateMachine::new(),
            health,
            drowning,
            form: starting_form,
            skin: 0,
            selected_skins: HashMap::new(),
            activated: false,
            presented: false,
            dead: false,
            ink_cooldown: 0.0,
            events: Vec::new(),
        };

        controller.switch_form(starting_form, true, body)?;
        Ok(controller)
    }
}

pub struct PlayerController {
    settings: Arc<PlayerSettings>,
    registry: FormFactoryRegistry,
    unlocks: Box<dyn UnlockStore>,
    presentation: Box<dyn PresentationBinder>,
    bundles: FormBundles,
    bindings: StateBindings,
    machine: PlayerStateMachine,
    runtime: PlayerRuntime,
    health: Health,
    drowning: DrowningTimer,
    form: FormKind,
    skin: usize,
    selected_skins: HashMap<FormKind, usize>,
    activated: bool,
    presented: bool,
    dead: bool,
    ink_cooldown: f32,
    events: Vec<PlayerEvent>,
}

impl PlayerController {
    /// One logic tick
    pub fn update(&mut self, body: &mut dyn PlayerBody, commands: &PlayerCommands, dt: f32) {
        self.tick(body, commands, dt);
        // Presses no state took this tick are dropped
        self.runtime.latch.clear();
    }

    fn tick(&mut self, body: &mut dyn PlayerBody, commands: &PlayerCommands, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.runtime.sensors = body.sense();
        self.ink_cooldown = (self.ink_cooldown - dt).max(0.0);

        if self.dead {
            self.runtime.zero_axes();
            self.run_state(body, dt);
            return;
        }

        self.runtime
            .set_axes(commands.horizontal, commands.vertical);

        if self.update_drowning(body, dt) {
            return;
        }

        self.dispatch(commands, body, dt);
        self.run_state(body, dt);
    }

    /// Physics-phase pass, run before each fixed physics step
    pub fn physics_update(&mut self, body: &mut dyn PlayerBody, dt: f32) {
        let mut ctx = PlayerContext::new(body, &mut self.runtime);
        self.machine.physics_update(&mut self.bundles, &mut ctx, dt);
    }

    fn run_state(&mut self, body: &mut dyn PlayerBody, dt: f32) {
        let requested = {
            let mut ctx = PlayerContext::new(body, &mut self.runtime);
            self.machine.handle_input(&mut self.bundles, &mut ctx)
        };
        if let Some(id) = requested {
            if !self.change_to(id, body) {
                self.runtime.pending_jump_multiplier = None;
            }
        }

        let requested = {
            let mut ctx = PlayerContext::new(body, &mut self.runtime);
            self.machine.logic_update(&mut self.bundles, &mut ctx, dt)
        };
        if let Some(id) = requested {
            self.change_to(id, body);
        }
    }

    /// Returns true when the player drowned this tick
    fn update_drowning(&mut self, body: &mut dyn PlayerBody, dt: f32) -> bool {
        let submerged = self.runtime.sensors.in_water && !self.form.can_swim();

        match self.drowning.tick(submerged, dt) {
            DrowningStatus::Started => {
                debug!("{} is drowning", self.form);
            }
            DrowningStatus::Cancelled => {
                debug!("left the water, drowning cancelled");
                if !self.state_owns_gravity() {
                    body.set_gravity_scale(self.runtime.form_gravity_scale);
                }
            }
            DrowningStatus::Drowned => {
                info!("drowned as {}", self.form);
                self.kill(body);
                return true;
            }
            DrowningStatus::Drowning | DrowningStatus::Dry => {}
        }

        if self.drowning.is_active() {
            body.set_gravity_scale(0.0);
            self.runtime.zero_axes();
        }
        false
    }

    fn dispatch(&mut self, commands: &PlayerCommands, body: &mut dyn PlayerBody, dt: f32) {
        let cycled = if commands.next_form {
            Some(self.request_next_form(body))
        } else if commands.previous_form {
            Some(self.request_previous_form(body))
        } else {
            None
        };
        if let Some(Err(err)) = cycled {
            debug!("form cycle refused: {err}");
        }

        // Sinking: only a form switch gets through
        if self.drowning.is_active() {
            self.runtime.charge.cancel();
            return;
        }

        if self.bindings.contains(StateId::SuperJump) {
            self.update_charge(commands, body, dt);
        } else if commands.jump_pressed {
            self.runtime.latch.push(LatchedInput::Jump);
        }

        if commands.interact_pressed {
            self.runtime.latch.push(LatchedInput::Interact);
        }
        if commands.swing_pressed {
            self.toggle_rope(body);
        }
        if commands.fire_pressed {
            self.fire_projectile(body);
        }
    }

    /// Charge invariant: grounded and standing or running
    fn can_charge(&self) -> bool {
        self.runtime.sensors.grounded
            && self
                .machine
                .current_id()
                .is_some_and(|id| id.is_grounded_locomotion())
    }

    fn update_charge(&mut self, commands: &PlayerCommands, body: &mut dyn PlayerBody, dt: f32) {
        let can_charge = self.can_charge();
        let charge = &mut self.runtime.charge;

        if commands.jump_pressed {
            if can_charge && charge.begin() {
                debug!("charge started");
            }
        } else if commands.jump_held && charge.is_charging() {
            if can_charge {
                charge.advance(dt);
            } else {
                debug!("charge cancelled");
                charge.cancel();
            }
        }

        if !commands.jump_released || !charge.is_charging() {
            return;
        }
        if !can_charge {
            charge.cancel();
            return;
        }
        charge.release();
        debug!("charge released at x{:.2}", charge.multiplier());
        if !self.change_to(StateId::SuperJump, body) {
            self.runtime.charge.reset();
        }
    }

    fn toggle_rope(&mut self, body: &mut dyn PlayerBody) {
        if !self.bindings.contains(StateId::Swing) {
            return;
        }

        if self.runtime.rope.is_attached() {
            self.runtime.rope.detach();
            if self.current_state() == Some(StateId::Swing) {
                self.change_to(StateId::Fall, body);
            }
            return;
        }

        if matches!(
            self.current_state(),
            Some(StateId::OnLadder | StateId::SwimIdle | StateId::SwimRun | StateId::Dead)
        ) {
            return;
        }

        let origin = body.position();
        let direction = SwingRope::launch_direction(self.runtime.facing);
        let reach = self.runtime.rope.settings().max_distance;
        let Some(anchor) = body.cast_grapple(origin, direction, reach) else {
            debug!("rope missed");
            return;
        };

        self.runtime.rope.attach(anchor, origin);
        if !self.change_to(StateId::Swing, body) {
            self.runtime.rope.detach();
        }
    }

    fn fire_projectile(&mut self, body: &mut dyn PlayerBody) {
        if !self.form.can_swim() || self.ink_cooldown > 0.0 {
            return;
        }
        let ink = *self.runtime.swim_settings();
        self.ink_cooldown = ink.ink_cooldown.max(0.0);
        self.events.push(PlayerEvent::ProjectileFired {
            origin: body.position(),
            direction: Vec2::new(self.runtime.facing, 0.0),
            speed: ink.ink_speed,
            lifetime: ink.ink_lifetime,
        });
    }

    /// Resolve `id` against the active bundle and transition. Unbound ids
    /// keep the current state.
    fn change_to(&mut self, id: StateId, body: &mut dyn PlayerBody) -> bool {
        match self.bindings.get(id) {
            Some(target) => self.enter_state(Some(target), body),
            None => {
                debug!("{id} is not available as {}", self.form);
                false
            }
        }
    }

    fn enter_state(&mut self, target: Option<StateRef>, body: &mut dyn PlayerBody) -> bool {
        let from = self.machine.current_id();
        let mut ctx = PlayerContext::new(body, &mut self.runtime);
        let changed = match (self.machine.is_initialized(), target) {
            (false, Some(target)) => self.machine.initialize(target, &mut self.bundles, &mut ctx),
            (false, None) => false,
            (true, target) => self.machine.change_state(target, &mut self.bundles, &mut ctx),
        };

        if changed {
            if let Some(to) = self.machine.current_id() {
                debug!("state {:?} -> {}", from, to);
                self.events.push(PlayerEvent::StateChanged { from, to });
            }
        }
        changed
    }

    fn state_owns_gravity(&self) -> bool {
        self.machine
            .current_id()
            .is_some_and(|id| id.overrides_gravity())
    }

    // Forms

    /// Activate `form`. Without `force`, switching to the current form is a
    /// no-op and locked forms are refused.
    pub fn switch_form(
        &mut self,
        form: FormKind,
        force: bool,
        body: &mut dyn PlayerBody,
    ) -> Result<bool, ControllerError> {
        if self.dead {
            return Err(ControllerError::Dead);
        }
        if !force && self.activated && form == self.form {
            return Ok(false);
        }
        if !force && !self.unlocks.is_form_unlocked(form) {
            warn!("form {form} is locked");
            return Err(ControllerError::FormLocked(form));
        }

        let settings = Arc::clone(&self.settings);
        let Some(factory) = self.registry.factory(form) else {
            error!("no factory registered for form {form}");
            return Err(ControllerError::FactoryMissing(form));
        };
        let skin = self.selected_skins.get(&form).copied().unwrap_or(0);
        let Some(skin_settings) = settings.form(form, skin) else {
            error!("no settings configured for form {form}");
            return Err(ControllerError::SettingsMissing(form));
        };

        let previous_form = self.activated.then_some(self.form);
        let desired = self.machine.current_id().unwrap_or(StateId::Idle);

        if !form.charges_jump() {
            self.runtime.charge.reset();
        }
        if form.can_swim() {
            self.drowning.reset();
        }

        factory.apply_form_settings(skin_settings, &mut self.runtime);
        self.bindings = self
            .bundles
            .get_or_build(form, || factory.create_bundle())
            .bindings();

        body.set_gravity_scale(self.runtime.form_gravity_scale);
        self.presentation
            .apply_presentation(&skin_settings.presentation, self.presented);
        self.presented = true;

        self.form = form;
        self.skin = skin;
        self.activated = true;

        let target = self.bindings.get_or_default(desired);
        self.enter_state(target, body);

        info!("form -> {form} (skin {skin})");
        self.events.push(PlayerEvent::FormChanged {
            from: previous_form,
            to: form,
        });
        Ok(true)
    }

    /// Next unlocked form in catalogue order, wrapping
    pub fn request_next_form(&mut self, body: &mut dyn PlayerBody) -> Result<bool, ControllerError> {
        self.cycle_form(1, body)
    }

    /// Previous unlocked form in catalogue order, wrapping
    pub fn request_previous_form(
        &mut self,
        body: &mut dyn PlayerBody,
    ) -> Result<bool, ControllerError> {
        self.cycle_form(-1, body)
    }

    fn cycle_form(&mut self, step: isize, body: &mut dyn PlayerBody) -> Result<bool, ControllerError> {
        let count = FormKind::ALL.len() as isize;
        let start = self.form.catalogue_index() as isize;

        let next = (1..count)
            .map(|offset| FormKind::ALL[(start + step * offset).rem_euclid(count) as usize])
            .find(|form| self.unlocks.is_form_unlocked(*form));

        match next {
            Some(form) => self.switch_form(form, false, body),
            None => Ok(false),
        }
    }

    pub fn force_unlock_form(&mut self, form: FormKind) {
        info!("unlocked form {form}");
        self.unlocks.unlock_form(form);
    }

    pub fn force_unlock_skin(&mut self, form: FormKind, skin: usize) {
        info!("unlocked skin {skin} of {form}");
        self.unlocks.unlock_skin(form, skin);
    }

    /// Select a skin of the current form. Out-of-range indices clamp to the
    /// last skin. Re-applies settings and presentation without a state change.
    pub fn switch_skin(
        &mut self,
        index: usize,
        body: &mut dyn PlayerBody,
    ) -> Result<bool, ControllerError> {
        if self.dead {
            return Err(ControllerError::Dead);
        }
        let form = self.form;
        let count = self.settings.skin_count(form);
        if count == 0 {
            error!("no settings configured for form {form}");
            return Err(ControllerError::SettingsMissing(form));
        }
        let skin = index.min(count - 1);
        if skin == self.skin {
            return Ok(false);
        }
        if !self.unlocks.is_skin_unlocked(form, skin) {
            warn!("skin {skin} of {form} is locked");
            return Err(ControllerError::SkinLocked { form, skin });
        }

        let settings = Arc::clone(&self.settings);
        let Some(skin_settings) = settings.form(form, skin) else {
            error!("no settings configured for form {form}");
            return Err(ControllerError::SettingsMissing(form));
        };
        let Some(factory) = self.registry.factory(form) else {
            error!("no factory registered for form {form}");
            return Err(ControllerError::FactoryMissing(form));
        };

        factory.apply_form_settings(skin_settings, &mut self.runtime);
        if !self.state_owns_gravity() && !self.drowning.is_active() {
            body.set_gravity_scale(self.runtime.form_gravity_scale);
        }
        self.presentation
            .apply_presentation(&skin_settings.presentation, true);

        self.skin = skin;
        self.selected_skins.insert(form, skin);
        info!("skin -> {} ({form})", skin_settings.name);
        self.events.push(PlayerEvent::SkinChanged { form, skin });
        Ok(true)
    }

    // Health and lifecycle

    pub fn apply_damage(&mut self, amount: i32, body: &mut dyn PlayerBody) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        let outcome = self.health.take_damage(amount);
        match outcome {
            DamageOutcome::Died => self.die(body),
            DamageOutcome::Damaged { remaining } => debug!("took {amount} damage, {remaining} left"),
            DamageOutcome::Ignored => {}
        }
        outcome
    }

    /// Die immediately regardless of health
    pub fn kill(&mut self, body: &mut dyn PlayerBody) {
        if self.dead {
            return;
        }
        self.health.drain();
        self.die(body);
    }

    fn die(&mut self, body: &mut dyn PlayerBody) {
        self.dead = true;
        self.clear_transients();
        self.change_to(StateId::Dead, body);
        info!("player died as {}", self.form);
        self.events.push(PlayerEvent::Died);
    }

    /// Leave Dead for Idle with every sub-machine reset. Returns false when
    /// the player was not dead.
    pub fn revive(&mut self, body: &mut dyn PlayerBody) -> bool {
        if !self.dead {
            return false;
        }
        self.dead = false;
        self.clear_transients();
        if self.health.is_depleted() {
            self.health.reset();
        }

        body.set_gravity_scale(self.runtime.form_gravity_scale);
        let target = self.bindings.get_or_default(StateId::Idle);
        self.enter_state(target, body);

        info!("player revived as {}", self.form);
        self.events.push(PlayerEvent::Revived);
        true
    }

    fn clear_transients(&mut self) {
        self.runtime.charge.reset();
        self.runtime.latch.clear();
        self.runtime.pending_jump_multiplier = None;
        self.runtime.zero_axes();
        self.drowning.reset();
    }

    /// Restore up to `amount`. Ignored while dead.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.dead {
            return self.health.current();
        }
        self.health.heal(amount)
    }

    pub fn reset_health(&mut self) {
        self.health.reset();
    }

    /// Outgoing damage for a hit at `falloff` in [0, 1] along the damage curve
    pub fn attack_damage(&self, falloff: f32) -> i32 {
        let combat = &self.settings.combat;
        let scale = combat.damage_falloff.evaluate(clamp01(falloff));
        (combat.sanitized_attack_power() as f32 * scale)
            .round()
            .max(0.0) as i32
    }

    /// Move the body with zero velocity. A rope does not survive a teleport.
    pub fn teleport(&mut self, body: &mut dyn PlayerBody, position: Vec2) {
        body.teleport(position);
        if self.runtime.rope.is_attached() {
            self.runtime.rope.detach();
            if self.current_state() == Some(StateId::Swing) {
                self.change_to(StateId::Fall, body);
            }
        }
    }

    // Queries

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn current_form(&self) -> FormKind {
        self.form
    }

    pub fn current_skin(&self) -> usize {
        self.skin
    }

    pub fn current_state(&self) -> Option<StateId> {
        self.machine.current_id()
    }

    pub fn state_time(&self) -> f32 {
        self.machine.state_time()
    }

    /// Whether the active form has a state for `id`
    pub fn has_state(&self, id: StateId) -> bool {
        self.bindings.contains(id)
    }

    pub fn current_health(&self) -> i32 {
        self.health.current()
    }

    pub fn max_health(&self) -> i32 {
        self.health.max()
    }

    pub fn is_grounded(&self) -> bool {
        self.runtime.sensors.grounded
    }

    pub fn is_in_water(&self) -> bool {
        self.runtime.sensors.in_water
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_form_unlocked(&self, form: FormKind) -> bool {
        self.unlocks.is_form_unlocked(form)
    }

    pub fn charge(&self) -> &ChargeJump {
        &self.runtime.charge
    }

    pub fn drowning(&self) -> &DrowningTimer {
        &self.drowning
    }

    pub fn rope(&self) -> &SwingRope {
        &self.runtime.rope
    }

    pub fn locomotion(&self) -> &Locomotion {
        &self.runtime.locomotion
    }

    pub fn facing(&self) -> f32 {
        self.runtime.facing
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }
}
