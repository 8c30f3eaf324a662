// Player configuration
//
// Everything tunable about the player lives here as plain data with sensible
// defaults. A `PlayerSettings` is built once and handed to the controller as an
// `Arc`, so nothing reads tuning from global state.

use std::collections::HashMap;

use super::form::{
    AbilitySettings, ChargeSettings, FormKind, MovementProfile, SwimSettings, SwingSettings,
    DEFAULT_PROFILE,
};
use super::presentation::PresentationDescriptor;

/// One skin (variant) of a form
#[derive(Debug, Clone, PartialEq)]
pub struct FormSettings {
    pub name: String,
    pub profile: MovementProfile,
    pub ability: AbilitySettings,
    pub presentation: PresentationDescriptor,
}

impl FormSettings {
    pub fn new(name: &str, profile: MovementProfile) -> Self {
        Self {
            name: name.to_string(),
            profile,
            ability: AbilitySettings::None,
            presentation: PresentationDescriptor::sprite(name),
        }
    }

    pub fn with_ability(mut self, ability: AbilitySettings) -> Self {
        self.ability = ability;
        self
    }

    pub fn with_presentation(mut self, presentation: PresentationDescriptor) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn charge(&self) -> Option<ChargeSettings> {
        match self.ability {
            AbilitySettings::Charge(charge) => Some(charge),
            _ => None,
        }
    }

    pub fn swim(&self) -> Option<SwimSettings> {
        match self.ability {
            AbilitySettings::Swim(swim) => Some(swim),
            _ => None,
        }
    }

    pub fn swing(&self) -> Option<SwingSettings> {
        match self.ability {
            AbilitySettings::Swing(swing) => Some(swing),
            _ => None,
        }
    }
}

/// Ladder climbing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderSettings {
    pub climb_speed: f32,
    /// Upward impulse when jumping off a ladder
    pub ladder_jump_force: f32,
}

impl Default for LadderSettings {
    fn default() -> Self {
        Self {
            climb_speed: 3.0,
            ladder_jump_force: 5.0,
        }
    }
}

/// Interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    /// Seconds the Interact state holds control after firing
    pub lock_duration: f32,
    pub interact_range: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            lock_duration: 0.2,
            interact_range: 1.5,
        }
    }
}

/// Linear damage falloff curve sampled over `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageFalloff {
    pub start: f32,
    pub end: f32,
}

impl DamageFalloff {
    pub const FLAT: DamageFalloff = DamageFalloff {
        start: 1.0,
        end: 1.0,
    };

    pub fn evaluate(&self, t: f32) -> f32 {
        crate::core::math::lerp(self.start, self.end, crate::core::math::clamp01(t)).max(0.0)
    }
}

/// Combat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatSettings {
    pub max_health: i32,
    pub attack_power: i32,
    pub damage_falloff: DamageFalloff,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            max_health: 3,
            attack_power: 1,
            damage_falloff: DamageFalloff::FLAT,
        }
    }
}

impl CombatSettings {
    pub fn sanitized_max_health(&self) -> i32 {
        self.max_health.max(1)
    }

    pub fn sanitized_attack_power(&self) -> i32 {
        self.attack_power.max(0)
    }
}

/// Drowning and respawn timings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifecycleSettings {
    /// Seconds a non-swimming form survives submerged
    pub drown_time: f32,
    /// Seconds between death and revive
    pub respawn_delay: f32,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            drown_time: 2.0,
            respawn_delay: 1.5,
        }
    }
}

/// Complete player configuration
#[derive(Debug, Clone)]
pub struct PlayerSettings {
    /// Ordered skins per form; index 0 is the default skin
    pub skins: HashMap<FormKind, Vec<FormSettings>>,
    pub ladder: LadderSettings,
    pub interaction: InteractionSettings,
    pub combat: CombatSettings,
    pub lifecycle: LifecycleSettings,
    /// Gravity scale of the body before any form multiplier
    pub base_gravity_scale: f32,
    pub starting_form: FormKind,
}

impl PlayerSettings {
    /// Settings with no form skins at all
    pub fn empty() -> Self {
        Self {
            skins: HashMap::new(),
            ladder: LadderSettings::default(),
            interaction: InteractionSettings::default(),
            combat: CombatSettings::default(),
            lifecycle: LifecycleSettings::default(),
            base_gravity_scale: 1.0,
            starting_form: FormKind::BASE,
        }
    }

    /// Settings for one skin of a form. Out-of-range indices clamp to the last skin.
    pub fn form(&self, form: FormKind, skin: usize) -> Option<&FormSettings> {
        let skins = self.skins.get(&form)?;
        if skins.is_empty() {
            return None;
        }
        skins.get(skin.min(skins.len() - 1))
    }

    pub fn skin_count(&self, form: FormKind) -> usize {
        self.skins.get(&form).map_or(0, Vec::len)
    }

    pub fn add_skin(&mut self, form: FormKind, skin: FormSettings) -> &mut Self {
        self.skins.entry(form).or_default().push(skin);
        self
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        let mut settings = Self::empty();

        settings.add_skin(
            FormKind::NormalHead,
            FormSettings::new("normal_head", DEFAULT_PROFILE),
        );
        settings.add_skin(
            FormKind::NormalHead,
            FormSettings::new("normal_head_golden", DEFAULT_PROFILE).with_presentation(
                PresentationDescriptor::sprite("normal_head_golden")
                    .with_switch_effects("skin_switch", "sparkle"),
            ),
        );
        settings.add_skin(
            FormKind::Fish,
            FormSettings::new(
                "fish",
                MovementProfile {
                    move_speed: 4.0,
                    jump_force: 8.0,
                    gravity_multiplier: 1.0,
                },
            )
            .with_ability(AbilitySettings::Swim(SwimSettings::default())),
        );
        settings.add_skin(
            FormKind::SuperJump,
            FormSettings::new("frog", DEFAULT_PROFILE)
                .with_ability(AbilitySettings::Charge(ChargeSettings::default())),
        );
        settings.add_skin(
            FormKind::Spider,
            FormSettings::new("spider", DEFAULT_PROFILE)
                .with_ability(AbilitySettings::Swing(SwingSettings::default())),
        );
        settings.add_skin(FormKind::Cry, FormSettings::new("cry", DEFAULT_PROFILE));
        settings.add_skin(
            FormKind::Sentinel,
            FormSettings::new("sentinel", DEFAULT_PROFILE),
        );
        settings.add_skin(
            FormKind::Vanguard,
            FormSettings::new("vanguard", DEFAULT_PROFILE),
        );

        settings
    }
}
