// Form tags and the per-form tuning data they carry

use std::fmt;

/// A named ability/physics profile the player can equip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormKind {
    /// Base form, always unlocked
    NormalHead,
    /// Aquatic form: swims instead of drowning, fires ink
    Fish,
    /// Charge-jump form: jump press charges, release launches
    SuperJump,
    /// Swing form: fires a rope at 45 degrees and swings from it
    Spider,
    /// Glide form: low gravity flight instead of a plain jump
    Cry,
    /// Heavy form: slower, higher jump, stronger gravity
    Sentinel,
    /// Balanced form
    Vanguard,
}

impl FormKind {
    /// Every form in catalogue order (the order used for next/previous cycling)
    pub const ALL: [FormKind; 7] = [
        FormKind::NormalHead,
        FormKind::Fish,
        FormKind::SuperJump,
        FormKind::Spider,
        FormKind::Cry,
        FormKind::Sentinel,
        FormKind::Vanguard,
    ];

    /// The form every session starts with and that can never be locked
    pub const BASE: FormKind = FormKind::NormalHead;

    /// Whether this form survives (and moves) underwater
    pub fn can_swim(self) -> bool {
        matches!(self, Self::Fish)
    }

    /// Whether jump input is redirected into the charge sub-machine
    pub fn charges_jump(self) -> bool {
        matches!(self, Self::SuperJump)
    }

    /// Position in the catalogue
    pub fn catalogue_index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::NormalHead => "normal_head",
            Self::Fish => "fish",
            Self::SuperJump => "super_jump",
            Self::Spider => "spider",
            Self::Cry => "cry",
            Self::Sentinel => "sentinel",
            Self::Vanguard => "vanguard",
        }
    }
}

impl Default for FormKind {
    fn default() -> Self {
        Self::BASE
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Movement numbers every form carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementProfile {
    /// Horizontal speed at full input (units/second)
    pub move_speed: f32,
    /// Jump impulse at multiplier 1.0
    pub jump_force: f32,
    /// Multiplier on the body's base gravity scale
    pub gravity_multiplier: f32,
}

pub const DEFAULT_PROFILE: MovementProfile = MovementProfile {
    move_speed: 5.0,
    jump_force: 10.0,
    gravity_multiplier: 1.0,
};

impl Default for MovementProfile {
    fn default() -> Self {
        DEFAULT_PROFILE
    }
}

/// Scaling a factory layers on top of a form's profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementAdjustment {
    pub move_multiplier: f32,
    pub jump_multiplier: f32,
    pub gravity_multiplier: f32,
}

impl MovementAdjustment {
    pub const IDENTITY: MovementAdjustment = MovementAdjustment {
        move_multiplier: 1.0,
        jump_multiplier: 1.0,
        gravity_multiplier: 1.0,
    };

    pub const fn new(move_multiplier: f32, jump_multiplier: f32, gravity_multiplier: f32) -> Self {
        Self {
            move_multiplier,
            jump_multiplier,
            gravity_multiplier,
        }
    }
}

impl Default for MovementAdjustment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Charge-jump tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeSettings {
    pub min_multiplier: f32,
    pub max_multiplier: f32,
    /// Seconds of holding needed to reach `max_multiplier`
    pub max_charge_time: f32,
}

impl Default for ChargeSettings {
    fn default() -> Self {
        Self {
            min_multiplier: 1.0,
            max_multiplier: 2.5,
            max_charge_time: 1.0,
        }
    }
}

/// Aquatic tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwimSettings {
    pub swim_speed: f32,
    /// Gravity scale (relative to base) while swimming
    pub gravity_fraction: f32,
    /// Fraction of the jump force used for an upward stroke
    pub stroke_fraction: f32,
    /// Velocity damping per second while idling in water
    pub drag: f32,
    pub ink_speed: f32,
    pub ink_lifetime: f32,
    pub ink_cooldown: f32,
}

impl Default for SwimSettings {
    fn default() -> Self {
        Self {
            swim_speed: 4.0,
            gravity_fraction: 0.3,
            stroke_fraction: 0.5,
            drag: 3.0,
            ink_speed: 8.0,
            ink_lifetime: 2.0,
            ink_cooldown: 0.5,
        }
    }
}

/// Rope tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingSettings {
    pub max_distance: f32,
    pub climb_speed: f32,
    pub swing_force: f32,
    /// Rope never reels in shorter than this
    pub min_length: f32,
}

impl Default for SwingSettings {
    fn default() -> Self {
        Self {
            max_distance: 10.0,
            climb_speed: 3.0,
            swing_force: 15.0,
            min_length: 0.5,
        }
    }
}

/// Form-exclusive ability settings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AbilitySettings {
    #[default]
    None,
    Charge(ChargeSettings),
    Swim(SwimSettings),
    Swing(SwingSettings),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fish_swims() {
        let swimmers: Vec<_> = FormKind::ALL.iter().filter(|f| f.can_swim()).collect();
        assert_eq!(swimmers, vec![&FormKind::Fish]);
    }

    #[test]
    fn test_catalogue_order_is_stable() {
        for (i, form) in FormKind::ALL.iter().enumerate() {
            assert_eq!(form.catalogue_index(), i);
        }
        assert_eq!(FormKind::default(), FormKind::NormalHead);
    }

    #[test]
    fn test_display_uses_snake_case() {
        assert_eq!(FormKind::SuperJump.to_string(), "super_jump");
    }
}
