// Charge-jump sub-machine
//
// Press begins a charge, holding advances it, release hands a pending
// multiplier to the SuperJump state. The controller gates every step on the
// ground/locomotion invariant and cancels when it breaks.

use crate::core::math::{clamp01, inverse_lerp01, lerp};

use super::body::MIN_JUMP_MULTIPLIER;
use super::form::ChargeSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeJump {
    min_multiplier: f32,
    max_multiplier: f32,
    max_charge_time: f32,
    elapsed: f32,
    multiplier: f32,
    charging: bool,
    pending: bool,
}

impl Default for ChargeJump {
    fn default() -> Self {
        Self::new(ChargeSettings::default())
    }
}

impl ChargeJump {
    pub fn new(settings: ChargeSettings) -> Self {
        let mut charge = Self {
            min_multiplier: MIN_JUMP_MULTIPLIER,
            max_multiplier: MIN_JUMP_MULTIPLIER,
            max_charge_time: 0.0,
            elapsed: 0.0,
            multiplier: MIN_JUMP_MULTIPLIER,
            charging: false,
            pending: false,
        };
        charge.configure(settings);
        charge
    }

    /// Replace the tuning. Min is floored at 0.1 and max is never below min.
    pub fn configure(&mut self, settings: ChargeSettings) {
        self.min_multiplier = settings.min_multiplier.max(MIN_JUMP_MULTIPLIER);
        self.max_multiplier = settings.max_multiplier.max(self.min_multiplier);
        self.max_charge_time = settings.max_charge_time.max(0.0);
        self.reset();
    }

    /// Start charging. Returns false if a charge is already running.
    pub fn begin(&mut self) -> bool {
        if self.charging {
            return false;
        }
        self.charging = true;
        self.pending = false;
        self.elapsed = 0.0;
        self.multiplier = self.multiplier_at(0.0);
        true
    }

    /// Advance a running charge by `dt` and return the current multiplier
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !self.charging {
            return self.multiplier;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.max_charge_time);
        self.multiplier = self.multiplier_at(self.elapsed);
        self.multiplier
    }

    /// Stop charging and mark the result pending. Returns false if nothing
    /// was charging.
    pub fn release(&mut self) -> bool {
        if !self.charging {
            return false;
        }
        self.charging = false;
        self.pending = true;
        true
    }

    /// Drop a running charge without producing a result
    pub fn cancel(&mut self) {
        self.charging = false;
        self.elapsed = 0.0;
        self.multiplier = self.min_multiplier;
    }

    /// Take the pending result, if a release produced one
    pub fn take_pending(&mut self) -> Option<f32> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        let multiplier = self.multiplier;
        self.elapsed = 0.0;
        self.multiplier = self.min_multiplier;
        Some(multiplier)
    }

    /// Pending result or the minimum multiplier
    pub fn take_multiplier_or_min(&mut self) -> f32 {
        self.take_pending().unwrap_or(self.min_multiplier)
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.pending = false;
    }

    /// Multiplier after holding for `elapsed`. No charge time means instant max.
    pub fn multiplier_at(&self, elapsed: f32) -> f32 {
        let t = inverse_lerp01(0.0, self.max_charge_time, elapsed);
        lerp(self.min_multiplier, self.max_multiplier, t)
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn min_multiplier(&self) -> f32 {
        self.min_multiplier
    }

    pub fn max_multiplier(&self) -> f32 {
        self.max_multiplier
    }

    /// Charge progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.max_charge_time <= 0.0 {
            return if self.charging { 1.0 } else { 0.0 };
        }
        clamp01(self.elapsed / self.max_charge_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settings(min: f32, max: f32, time: f32) -> ChargeSettings {
        ChargeSettings {
            min_multiplier: min,
            max_multiplier: max,
            max_charge_time: time,
        }
    }

    #[test]
    fn test_multiplier_never_decreases_and_saturates() {
        let mut charge = ChargeJump::new(settings(1.0, 2.5, 1.0));
        charge.begin();

        let mut last = charge.multiplier();
        for _ in 0..120 {
            let next = charge.advance(1.0 / 60.0);
            assert!(next >= last);
            last = next;
        }
        assert_relative_eq!(last, 2.5);
        assert_relative_eq!(charge.elapsed(), 1.0);
    }

    #[test]
    fn test_half_charge_is_linear() {
        let mut charge = ChargeJump::new(settings(1.0, 3.0, 2.0));
        charge.begin();
        charge.advance(1.0);
        assert_relative_eq!(charge.multiplier(), 2.0);
    }

    #[test]
    fn test_zero_elapsed_release_yields_min() {
        let mut charge = ChargeJump::new(settings(1.2, 2.5, 1.0));
        charge.begin();
        assert!(charge.release());
        assert_relative_eq!(charge.take_multiplier_or_min(), 1.2);
    }

    #[test]
    fn test_min_is_floored() {
        let mut charge = ChargeJump::new(settings(0.0, -1.0, 1.0));
        charge.begin();
        charge.advance(0.5);
        assert!(charge.multiplier() >= MIN_JUMP_MULTIPLIER);
        assert_relative_eq!(charge.max_multiplier(), MIN_JUMP_MULTIPLIER);
    }

    #[test]
    fn test_no_charge_time_means_max() {
        let mut charge = ChargeJump::new(settings(1.0, 2.0, 0.0));
        charge.begin();
        assert_relative_eq!(charge.advance(0.0), 2.0);
    }

    #[test]
    fn test_cancel_drops_result() {
        let mut charge = ChargeJump::default();
        charge.begin();
        charge.advance(0.3);
        charge.cancel();

        assert!(!charge.release());
        assert_eq!(charge.take_pending(), None);
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut charge = ChargeJump::default();
        assert!(charge.begin());
        assert!(!charge.begin());
    }

    #[test]
    fn test_pending_is_taken_once() {
        let mut charge = ChargeJump::default();
        charge.begin();
        charge.advance(0.5);
        charge.release();

        assert!(charge.take_pending().is_some());
        assert_eq!(charge.take_pending(), None);
        assert_relative_eq!(charge.take_multiplier_or_min(), charge.min_multiplier());
    }
}
