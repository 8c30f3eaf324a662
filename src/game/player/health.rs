// Player health pool

/// Result of a damage application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Nothing happened (non-positive amount or already depleted)
    Ignored,
    /// Health dropped but the player is still alive
    Damaged { remaining: i32 },
    /// This hit emptied the pool
    Died,
}

impl DamageOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Died)
    }
}

/// Integer (current, max) health pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Full health pool. `max` is floored at 1.
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if amount <= 0 || self.is_depleted() {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount).max(0);
        if self.is_depleted() {
            DamageOutcome::Died
        } else {
            DamageOutcome::Damaged {
                remaining: self.current,
            }
        }
    }

    /// Empty the pool regardless of its current value
    pub fn drain(&mut self) -> DamageOutcome {
        if self.is_depleted() {
            return DamageOutcome::Ignored;
        }
        self.current = 0;
        DamageOutcome::Died
    }

    /// Restore up to `amount`, never past max. Returns the new current value.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount > 0 {
            self.current = (self.current + amount).min(self.max);
        }
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_until_death() {
        let mut health = Health::new(3);
        assert_eq!(health.take_damage(1), DamageOutcome::Damaged { remaining: 2 });
        assert_eq!(health.take_damage(5), DamageOutcome::Died);
        assert_eq!(health.current(), 0);
        assert_eq!(health.take_damage(1), DamageOutcome::Ignored);
    }

    #[test]
    fn test_non_positive_damage_is_ignored() {
        let mut health = Health::new(3);
        assert_eq!(health.take_damage(0), DamageOutcome::Ignored);
        assert_eq!(health.take_damage(-2), DamageOutcome::Ignored);
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(3);
        health.take_damage(2);
        assert_eq!(health.heal(10), 3);
        assert_eq!(health.heal(-1), 3);
    }

    #[test]
    fn test_drain_kills_at_full_health() {
        let mut health = Health::new(5);
        assert!(health.drain().is_fatal());
        assert!(health.is_depleted());
        health.reset();
        assert_eq!(health.current(), 5);
    }

    #[test]
    fn test_max_is_floored() {
        assert_eq!(Health::new(0).max(), 1);
    }
}
