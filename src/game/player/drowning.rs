// Drowning timer for forms that cannot swim

/// What a drowning tick observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrowningStatus {
    /// Not submerged and no timer running
    Dry,
    /// Submerged this tick for the first time
    Started,
    /// Still submerged, timer running
    Drowning,
    /// Left the water before the timer elapsed
    Cancelled,
    /// Timer elapsed; the player must die
    Drowned,
}

impl DrowningStatus {
    /// Whether gravity and input should be suppressed this tick
    pub fn is_submerged(&self) -> bool {
        matches!(self, Self::Started | Self::Drowning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrowningTimer {
    drown_time: f32,
    elapsed: f32,
    active: bool,
}

impl DrowningTimer {
    pub fn new(drown_time: f32) -> Self {
        Self {
            drown_time: drown_time.max(0.0),
            elapsed: 0.0,
            active: false,
        }
    }

    /// Advance the timer. `submerged` is true when the water sensor fires
    /// and the active form cannot swim.
    pub fn tick(&mut self, submerged: bool, dt: f32) -> DrowningStatus {
        if !submerged {
            if self.active {
                self.reset();
                return DrowningStatus::Cancelled;
            }
            return DrowningStatus::Dry;
        }

        let started = !self.active;
        if started {
            self.active = true;
            self.elapsed = 0.0;
        } else {
            self.elapsed += dt.max(0.0);
        }

        if self.elapsed >= self.drown_time {
            self.reset();
            return DrowningStatus::Drowned;
        }

        if started {
            DrowningStatus::Started
        } else {
            DrowningStatus::Drowning
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn drown_time(&self) -> f32 {
        self.drown_time
    }

    pub fn remaining(&self) -> f32 {
        (self.drown_time - self.elapsed).max(0.0)
    }
}

impl Default for DrowningTimer {
    fn default() -> Self {
        Self::new(2.0)
    }
}
