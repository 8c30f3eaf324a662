// Fixed-step frame clock
//
// Each frame runs one variable-dt logic tick and zero or more fixed physics
// steps. Elapsed wall time accumulates and is paid out in whole steps, capped
// per frame so a long stall cannot snowball into ever longer frames.
use std::time::Instant;

use log::info;

/// Physics step length (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Most physics steps run in one frame; any further backlog is dropped
pub const MAX_STEPS_PER_FRAME: u32 = 5;

/// Longest logic dt handed out, so a debugger pause is not one giant tick
const MAX_FRAME_DELTA: f32 = 0.25;

pub struct FrameClock {
    accumulator: f32,
    last_frame: Instant,
    paused: bool,
    frame_delta: f32,
    frame_count: u64,
    step_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_frame: Instant::now(),
            paused: false,
            frame_delta: 0.0,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Start a frame from the wall clock. Returns the number of fixed steps to run.
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Start a frame that lasted `frame_time` seconds
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.frame_count += 1;

        let frame_time = if frame_time.is_finite() {
            frame_time.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };

        if self.paused {
            self.frame_delta = 0.0;
            return 0;
        }

        self.frame_delta = frame_time;
        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP);
        }

        self.step_count += u64::from(steps);
        steps
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Logic dt for this frame; zero while paused
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// Fraction of a step left in the accumulator, for interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / FIXED_TIMESTEP).clamp(0.0, 1.0)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // No burst of catch-up steps after a pause
            self.accumulator = 0.0;
            self.last_frame = Instant::now();
            info!("resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.step_count(), 0);
        assert!(!clock.is_paused());
        assert!((clock.fixed_timestep() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_steps_accumulate_across_frames() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(FIXED_TIMESTEP * 0.6), 0);
        assert_eq!(clock.advance(FIXED_TIMESTEP * 0.6), 1);
        assert_eq!(clock.step_count(), 1);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.2), MAX_STEPS_PER_FRAME);
        // Backlog beyond the cap is dropped
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_paused_runs_nothing() {
        let mut clock = FrameClock::new();
        clock.pause();
        assert_eq!(clock.advance(0.1), 0);
        assert_eq!(clock.frame_delta(), 0.0);

        clock.toggle_pause();
        assert!(!clock.is_paused());
        assert_eq!(clock.advance(FIXED_TIMESTEP * 2.5), 2);
    }

    #[test]
    fn test_bad_frame_time_is_ignored() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.frame_delta(), 0.0);
    }

    #[test]
    fn test_alpha_range() {
        let mut clock = FrameClock::new();
        clock.advance(FIXED_TIMESTEP * 1.5);
        let alpha = clock.alpha();
        assert!((0.0..=1.0).contains(&alpha));
        assert!((alpha - 0.5).abs() < 1e-3);
    }
}
