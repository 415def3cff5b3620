//! Frame-counted countdown used for spawn cadence, fire cooldown and the
//! velocity ramp.
//!
//! The timer never samples a wall clock: one `update()` is one tick, so a
//! fixed tick rate makes it fully deterministic.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    current_ticks: u32,
    target_ticks: u32,
}

impl Timer {
    /// Arm a deadline `duration` in the future, measured in ticks of
    /// `ticks_per_second`.
    pub fn new(duration: Duration, ticks_per_second: u32) -> Self {
        let ticks = (duration.as_secs_f64() * f64::from(ticks_per_second)).round();
        Self::from_ticks(ticks as u32)
    }

    pub fn from_ticks(target_ticks: u32) -> Self {
        Self {
            current_ticks: 0,
            target_ticks,
        }
    }

    /// Advance by one tick.  Saturates once ready.
    pub fn update(&mut self) {
        if self.current_ticks < self.target_ticks {
            self.current_ticks += 1;
        }
    }

    /// True once the full duration has elapsed.  Does not re-arm: the caller
    /// is expected to `reset()` right after acting on it.
    pub fn is_ready(&self) -> bool {
        self.current_ticks >= self.target_ticks
    }

    pub fn reset(&mut self) {
        self.current_ticks = 0;
    }

    /// Ticks left before `is_ready()` flips to true.
    pub fn remaining_ticks(&self) -> u32 {
        self.target_ticks - self.current_ticks
    }

    pub fn target_ticks(&self) -> u32 {
        self.target_ticks
    }

    /// Jump straight to the deadline.
    pub fn force_ready(&mut self) {
        self.current_ticks = self.target_ticks;
    }
}
