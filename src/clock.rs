//! Fixed timestep accumulator
//!
//! Wall-clock frame deltas go in, whole simulation steps come out. Frame
//! deltas are clamped so a stalled tab does not trigger a burst of catch-up
//! ticks.

use crate::consts::{MAX_FRAME_DELTA, SIM_DT};

/// Slack when comparing the accumulator against a whole step
const STEP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_delta: f64,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DELTA)
    }
}

impl FixedTimestep {
    pub fn new(step: f64, max_delta: f64) -> Self {
        Self {
            step,
            max_delta,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Step duration in milliseconds
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time carried over to the next frame
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Restart timing at `now`, dropping any carried time
    pub fn reset(&mut self, now: f64) {
        self.accumulator = 0.0;
        self.last_time = Some(now);
    }

    /// Add raw elapsed time
    pub fn push(&mut self, delta: f64) {
        self.accumulator += delta;
    }

    /// Record a frame timestamp and accumulate the clamped delta since the last one
    ///
    /// Returns the delta that was accumulated.
    pub fn frame(&mut self, now: f64) -> f64 {
        let delta = match self.last_time {
            Some(last) => (now - last).clamp(0.0, self.max_delta),
            None => 0.0,
        };
        self.last_time = Some(now);
        self.push(delta);
        delta
    }

    /// Take one step's worth of time if available
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator + STEP_EPSILON < self.step {
            return false;
        }
        self.accumulator = (self.accumulator - self.step).max(0.0);
        true
    }

    /// Drain every whole step, returning how many were taken
    pub fn drain(&mut self) -> u32 {
        let mut steps = 0;
        while self.consume_step() {
            steps += 1;
        }
        steps
    }
}
