//! Fixed-step clock
//!
//! Converts variable frame deltas into a whole number of simulation ticks.
//! The ticker is an owned resource: it only produces ticks while started and
//! is stopped on drop.

use crate::consts::{MAX_FRAME_SECS, MAX_SUBSTEPS, TICK_SECS};

#[derive(Debug)]
pub struct Ticker {
    interval: f32,
    accumulator: f32,
    running: bool,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_SECS)
    }
}

impl Ticker {
    /// A stopped ticker with the given interval (seconds)
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("Ticker started ({} ms)", (self.interval * 1000.0).round());
        }
        self.running = true;
    }

    /// Stop producing ticks and drop any partial tick
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Ticker stopped");
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Feed elapsed wall time; returns how many ticks are due now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !self.running || self.interval <= 0.0 {
            return 0;
        }
        // NaN/inf would poison the accumulator for good
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_SECS);

        let mut due = 0;
        while self.accumulator >= self.interval && due < MAX_SUBSTEPS {
            self.accumulator -= self.interval;
            due += 1;
        }
        // Anything beyond the substep cap is dropped
        if due == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.interval);
        }
        due
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
