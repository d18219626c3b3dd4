//! Fixed-timestep accumulator
//!
//! Converts host frame timestamps into a whole number of simulation ticks.

use crate::consts::{MAX_BACKLOG_MS, TICK_MS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step_ms: f64,
    max_backlog_ms: f64,
    accumulator: f64,
    last_timestamp: Option<f64>,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(MAX_BACKLOG_MS)
    }
}

impl FixedTimestep {
    /// 60 Hz stepping with the given catch-up clamp
    pub fn new(max_backlog_ms: f64) -> Self {
        Self {
            step_ms: TICK_MS,
            max_backlog_ms: max_backlog_ms.max(TICK_MS),
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Unconsumed time, always below one step after `advance`
    pub fn backlog_ms(&self) -> f64 {
        self.accumulator
    }

    /// Feed a monotonic frame timestamp; returns how many ticks to run.
    ///
    /// The first call only establishes the time base.
    pub fn advance(&mut self, timestamp_ms: f64) -> u32 {
        let elapsed = match self.last_timestamp {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.push_elapsed(elapsed)
    }

    /// Feed an elapsed duration directly
    pub fn push_elapsed(&mut self, elapsed_ms: f64) -> u32 {
        // Clocks that step backwards contribute nothing
        self.accumulator += elapsed_ms.max(0.0);
        if self.accumulator > self.max_backlog_ms {
            log::debug!(
                "Frame backlog {:.1}ms clamped to {:.1}ms",
                self.accumulator,
                self.max_backlog_ms
            );
            self.accumulator = self.max_backlog_ms;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step_ms {
            self.accumulator -= self.step_ms;
            ticks += 1;
        }
        ticks
    }

    /// Forget the time base (e.g. after the host was suspended)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_timestamp = None;
    }
}
