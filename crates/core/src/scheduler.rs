//! Drop scheduler - gravity timing
//!
//! Accumulates elapsed time and fires one drop attempt whenever the accumulator reaches
//! the interval, then starts over from zero. At most one drop fires per tick, and any
//! excess time past the interval is discarded. The controller stops calling
//! [`DropScheduler::tick`] while paused and calls [`DropScheduler::reset`] on resume,
//! so a resumed game measures a full fresh interval.

/// Time-driven source of automatic drops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropScheduler {
    interval_ms: u32,
    accumulated_ms: u32,
}

impl DropScheduler {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Change the cadence; time already accumulated counts towards the new interval.
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Forget accumulated time.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    /// Advance by `elapsed_ms`; returns true when a drop is due.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }
}
