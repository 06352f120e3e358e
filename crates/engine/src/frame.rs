//! Frame schedulers.
//!
//! A scheduler calls the frame callback once per frame with the milliseconds elapsed since
//! the previous frame, until it runs out of frames or the callback asks to stop.

use std::thread;
use std::time::{Duration, Instant};

use blockfall_types::TICK_MS;

/// Returned by the frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Source of frame timing.
pub trait FrameScheduler {
    /// Drive `frame` until done; returns the number of frames run.
    fn run(&mut self, frame: &mut dyn FnMut(u32) -> FrameControl) -> u64;
}

/// Fixed step, fixed count, no sleeping. Runs as fast as the host can go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedFrames {
    step_ms: u32,
    frames: u64,
}

impl SimulatedFrames {
    pub fn new(step_ms: u32, frames: u64) -> Self {
        Self { step_ms, frames }
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for SimulatedFrames {
    fn default() -> Self {
        Self::new(TICK_MS, 3600)
    }
}

impl FrameScheduler for SimulatedFrames {
    fn run(&mut self, frame: &mut dyn FnMut(u32) -> FrameControl) -> u64 {
        let mut ran = 0;
        while ran < self.frames {
            ran += 1;
            if frame(self.step_ms) == FrameControl::Stop {
                break;
            }
        }
        ran
    }
}

/// Replays an explicit list of elapsed times, one per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedFrames {
    elapsed: Vec<u32>,
}

impl ScriptedFrames {
    pub fn new(elapsed: Vec<u32>) -> Self {
        Self { elapsed }
    }
}

impl FrameScheduler for ScriptedFrames {
    fn run(&mut self, frame: &mut dyn FnMut(u32) -> FrameControl) -> u64 {
        let mut ran = 0;
        for &elapsed_ms in &self.elapsed {
            ran += 1;
            if frame(elapsed_ms) == FrameControl::Stop {
                break;
            }
        }
        ran
    }
}

/// Wall-clock frames: sleeps to a fixed step and reports the real time elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealtimeFrames {
    step: Duration,
    max_frames: Option<u64>,
}

impl RealtimeFrames {
    pub fn new(step_ms: u32) -> Self {
        Self {
            step: Duration::from_millis(step_ms.max(1) as u64),
            max_frames: None,
        }
    }

    /// Stop after `frames` frames even if the callback never asks to.
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }
}

impl Default for RealtimeFrames {
    fn default() -> Self {
        Self::new(TICK_MS)
    }
}

impl FrameScheduler for RealtimeFrames {
    fn run(&mut self, frame: &mut dyn FnMut(u32) -> FrameControl) -> u64 {
        let mut ran = 0;
        let mut last = Instant::now();

        loop {
            if self.max_frames.is_some_and(|max| ran >= max) {
                break;
            }

            // Sleep until the next step boundary.
            let wait = self.step.checked_sub(last.elapsed()).unwrap_or(Duration::ZERO);
            if !wait.is_zero() {
                thread::sleep(wait);
            }

            let now = Instant::now();
            let elapsed_ms = now.duration_since(last).as_millis().min(u32::MAX as u128) as u32;
            last = now;

            ran += 1;
            if frame(elapsed_ms) == FrameControl::Stop {
                break;
            }
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_runs_fixed_frames() {
        let mut seen = Vec::new();
        let ran = SimulatedFrames::new(16, 5).run(&mut |ms| {
            seen.push(ms);
            FrameControl::Continue
        });
        assert_eq!(ran, 5);
        assert_eq!(seen, vec![16; 5]);
    }

    #[test]
    fn test_simulated_stops_early() {
        let mut count = 0;
        let ran = SimulatedFrames::new(16, 100).run(&mut |_| {
            count += 1;
            if count == 3 {
                FrameControl::Stop
            } else {
                FrameControl::Continue
            }
        });
        assert_eq!(ran, 3);
    }

    #[test]
    fn test_scripted_replays_elapsed_list() {
        let mut seen = Vec::new();
        let ran = ScriptedFrames::new(vec![0, 250, 1000]).run(&mut |ms| {
            seen.push(ms);
            FrameControl::Continue
        });
        assert_eq!(ran, 3);
        assert_eq!(seen, vec![0, 250, 1000]);
    }

    #[test]
    fn test_realtime_respects_max_frames() {
        let mut total = 0u32;
        let ran = RealtimeFrames::new(1).with_max_frames(3).run(&mut |ms| {
            total += ms;
            FrameControl::Continue
        });
        assert_eq!(ran, 3);
        assert!(total >= 2);
    }
}
