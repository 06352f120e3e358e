//! Host-side plumbing around the core game: frame timing and the per-frame driver.
//!
//! The core never owns a clock. A [`FrameScheduler`] produces a sequence of elapsed-time
//! values, and a [`GameDriver`] turns each one into a frame: queued commands first, then
//! gravity, then event dispatch.

pub mod driver;
pub mod frame;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use driver::{FrameReport, GameDriver, RunSummary};
pub use frame::{FrameControl, FrameScheduler, RealtimeFrames, ScriptedFrames, SimulatedFrames};
