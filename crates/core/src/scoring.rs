//! Scoring module - line clear points and level progression
//!
//! Rules:
//! - A clear of `n` lines at level `L` is worth `LINE_SCORES[n] * L`.
//! - `L` is the level the clear happened at, before this clear's lines are counted.
//! - Level is `total_lines / 10 + 1`, so games start at level 1.
//! - Drop interval is `max(min, base - (level - 1) * step)`.

use crate::config::EngineConfig;
use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared (0-4; larger counts score nothing)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32, base_ms: u32, step_ms: u32, min_ms: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(step_ms);
    base_ms.saturating_sub(reduction).max(min_ms)
}

/// Cumulative score. Only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreKeeper {
    score: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add the points for a clear and return the delta.
    pub fn award(&mut self, lines: usize, level: u32) -> u32 {
        let delta = calculate_line_score(lines, level);
        self.score = self.score.saturating_add(delta);
        delta
    }
}

/// Emitted when a clear pushes the game into a higher level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub drop_interval_ms: u32,
}

/// Tracks cumulative lines, the derived level and its drop interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelController {
    lines: u32,
    level: u32,
    base_ms: u32,
    step_ms: u32,
    min_ms: u32,
}

impl LevelController {
    pub fn new(base_ms: u32, step_ms: u32, min_ms: u32) -> Self {
        Self {
            lines: 0,
            level: 1,
            base_ms,
            step_ms,
            min_ms,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.base_interval_ms,
            config.step_ms,
            config.min_interval_ms,
        )
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Drop interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level, self.base_ms, self.step_ms, self.min_ms)
    }

    /// Count cleared lines; returns the new level and interval if the level went up.
    pub fn record_lines(&mut self, cleared: u32) -> Option<LevelUp> {
        self.lines = self.lines.saturating_add(cleared);
        let level = calculate_level(self.lines);
        if level <= self.level {
            return None;
        }

        self.level = level;
        Some(LevelUp {
            level,
            drop_interval_ms: self.drop_interval_ms(),
        })
    }
}

impl Default for LevelController {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
