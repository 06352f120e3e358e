//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on rendering, input devices, or clocks:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Any host that can call `tick(elapsed_ms)` can run it
//!
//! # Module Structure
//!
//! - [`board`]: W x H grid of locked cells and line clearing
//! - [`collision`]: the single legality check for piece positions
//! - [`config`]: engine configuration, loaded from TOML
//! - [`game_state`]: the controller owning all mutable state
//! - [`pieces`]: shape matrices and clockwise rotation
//! - [`rng`]: random sources and the uniform piece factory
//! - [`scheduler`]: gravity timing
//! - [`scoring`]: line clear points, levels and drop intervals
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Uniform draws**: every spawn picks a kind uniformly from the catalog
//! - **Plain rotation**: clockwise only, rejected outright if it collides (no kicks)
//! - **Immediate lock**: a piece that cannot move down locks on that attempt
//! - **Scoring**: 40/100/300/1200 for 1-4 lines, times the current level
//!
//! # Example
//!
//! ```
//! use blockfall_core::{DropOutcome, GameState};
//! use blockfall_core::types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//!
//! // Gravity fires once the level's interval has elapsed.
//! assert_eq!(game.tick(1000), DropOutcome::Moved);
//! assert_eq!(game.level(), 1);
//! ```
//!
//! # Timing
//!
//! The host owns the clock and calls
//! [`GameState::tick`](game_state::GameState::tick) with the milliseconds elapsed since
//! the previous call. Pending commands should be applied before that frame's tick.

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::is_valid_position;
pub use config::EngineConfig;
pub use error::{BoardError, ConfigError};
pub use game_state::{DropOutcome, GameState};
pub use pieces::{get_shape, rotate, Shape, Tetromino};
pub use rng::{PieceFactory, RandomSource, ScriptedRng, SimpleRng};
pub use scheduler::DropScheduler;
pub use scoring::{calculate_level, calculate_line_score, LevelController, ScoreKeeper};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
