//! Error types for engine construction and board writes.
//!
//! Gameplay never produces errors: blocked moves are no-ops and game over is a phase.
//! What remains is misconfiguration at construction time and the board's own
//! bounds check on `merge`.

use std::io;

use thiserror::Error;

/// Construction-time misconfiguration. Raised before any gameplay starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u16, height: u16 },
    #[error("board dimensions {width}x{height} exceed the maximum of {max}")]
    BoardTooLarge { width: u16, height: u16, max: u16 },
    #[error(
        "board is {width}x{height} but the game is configured for \
         {expected_width}x{expected_height}"
    )]
    BoardMismatch {
        width: u16,
        height: u16,
        expected_width: u16,
        expected_height: u16,
    },
    #[error("piece catalog is empty")]
    EmptyCatalog,
    #[error("invalid drop interval: {0}")]
    InvalidInterval(String),
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Raised by [`Board::merge`](crate::board::Board::merge) when asked to write outside
/// the grid. Callers validate positions first, so this signals a broken invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i16, y: i16 },
}
