//! Engine configuration
//!
//! All values are fixed for the lifetime of a game; the player cannot tune them.
//! A config can be built from defaults, parsed from TOML, or loaded from a file.
//! Missing keys fall back to the defaults.
//!
//! ```toml
//! width = 10
//! height = 20
//! base_interval_ms = 1000
//! min_interval_ms = 100
//! step_ms = 100
//! pieces = ["I", "O", "T", "S", "Z", "J", "L"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    PieceKind, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MIN_MS, DROP_STEP_MS,
};

/// Largest accepted width or height; coordinates are `i16`.
pub const MAX_DIMENSION: u16 = i16::MAX as u16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    /// Drop interval at level 1
    pub base_interval_ms: u32,
    /// Drop interval floor
    pub min_interval_ms: u32,
    /// Interval reduction per level
    pub step_ms: u32,
    /// Kinds the piece factory draws from
    pub pieces: Vec<PieceKind>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            base_interval_ms: BASE_DROP_MS,
            min_interval_ms: DROP_INTERVAL_MIN_MS,
            step_ms: DROP_STEP_MS,
            pieces: PieceKind::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Check every value that would break the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.width, self.height)?;

        if self.pieces.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.min_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval(
                "min_interval_ms must be positive".to_string(),
            ));
        }
        if self.base_interval_ms < self.min_interval_ms {
            return Err(ConfigError::InvalidInterval(format!(
                "base_interval_ms ({}) is below min_interval_ms ({})",
                self.base_interval_ms, self.min_interval_ms
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_dimensions(width: u16, height: u16) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ConfigError::BoardTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
