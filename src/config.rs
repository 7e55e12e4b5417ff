// Game configuration - timing and scoring constants
// Defaults match the hardware build; a JSON file can override them

use crate::hal::Millis;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Timing and scoring parameters for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// How long each slot's LED stays lit during sequence display
    pub flash_on_ms: Millis,
    /// Gap between one slot going dark and the next lighting up
    pub flash_gap_ms: Millis,
    /// Time budget per expected input before the round is forfeit
    pub input_timeout_ms: Millis,
    /// How long the level-complete screen is held
    pub level_complete_hold_ms: Millis,
    /// How long the game-over screen is held before restarting
    pub game_over_hold_ms: Millis,
    /// How long all LEDs stay lit after a failed round
    pub fail_flash_ms: Millis,
    /// Points per correct input
    pub step_score: u32,
    /// Points added on completing a level
    pub level_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flash_on_ms: 400,
            flash_gap_ms: 600,
            input_timeout_ms: 5000,
            level_complete_hold_ms: 2000,
            game_over_hold_ms: 3000,
            fail_flash_ms: 500,
            step_score: 10,
            level_bonus: 100,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every duration is usable
    ///
    /// A zero flash or timeout would collapse the show/input phases into a
    /// single tick and make the game unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("flash_on_ms", self.flash_on_ms),
            ("flash_gap_ms", self.flash_gap_ms),
            ("input_timeout_ms", self.input_timeout_ms),
            ("level_complete_hold_ms", self.level_complete_hold_ms),
            ("game_over_hold_ms", self.game_over_hold_ms),
            ("fail_flash_ms", self.fail_flash_ms),
        ];

        for (name, value) in durations {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be > 0", name)));
            }
        }

        if self.fail_flash_ms >= self.game_over_hold_ms {
            return Err(ConfigError::Invalid(
                "fail_flash_ms must be shorter than game_over_hold_ms".to_string(),
            ));
        }

        Ok(())
    }
}
