//=========================================================================
// Runner Configuration
//=========================================================================
//
// Tunables for the game and the runtime, loaded from a RON file.
//
// Every field has a default, so a config file only needs the values it
// changes:
//
// ```ron
// (
//     initial_speed: 6.5,
//     player: (jump_force: 9.0),
// )
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ConfigError =========================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file")]
    Io(#[from] std::io::Error),
    #[error("config file is not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

//=== PlayerTuning ========================================================

/// Physical feel of the player character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Downward acceleration while airborne, units/s².
    pub gravity: f32,
    /// Upward velocity applied by a jump, units/s.
    pub jump_force: f32,
    /// Horizontal velocity at full axis deflection, units/s.
    pub move_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            gravity: 9.81 * 2.0,
            jump_force: 8.0,
            move_speed: 5.0,
        }
    }
}

//=== RunnerConfig ========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Game speed at the start of every run.
    pub initial_speed: f32,
    /// Identifier sent with every final score report.
    pub game_id: u32,
    /// Persistence key of the high score.
    pub high_score_key: String,
    pub player: PlayerTuning,
    /// Logic ticks per second.
    pub tps: f64,
    /// Capacity of the platform → logic channel.
    pub channel_capacity: usize,
    /// Where the high score is stored; see [`RunnerConfig::resolved_save_path`].
    pub save_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            initial_speed: 5.0,
            game_id: 2,
            high_score_key: "hiscore".to_string(),
            player: PlayerTuning::default(),
            tps: 60.0,
            channel_capacity: 128,
            save_path: None,
        }
    }
}

impl RunnerConfig {
    /// Reads, parses and validates a RON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parses and validates RON text.
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("initial_speed", self.initial_speed)?;
        non_negative("player.gravity", self.player.gravity)?;
        non_negative("player.jump_force", self.player.jump_force)?;
        non_negative("player.move_speed", self.player.move_speed)?;

        if !(self.tps.is_finite() && self.tps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "tps",
                reason: format!("must be positive, got {}", self.tps),
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "channel_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.high_score_key.is_empty() {
            return Err(ConfigError::Invalid {
                field: "high_score_key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The configured save path, else `<data dir>/endless-runner/save.ron`,
    /// else `./save.ron`.
    pub fn resolved_save_path(&self) -> PathBuf {
        if let Some(path) = &self.save_path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("endless-runner"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("save.ron")
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite non-negative number, got {}", value),
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
