use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::speed::{DEFAULT_DELAY_MS, DELAY_FLOOR_MS};

/// Largest accepted board edge. Keeps coordinates comfortably inside `i32`
/// and the board inside a reasonable terminal.
pub const MAX_GRID_SIZE: usize = 100;

/// How a new food cell is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPlacement {
    /// Any cell of the grid, even one under the snake
    Uniform,
    /// Re-roll until the cell is not covered by the snake
    #[default]
    AvoidSnake,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be between 1 and {max}, got {size}")]
    GridSize { size: usize, max: usize },
    #[error("initial delay must be positive")]
    ZeroDelay,
    #[error("delay floor must be between 1 and the initial delay ({initial} ms), got {floor}")]
    DelayFloor { floor: u64, initial: u64 },
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the square, 1-indexed grid
    pub grid_size: usize,
    /// Tick period at the start of every game, in milliseconds
    pub initial_delay_ms: u64,
    /// The speed ramp never shortens the tick period below this
    pub delay_floor_ms: u64,
    pub food_placement: FoodPlacement,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_delay_ms: DEFAULT_DELAY_MS,
            delay_floor_ms: DELAY_FLOOR_MS,
            food_placement: FoodPlacement::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridSize {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.initial_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay);
        }
        if self.delay_floor_ms == 0 || self.delay_floor_ms > self.initial_delay_ms {
            return Err(ConfigError::DelayFloor {
                floor: self.delay_floor_ms,
                initial: self.initial_delay_ms,
            });
        }
        Ok(())
    }
}
