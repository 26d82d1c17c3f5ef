//! Game configuration
//!
//! The fixed set of board, speed and palette parameters consumed when a
//! session is created. Never mutated mid-session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::storage::KeyValueStorage;
use crate::sim::grid::{Direction, Position, in_bounds};

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("canvas {width}x{height} is not a whole number of {cell}px cells")]
    UnevenGrid { width: u32, height: u32, cell: u32 },
    #[error("cell size must be positive")]
    ZeroCell,
    #[error("minimum speed {min} must be positive and not above initial speed {initial}")]
    SpeedRange { min: u32, initial: u32 },
    #[error("speed increment {0} must be in (0, 1]")]
    SpeedIncrement(f64),
    #[error("speed-up interval must be positive")]
    ZeroInterval,
    #[error("initial snake does not fit on the board with room for food")]
    SnakeOutOfBounds,
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canvas colors (CSS color strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub grid: String,
    pub snake_head: String,
    pub snake_body: String,
    pub food: String,
    pub food_glow: String,
    pub text: String,
    pub text_secondary: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#1a1a2e".into(),
            grid: "#16213e".into(),
            snake_head: "#4ecca3".into(),
            snake_body: "#3dbb8f".into(),
            food: "#ee4266".into(),
            food_glow: "#ff6b9d".into(),
            text: "#ffffff".into(),
            text_secondary: "#eeeeee".into(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// Canvas size in pixels
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Pixel size of one grid cell
    pub cell_size: u32,

    // === Speed ===
    /// Starting tick interval (ms)
    pub initial_speed: u32,
    /// Multiplier applied to the interval on each speed-up
    pub speed_increment: f64,
    /// Foods eaten between speed-ups
    pub speed_up_interval: u32,
    /// Interval floor (ms)
    pub min_speed: u32,

    // === Snake ===
    pub initial_length: usize,
    pub initial_head: Position,
    pub initial_direction: Direction,

    /// Points per food
    pub food_score: u64,

    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: CELL_SIZE,

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_up_interval: SPEED_UP_INTERVAL,
            min_speed: MIN_SPEED,

            initial_length: INITIAL_SNAKE_LENGTH,
            initial_head: Position::new(INITIAL_HEAD.0, INITIAL_HEAD.1),
            initial_direction: Direction::Right,

            food_score: FOOD_SCORE,

            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Board width in cells
    pub fn cols(&self) -> i32 {
        (self.canvas_width / self.cell_size.max(1)) as i32
    }

    /// Board height in cells
    pub fn rows(&self) -> i32 {
        (self.canvas_height / self.cell_size.max(1)) as i32
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCell);
        }
        if self.canvas_width % self.cell_size != 0 || self.canvas_height % self.cell_size != 0 {
            return Err(ConfigError::UnevenGrid {
                width: self.canvas_width,
                height: self.canvas_height,
                cell: self.cell_size,
            });
        }
        if self.min_speed == 0 || self.min_speed > self.initial_speed {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                initial: self.initial_speed,
            });
        }
        if !(self.speed_increment > 0.0 && self.speed_increment <= 1.0) {
            return Err(ConfigError::SpeedIncrement(self.speed_increment));
        }
        if self.speed_up_interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        // Body trails behind the head and must leave room for food
        let cells = (self.cols() as usize) * (self.rows() as usize);
        if self.initial_length == 0 || self.initial_length >= cells {
            return Err(ConfigError::SnakeOutOfBounds);
        }
        let tail = self.initial_head
            - self.initial_direction.delta() * (self.initial_length as i32 - 1);
        let (cols, rows) = (self.cols(), self.rows());
        if !in_bounds(self.initial_head, cols, rows) || !in_bounds(tail, cols, rows) {
            return Err(ConfigError::SnakeOutOfBounds);
        }
        Ok(())
    }

    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an override from storage, falling back to defaults
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        match storage.get(CONFIG_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config override ({}x{} cells)", config.cols(), config.rows());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring stored config: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Config storage unavailable: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;

    #[test]
    fn test_default_board_is_30_by_30() {
        let config = GameConfig::default();
        assert_eq!(config.cols(), 30);
        assert_eq!(config.rows(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = GameConfig::from_json(r#"{"initial_speed": 200}"#).unwrap();
        assert_eq!(config.initial_speed, 200);
        assert_eq!(config.min_speed, MIN_SPEED);
        assert_eq!(config.cell_size, CELL_SIZE);
    }

    #[test]
    fn test_validate_rejects_bad_speed_range() {
        let config = GameConfig {
            min_speed: 300,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedRange { min: 300, initial: INITIAL_SPEED })
        ));
    }

    #[test]
    fn test_validate_rejects_snake_off_board() {
        let config = GameConfig {
            initial_head: Position::new(1, 10),
            initial_length: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SnakeOutOfBounds)));
    }

    #[test]
    fn test_validate_rejects_uneven_grid() {
        let config = GameConfig {
            canvas_width: 610,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnevenGrid { .. })));
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let storage = MemoryStorage::new();
        storage.set(CONFIG_KEY, "{not json").unwrap();
        assert_eq!(GameConfig::load(&storage), GameConfig::default());
    }

    #[test]
    fn test_load_reads_override() {
        let storage = MemoryStorage::new();
        storage.set(CONFIG_KEY, r#"{"speed_up_interval": 3}"#).unwrap();
        assert_eq!(GameConfig::load(&storage).speed_up_interval, 3);
    }
}
