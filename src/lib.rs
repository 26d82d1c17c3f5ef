//! Snake Arcade - A grid snake game with a global leaderboard
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, food, state machine)
//! - `highscores`: Local best score record
//! - `leaderboard`: Global top-N gate over a remote store
//! - `platform`: Browser/native platform abstraction
//! - `renderer`: Canvas 2D drawing of a render snapshot
//! - `app`: Platform-independent driver tying it all together

pub mod app;
pub mod config;
pub mod highscores;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use app::App;
pub use config::GameConfig;
pub use highscores::HighScore;
pub use leaderboard::{GlobalLeaderboard, Leaderboard, LeaderboardEntry};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions in pixels
    pub const CANVAS_WIDTH: u32 = 600;
    pub const CANVAS_HEIGHT: u32 = 600;
    /// Size of one grid cell in pixels
    pub const CELL_SIZE: u32 = 20;

    /// Initial tick interval (ms per cell)
    pub const INITIAL_SPEED: u32 = 150;
    /// Tick interval multiplier applied on every speed-up
    pub const SPEED_INCREMENT: f64 = 0.9;
    /// Foods eaten between speed-ups
    pub const SPEED_UP_INTERVAL: u32 = 5;
    /// Fastest allowed tick interval
    pub const MIN_SPEED: u32 = 50;

    /// Initial snake
    pub const INITIAL_SNAKE_LENGTH: usize = 3;
    pub const INITIAL_HEAD: (i32, i32) = (10, 10);

    /// Points awarded per food
    pub const FOOD_SCORE: u64 = 10;

    /// LocalStorage keys
    pub const HIGH_SCORE_KEY: &str = "snakeGameHighScore";
    pub const CONFIG_KEY: &str = "snakeGameConfig";
}
