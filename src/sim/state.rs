//! Game session and core simulation types
//!
//! A session owns the snake and the food and is the only thing that mutates
//! score and speed.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::place_food;
use super::grid::{Direction, Position};
use super::snake::Snake;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    Ready,
    /// Active gameplay
    Playing,
    /// Ticking suspended
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfCollision,
    /// No free cell left for food
    BoardFull,
}

/// Things that happened during a command or tick, for the driver to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Turned(Direction),
    AteFood { score: u64 },
    SpeedUp { speed: u32 },
    GameOver { score: u64, cause: DeathCause },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Fixed for the life of the session
    config: GameConfig,
    /// Seed of the food RNG
    pub seed: u64,
    rng: Pcg32,
    pub snake: Snake,
    pub food: Position,
    pub score: u64,
    /// Current tick interval (ms), never below `min_speed`
    pub speed: u32,
    /// Foods eaten this run
    pub foods_eaten: u32,
    pub phase: GamePhase,
    /// Simulation ticks this run
    pub time_ticks: u64,
}

impl GameSession {
    /// Create a session in `Ready` with the snake and food already placed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let snake = Snake::new(
            config.initial_head,
            config.initial_length,
            config.initial_direction,
        );
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            food: config.initial_head,
            speed: config.initial_speed,
            snake,
            score: 0,
            foods_eaten: 0,
            phase: GamePhase::Ready,
            time_ticks: 0,
            config,
        };
        session.respawn_food();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Restore the start-of-run state (phase is left to the caller)
    pub fn reset(&mut self) {
        self.snake = Snake::new(
            self.config.initial_head,
            self.config.initial_length,
            self.config.initial_direction,
        );
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.foods_eaten = 0;
        self.time_ticks = 0;
        if !self.respawn_food() {
            log::error!("No free cell for food on a fresh board");
        }
    }

    /// Move the food to a free cell. Returns false if the board is full.
    pub fn respawn_food(&mut self) -> bool {
        let cols = self.config.cols();
        let rows = self.config.rows();
        match place_food(&mut self.rng, self.snake.body(), cols, rows) {
            Some(pos) => {
                self.food = pos;
                true
            }
            None => false,
        }
    }

    /// Apply one multiplicative speed-up, clamped at the floor
    pub fn speed_up(&mut self) {
        let decayed = (self.speed as f64 * self.config.speed_increment).floor() as u32;
        self.speed = decayed.max(self.config.min_speed);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
