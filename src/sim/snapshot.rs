//! Read-only view of a session for the render driver
//!
//! Built by value between ticks, so a frame never sees a half-applied step.

use serde::{Deserialize, Serialize};

use super::grid::{Direction, Position};
use super::state::{GamePhase, GameSession};
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Head-first
    pub snake_body: Vec<Position>,
    pub head_direction: Direction,
    pub food: Position,
    pub score: u64,
    pub high_score: u64,
    /// 0 at the initial speed, 100 at the floor
    pub speed_percent: u8,
    pub phase: GamePhase,
}

/// How far `speed` has progressed from initial toward minimum, in percent
pub fn speed_percent(speed: u32, config: &GameConfig) -> u8 {
    let range = config.initial_speed.saturating_sub(config.min_speed);
    if range == 0 {
        return 0;
    }
    let gained = config.initial_speed.saturating_sub(speed) as f64;
    (gained / range as f64 * 100.0).round().clamp(0.0, 100.0) as u8
}

impl GameSession {
    /// Capture the current state for rendering
    pub fn snapshot(&self, high_score: u64) -> RenderSnapshot {
        RenderSnapshot {
            snake_body: self.snake.body().iter().copied().collect(),
            head_direction: self.snake.direction(),
            food: self.food,
            score: self.score,
            high_score,
            speed_percent: speed_percent(self.speed, self.config()),
            phase: self.phase,
        }
    }
}
