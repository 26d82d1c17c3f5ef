//! Raw input to game commands
//!
//! The simulation never sees key names or touch coordinates.

use crate::sim::{Command, GamePhase};

/// Minimum finger travel (CSS px) for a touch to count as a swipe
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Command::MoveUp),
        "ArrowDown" | "s" | "S" => Some(Command::MoveDown),
        "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
        " " => Some(Command::TogglePause),
        "Enter" => Some(Command::Start),
        _ => None,
    }
}

/// Keys whose browser default (page scroll) must be suppressed
pub fn suppresses_default(key: &str) -> bool {
    matches!(key, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " ")
}

/// A tap starts a fresh run or toggles pause mid-run
pub fn tap_command(phase: GamePhase) -> Command {
    match phase {
        GamePhase::Ready | GamePhase::GameOver => Command::Start,
        GamePhase::Playing | GamePhase::Paused => Command::TogglePause,
    }
}

/// Decoded touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Swipe(Command),
    Tap,
}

/// Tracks one touch from start to end
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.origin = Some((x, y));
    }

    /// Finish the touch; the dominant axis picks the direction
    pub fn end(&mut self, x: f32, y: f32) -> Option<Gesture> {
        let (ox, oy) = self.origin.take()?;
        let (dx, dy) = (x - ox, y - oy);

        if dx.abs().max(dy.abs()) < SWIPE_THRESHOLD {
            return Some(Gesture::Tap);
        }
        // Screen y grows downward, like the grid
        let command = if dx.abs() > dy.abs() {
            if dx > 0.0 { Command::MoveRight } else { Command::MoveLeft }
        } else if dy > 0.0 {
            Command::MoveDown
        } else {
            Command::MoveUp
        };
        Some(Gesture::Swipe(command))
    }
}
