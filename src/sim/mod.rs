//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only, scheduled by the driver
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod food;
pub mod grid;
pub mod snake;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use food::place_food;
pub use grid::{Direction, Position};
pub use snake::Snake;
pub use snapshot::{RenderSnapshot, speed_percent};
pub use state::{DeathCause, GameEvent, GamePhase, GameSession};
pub use tick::{Command, handle_command, tick};
