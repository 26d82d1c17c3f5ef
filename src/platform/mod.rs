//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Input events (keys and swipes to game commands)
//! - Time/ticks (frame callback to fixed simulation ticks)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{SwipeTracker, command_for_key};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use time::TickScheduler;
