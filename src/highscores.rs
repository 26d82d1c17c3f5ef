//! Local high score
//!
//! A single best score persisted to LocalStorage as a decimal string.
//! Storage problems never reach gameplay: reads fall back to 0 and failed
//! writes are dropped with a warning.

use crate::consts::HIGH_SCORE_KEY;
use crate::platform::storage::KeyValueStorage;

/// Best score across sessions, never decreases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Pure threshold compare: true if `score` beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Read the persisted best (0 if missing, unreadable or garbage)
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        match storage.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(_) => {
                    log::warn!("Stored high score {:?} is not a number, using 0", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Cannot read high score: {}", e);
                Self::default()
            }
        }
    }

    /// Record a finished run. Returns true if the new record was saved.
    ///
    /// The stored value is re-read first, so a higher score written by
    /// another tab since `load` is never overwritten. The in-memory best is
    /// updated even if the write fails.
    pub fn record(&mut self, score: u64, storage: &impl KeyValueStorage) -> bool {
        if let Some(stored) = Self::stored(storage) {
            self.best = self.best.max(stored);
        }
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match storage.set(HIGH_SCORE_KEY, &score.to_string()) {
            Ok(()) => {
                log::info!("New high score {} saved", score);
                true
            }
            Err(e) => {
                log::warn!("High score {} not saved: {}", score, e);
                false
            }
        }
    }

    /// Current persisted value, if readable
    fn stored(storage: &impl KeyValueStorage) -> Option<u64> {
        storage
            .get(HIGH_SCORE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse().ok())
    }
}
