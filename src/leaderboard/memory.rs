//! In-process leaderboard store
//!
//! Keeps rows in arrival order like the remote store does and sorts on
//! read. Used by native builds and tests.

use std::cell::RefCell;

use super::{Leaderboard, LeaderboardEntry, LeaderboardStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<LeaderboardEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(rows: Vec<LeaderboardEntry>) -> Self {
        Self {
            rows: RefCell::new(rows),
        }
    }

    /// Every stored row, in arrival order
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.rows.borrow().clone()
    }
}

impl LeaderboardStore for MemoryStore {
    async fn fetch_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut sorted = Leaderboard::from_entries(self.entries()).entries;
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn insert(&self, entry: LeaderboardEntry) -> Result<(), StoreError> {
        self.rows.borrow_mut().push(entry);
        Ok(())
    }

    async fn retain_top(&self, keep: usize) -> Result<(), StoreError> {
        let mut rows = self.rows.borrow_mut();
        let mut sorted = Leaderboard::from_entries(std::mem::take(&mut *rows)).entries;
        if sorted.len() > keep {
            log::debug!("Pruning {} leaderboard rows", sorted.len() - keep);
        }
        sorted.truncate(keep);
        *rows = sorted;
        Ok(())
    }
}
