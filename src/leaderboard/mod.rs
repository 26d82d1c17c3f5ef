//! Global leaderboard
//!
//! The store behind it is shared by every running game and is only reached
//! asynchronously. This module owns the admission decision (the top-N gate)
//! and treats the store as an ordered set with a capacity. Qualification and
//! insertion are separate store calls, so two concurrent submitters can both
//! pass the gate; the board may briefly hold more than the intended top
//! entries until the next pruning. That is accepted.

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub mod firebase;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryStore;

/// Entries shown to players
pub const TOP_SURFACED: usize = 3;
/// Entries kept in the store
pub const MAX_RETAINED: usize = 10;
/// Name used when the player leaves it blank
pub const ANONYMOUS: &str = "Anonymous";

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when submitted
    pub timestamp: f64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u64, timestamp: f64) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                ANONYMOUS.to_string()
            } else {
                name.to_string()
            },
            score,
            timestamp,
        }
    }
}

/// Remote store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard store unavailable")]
    Unavailable,
    #[error("leaderboard request failed: {0}")]
    Transport(String),
    #[error("leaderboard store answered HTTP {0}")]
    Status(u16),
    #[error("malformed leaderboard data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Entries sorted by score, descending. Ties keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from unordered entries (stable, so earlier entries win ties)
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Top-three gate: room on the podium, or strictly beats third place
    pub fn is_top_three(&self, score: u64) -> bool {
        match self.entries.get(TOP_SURFACED - 1) {
            None => true,
            Some(third) => score > third.score,
        }
    }

    /// Entries players get to see
    pub fn top(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(TOP_SURFACED)]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Ordered-set-with-capacity collaborator behind the global leaderboard
pub trait LeaderboardStore {
    /// Best `limit` entries, score descending
    fn fetch_top(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LeaderboardEntry>, StoreError>>;

    fn insert(&self, entry: LeaderboardEntry) -> impl Future<Output = Result<(), StoreError>>;

    /// Delete every entry ranked below `keep`
    fn retain_top(&self, keep: usize) -> impl Future<Output = Result<(), StoreError>>;
}

/// Top-N gate over a shared store. Errors never escape: reads degrade to an
/// empty board and writes to a rejected submission.
pub struct GlobalLeaderboard<S> {
    store: S,
}

impl<S: LeaderboardStore> GlobalLeaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current podium
    pub async fn fetch_top3(&self) -> Leaderboard {
        match self.store.fetch_top(TOP_SURFACED).await {
            Ok(entries) => Leaderboard::from_entries(entries),
            Err(e) => {
                log::error!("Failed to fetch leaderboard: {}", e);
                Leaderboard::new()
            }
        }
    }

    /// Would `score` make the podium right now
    pub async fn is_top_three(&self, score: u64) -> bool {
        self.fetch_top3().await.is_top_three(score)
    }

    /// Insert if the score makes the podium, then prune to `MAX_RETAINED`.
    /// Returns whether the entry was accepted.
    pub async fn submit_if_qualifies(&self, name: &str, score: u64, timestamp: f64) -> bool {
        let podium = match self.store.fetch_top(TOP_SURFACED).await {
            Ok(entries) => Leaderboard::from_entries(entries),
            Err(e) => {
                log::error!("Failed to save to leaderboard: {}", e);
                return false;
            }
        };
        if !podium.is_top_three(score) {
            log::info!("Score {} does not make the top {}", score, TOP_SURFACED);
            return false;
        }

        let entry = LeaderboardEntry::new(name, score, timestamp);
        log::info!("Submitting {} ({}) to leaderboard", entry.name, entry.score);
        if let Err(e) = self.store.insert(entry).await {
            log::error!("Failed to save to leaderboard: {}", e);
            return false;
        }

        // The entry is in; a failed cleanup only leaves extra rows behind
        if let Err(e) = self.store.retain_top(MAX_RETAINED).await {
            log::error!("Failed to clean up leaderboard: {}", e);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score, 0.0)
    }

    fn board(scores: &[u64]) -> Leaderboard {
        Leaderboard::from_entries(
            scores
                .iter()
                .enumerate()
                .map(|(i, &s)| entry(&format!("p{}", i), s))
                .collect(),
        )
    }

    #[test]
    fn test_two_entries_always_qualify() {
        let lb = board(&[100, 90]);
        assert!(lb.is_top_three(0));
        assert!(lb.is_top_three(5));
    }

    #[test]
    fn test_third_place_strict() {
        let lb = board(&[100, 70, 50]);
        assert!(!lb.is_top_three(50));
        assert!(lb.is_top_three(51));
    }

    #[test]
    fn test_from_entries_stable_on_ties() {
        let lb = Leaderboard::from_entries(vec![entry("a", 10), entry("b", 30), entry("c", 10)]);
        let names: Vec<_> = lb.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_top_is_capped() {
        assert_eq!(board(&[5, 4, 3, 2]).top().len(), 3);
        assert_eq!(board(&[5]).top().len(), 1);
    }

    #[test]
    fn test_blank_name_is_anonymous() {
        assert_eq!(LeaderboardEntry::new("   ", 1, 0.0).name, ANONYMOUS);
        assert_eq!(LeaderboardEntry::new(" ada ", 1, 0.0).name, "ada");
    }

    #[test]
    fn test_submit_gate() {
        let global = GlobalLeaderboard::new(MemoryStore::new());
        for (name, score) in [("a", 100), ("b", 70), ("c", 50)] {
            assert!(pollster::block_on(global.submit_if_qualifies(name, score, 0.0)));
        }
        assert!(!pollster::block_on(global.submit_if_qualifies("d", 50, 0.0)));
        assert!(pollster::block_on(global.submit_if_qualifies("e", 51, 0.0)));

        let top = pollster::block_on(global.fetch_top3());
        let scores: Vec<_> = top.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![100, 70, 51]);
    }

    #[test]
    fn test_store_keeps_only_ten() {
        let global = GlobalLeaderboard::new(MemoryStore::new());
        for score in 1..=15u64 {
            // Ascending scores always beat third place
            assert!(pollster::block_on(global.submit_if_qualifies("p", score * 10, 0.0)));
        }
        let all = global.store().entries();
        assert_eq!(all.len(), MAX_RETAINED);
        assert_eq!(all.iter().map(|e| e.score).min(), Some(60));
    }

    #[test]
    fn test_check_then_act_race_is_best_effort() {
        let store = MemoryStore::with_entries(vec![entry("a", 100), entry("b", 90), entry("c", 80)]);
        let global = GlobalLeaderboard::new(store);

        // Both players see the same podium before either writes
        let seen_by_first = pollster::block_on(global.fetch_top3());
        let seen_by_second = pollster::block_on(global.fetch_top3());
        assert!(seen_by_first.is_top_three(85));
        assert!(seen_by_second.is_top_three(81));

        pollster::block_on(global.store().insert(entry("x", 85))).unwrap();
        pollster::block_on(global.store().insert(entry("y", 81))).unwrap();

        // The second score no longer makes the podium, but it was admitted
        let all = global.store().entries();
        assert_eq!(all.len(), 5);
        let top = pollster::block_on(global.fetch_top3());
        assert_eq!(top.entries.iter().map(|e| e.score).collect::<Vec<_>>(), vec![100, 90, 85]);
    }

    /// Store that fails every call and counts attempts
    #[derive(Default)]
    struct DownStore {
        calls: Cell<u32>,
    }

    impl LeaderboardStore for DownStore {
        async fn fetch_top(&self, _limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
            self.calls.set(self.calls.get() + 1);
            Err(StoreError::Unavailable)
        }

        async fn insert(&self, _entry: LeaderboardEntry) -> Result<(), StoreError> {
            self.calls.set(self.calls.get() + 1);
            Err(StoreError::Status(503))
        }

        async fn retain_top(&self, _keep: usize) -> Result<(), StoreError> {
            self.calls.set(self.calls.get() + 1);
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_store_errors_degrade() {
        let global = GlobalLeaderboard::new(DownStore::default());
        assert!(pollster::block_on(global.fetch_top3()).is_empty());
        assert!(pollster::block_on(global.is_top_three(10)));
        assert!(!pollster::block_on(global.submit_if_qualifies("a", 10, 0.0)));
        // Rejected at the read, never attempted the write
        assert_eq!(global.store().calls.get(), 3);
    }
}
