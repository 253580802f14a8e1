//! User progress store: solved set and per-problem scores.
//!
//! The store enforces the write-once rule itself: `record_if_unsolved` is a
//! check-and-set under one write lock, so two submits racing past the
//! best-effort pre-check still produce exactly one recorded score. Reads and
//! writes go through here only; nothing ever deletes a solved entry.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::domain::UserProgress;

#[derive(Default)]
pub struct ProgressStore {
    users: RwLock<HashMap<String, UserProgress>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a user's progress; unknown users read as empty progress.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, user_id: &str) -> UserProgress {
        self.users.read().await.get(user_id).cloned().unwrap_or_default()
    }

    /// Fresh membership check. Best-effort: a `false` here can go stale by the
    /// time the caller writes, which is why recording re-checks atomically.
    #[instrument(level = "debug", skip(self))]
    pub async fn is_solved(&self, user_id: &str, problem_id: &str) -> bool {
        self.users
            .read()
            .await
            .get(user_id)
            .map(|p| p.solved.contains(problem_id))
            .unwrap_or(false)
    }

    /// Mark the problem solved and persist the score, unless it is already
    /// solved. Returns whether this call performed the write. The check and
    /// both writes happen under a single write lock.
    #[instrument(level = "info", skip(self))]
    pub async fn record_if_unsolved(&self, user_id: &str, problem_id: &str, score: u8) -> bool {
        let mut users = self.users.write().await;
        let progress = users.entry(user_id.to_string()).or_default();
        if progress.solved.contains(problem_id) {
            warn!(target: "submission", %user_id, %problem_id, "Score write skipped: already solved");
            return false;
        }
        progress.solved.insert(problem_id.to_string());
        progress.scores.insert(problem_id.to_string(), score);
        info!(target: "submission", %user_id, %problem_id, score, "Problem marked solved, score recorded");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_reads_as_unsolved() {
        let store = ProgressStore::new();
        assert!(!store.is_solved("u1", "p1").await);
        assert!(store.get("u1").await.solved.is_empty());
    }

    #[tokio::test]
    async fn first_record_wins_second_is_noop() {
        let store = ProgressStore::new();
        assert!(store.record_if_unsolved("u1", "p1", 7).await);
        assert!(!store.record_if_unsolved("u1", "p1", 3).await);

        let progress = store.get("u1").await;
        assert!(progress.solved.contains("p1"));
        assert_eq!(progress.scores.get("p1"), Some(&7));
    }

    #[tokio::test]
    async fn problems_are_independent_per_user() {
        let store = ProgressStore::new();
        assert!(store.record_if_unsolved("u1", "p1", 5).await);
        assert!(store.record_if_unsolved("u1", "p2", 9).await);
        assert!(store.record_if_unsolved("u2", "p1", 2).await);

        assert_eq!(store.get("u1").await.scores.len(), 2);
        assert_eq!(store.get("u2").await.scores.get("p1"), Some(&2));
    }

    #[tokio::test]
    async fn racing_records_land_exactly_once() {
        use std::sync::Arc;

        let store = Arc::new(ProgressStore::new());
        let mut handles = Vec::new();
        for score in 0..8u8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.record_if_unsolved("u1", "p1", score).await
            }));
        }
        let mut wins = 0;
        for h in handles {
            if h.await.unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.get("u1").await.scores.len(), 1);
    }
}
