//! In-memory mirror of comparison vote tallies.
//!
//! One instance is built at startup and shared through `Arc`. Reads take the
//! shared lock; `put`, `update_votes`, `sweep` and lazy eviction take the
//! exclusive one. The lock only ever guards map mutation, never a store call.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedComparison {
    pub comparison_id: i32,
    pub set_a_id: i32,
    pub set_b_id: i32,
    pub votes_a: i32,
    pub votes_b: i32,
    pub expires_at: Instant,
}

impl CachedComparison {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct ComparisonCache {
    entries: RwLock<HashMap<i32, CachedComparison>>,
}

impl ComparisonCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live entry, evicting it instead if it has expired.
    pub async fn get(&self, comparison_id: i32) -> Option<CachedComparison> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(&comparison_id) {
                None => {
                    metrics::counter!("comparison_cache_misses_total").increment(1);
                    return None;
                }
                Some(entry) if !entry.is_expired(now) => {
                    metrics::counter!("comparison_cache_hits_total").increment(1);
                    return Some(*entry);
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        // Another writer may have refreshed the entry in between
        if entries
            .get(&comparison_id)
            .is_some_and(|e| e.is_expired(Instant::now()))
        {
            entries.remove(&comparison_id);
        }
        metrics::counter!("comparison_cache_misses_total").increment(1);
        None
    }

    pub async fn put(
        &self,
        comparison_id: i32,
        set_a_id: i32,
        set_b_id: i32,
        votes_a: i32,
        votes_b: i32,
        ttl: Duration,
    ) {
        let entry = CachedComparison {
            comparison_id,
            set_a_id,
            set_b_id,
            votes_a,
            votes_b,
            expires_at: Instant::now() + ttl,
        };

        self.entries.write().await.insert(comparison_id, entry);
    }

    /// Overwrites the tallies of a cached comparison; absent entries are
    /// left alone and get rehydrated from the store on the next read.
    ///
    /// Durable counters only grow, so a writer that commits first but
    /// reaches the cache last cannot pull the mirror backwards.
    pub async fn update_votes(&self, comparison_id: i32, votes_a: i32, votes_b: i32) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(&comparison_id) {
            entry.votes_a = entry.votes_a.max(votes_a);
            entry.votes_b = entry.votes_b.max(votes_b);
        }
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn put_then_get_returns_entry() {
        let cache = ComparisonCache::new();
        cache.put(1, 10, 20, 3, 4, HOUR).await;

        let entry = cache.get(1).await.unwrap();
        assert_eq!(entry.set_a_id, 10);
        assert_eq!(entry.set_b_id, 20);
        assert_eq!((entry.votes_a, entry.votes_b), (3, 4));
        assert!(cache.get(2).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_evicted_on_read() {
        let cache = ComparisonCache::new();
        cache.put(1, 10, 20, 0, 0, Duration::from_secs(60)).await;

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(cache.get(1).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn zero_ttl_is_never_served() {
        let cache = ComparisonCache::new();
        cache.put(1, 10, 20, 0, 0, Duration::ZERO).await;
        assert!(cache.get(1).await.is_none());
    }

    #[tokio::test]
    async fn update_votes_ignores_missing_entries() {
        let cache = ComparisonCache::new();
        cache.update_votes(42, 1, 1).await;
        assert!(cache.get(42).await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn update_votes_never_moves_backwards() {
        let cache = ComparisonCache::new();
        cache.put(1, 10, 20, 0, 0, HOUR).await;

        cache.update_votes(1, 4, 2).await;
        cache.update_votes(1, 3, 2).await;

        let entry = cache.get(1).await.unwrap();
        assert_eq!((entry.votes_a, entry.votes_b), (4, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_removes_only_expired() {
        let cache = ComparisonCache::new();
        cache.put(1, 10, 20, 0, 0, Duration::from_secs(10)).await;
        cache.put(2, 30, 40, 0, 0, HOUR).await;

        tokio::time::advance(Duration::from_secs(11)).await;

        assert_eq!(cache.sweep().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(2).await.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_keep_highest_tally() {
        let cache = Arc::new(ComparisonCache::new());
        cache.put(1, 10, 20, 0, 0, HOUR).await;

        let handles: Vec<_> = (1..=50)
            .map(|n| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move {
                    cache.update_votes(1, n, 0).await;
                    cache.get(1).await
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        assert_eq!(cache.get(1).await.unwrap().votes_a, 50);
    }
}
