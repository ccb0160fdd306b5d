//! Keyed async locks serializing scoring decisions

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per key, created on first use
#[derive(Default)]
pub struct KeyedLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`; released when the guard drops
    pub async fn acquire(&self, key: i64) -> OwnedMutexGuard<()> {
        // The shard guard must not live across the await.
        let lock = self.locks.entry(key).or_default().clone();
        lock.lock_owned().await
    }

    /// Drop entries nobody holds or waits on.
    ///
    /// Callers of `acquire` clone the `Arc` while holding the shard lock, so an
    /// entry with a single reference cannot be handed out concurrently.
    pub fn evict_idle(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Locks taken while scoring.
///
/// Always acquired problem first, competition second.
#[derive(Default)]
pub struct ScoringLocks {
    pub problems: KeyedLocks,
    pub competitions: KeyedLocks,
}

impl ScoringLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evict_idle(&self) {
        self.problems.evict_idle();
        self.competitions.evict_idle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyedLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let peak = peak.clone();
                tokio::spawn(async move {
                    let _guard = locks.acquire(1).await;
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_held_locks() {
        let locks = KeyedLocks::new();
        let held = locks.acquire(1).await;
        drop(locks.acquire(2).await);
        assert_eq!(locks.len(), 2);

        locks.evict_idle();
        assert_eq!(locks.len(), 1);

        // Still exclusive after eviction
        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire(1)).await;
        assert!(blocked.is_err());

        drop(held);
        locks.evict_idle();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _first = locks.acquire(1).await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2)).await;
        assert!(second.is_ok());
    }
}
