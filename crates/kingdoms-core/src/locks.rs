//! Per-kingdom locks.
//!
//! Every mutating engine operation is a read-modify-write spanning several
//! store calls. [`KingdomLocks`] hands out one async mutex per kingdom id so
//! two operations on the same kingdom never interleave. Operations on
//! different kingdoms proceed in parallel.
//!
//! Attacks lock two kingdoms. [`KingdomLocks::lock_pair`] always acquires
//! them in ascending id order, so two kingdoms attacking each other at the
//! same moment cannot deadlock.
//!
//! Registry entries live only while some task holds or awaits the mutex.
//! Dropping the last [`KingdomGuard`] for an id removes its entry, so ids
//! that never resolve to a kingdom leave nothing behind.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use kingdoms_types::KingdomId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slots = Arc<Mutex<HashMap<KingdomId, Arc<AsyncMutex<()>>>>>;

/// Registry of per-kingdom async mutexes.
#[derive(Debug, Default)]
pub struct KingdomLocks {
    slots: Slots,
}

/// Exclusive hold on one or two kingdoms. Released on drop.
#[derive(Debug)]
pub struct KingdomGuard {
    slots: Slots,
    held: Vec<(KingdomId, OwnedMutexGuard<()>)>,
}

impl KingdomGuard {
    async fn acquire(&mut self, id: KingdomId, slot: Arc<AsyncMutex<()>>) {
        let held = slot.lock_owned().await;
        self.held.push((id, held));
    }
}

impl Drop for KingdomGuard {
    fn drop(&mut self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        for (id, held) in self.held.drain(..) {
            drop(held);
            // Only the registry's own handle left: nobody holds or awaits it.
            if slots.get(&id).is_some_and(|slot| Arc::strong_count(slot) == 1) {
                slots.remove(&id);
            }
        }
    }
}

impl KingdomLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: KingdomId) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id).or_default())
    }

    fn empty_guard(&self) -> KingdomGuard {
        KingdomGuard {
            slots: Arc::clone(&self.slots),
            held: Vec::with_capacity(2),
        }
    }

    /// Wait for exclusive access to one kingdom.
    pub async fn lock(&self, id: KingdomId) -> KingdomGuard {
        let mut guard = self.empty_guard();
        guard.acquire(id, self.slot(id)).await;
        guard
    }

    /// Wait for exclusive access to two kingdoms.
    ///
    /// Locks are taken lowest id first. Passing the same id twice takes a
    /// single lock.
    pub async fn lock_pair(&self, a: KingdomId, b: KingdomId) -> KingdomGuard {
        if a == b {
            return self.lock(a).await;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let mut guard = self.empty_guard();
        guard.acquire(first, self.slot(first)).await;
        guard.acquire(second, self.slot(second)).await;
        guard
    }

    /// Number of kingdoms with a registry entry.
    pub fn tracked(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_kingdom_is_exclusive() {
        let locks = Arc::new(KingdomLocks::new());
        let id = KingdomId::new();
        let inside = Arc::new(AtomicU32::new(0));
        let peak = Arc::new(AtomicU32::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let peak = Arc::clone(&peak);
            tasks.push(tokio::spawn(async move {
                let _guard = locks.lock(id).await;
                let now = inside.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for task in tasks {
            assert!(task.await.is_ok());
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn crossing_pairs_do_not_deadlock() {
        let locks = Arc::new(KingdomLocks::new());
        let a = KingdomId::new();
        let b = KingdomId::new();

        let mut tasks = Vec::new();
        for i in 0..16 {
            let locks = Arc::clone(&locks);
            let (x, y) = if i % 2 == 0 { (a, b) } else { (b, a) };
            tasks.push(tokio::spawn(async move {
                let _guard = locks.lock_pair(x, y).await;
                tokio::task::yield_now().await;
            }));
        }

        let all = async {
            for task in tasks {
                assert!(task.await.is_ok());
            }
        };
        assert!(
            tokio::time::timeout(Duration::from_secs(5), all)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn self_pair_takes_one_lock() {
        let locks = KingdomLocks::new();
        let id = KingdomId::new();
        let _guard = locks.lock_pair(id, id).await;
        assert_eq!(locks.tracked(), 1);
        assert!(locks.slot(id).try_lock().is_err());
    }

    #[tokio::test]
    async fn released_lock_leaves_no_entry() {
        let locks = KingdomLocks::new();
        let id = KingdomId::new();
        {
            let _guard = locks.lock(id).await;
            assert_eq!(locks.tracked(), 1);
        }
        assert_eq!(locks.tracked(), 0);

        {
            let _guard = locks.lock_pair(KingdomId::new(), KingdomId::new()).await;
            assert_eq!(locks.tracked(), 2);
        }
        assert_eq!(locks.tracked(), 0);
    }

    #[tokio::test]
    async fn waiting_task_keeps_entry_alive() {
        let locks = Arc::new(KingdomLocks::new());
        let id = KingdomId::new();
        let first = locks.lock(id).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock(id).await;
            })
        };
        // Let the waiter register on the mutex before releasing it.
        while Arc::strong_count(&locks.slot(id)) < 4 {
            tokio::task::yield_now().await;
        }

        drop(first);
        assert_eq!(locks.tracked(), 1);

        assert!(waiter.await.is_ok());
        assert_eq!(locks.tracked(), 0);
    }

    #[tokio::test]
    async fn many_distinct_ids_do_not_accumulate() {
        let locks = KingdomLocks::new();
        for _ in 0..1000 {
            let a = KingdomId::new();
            drop(locks.lock(a).await);
            drop(locks.lock_pair(a, KingdomId::new()).await);
        }
        assert_eq!(locks.tracked(), 0);
    }
}
