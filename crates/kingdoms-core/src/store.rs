//! Storage abstraction for kingdom records.
//!
//! The engine never talks to a database directly. It loads and saves
//! kingdoms through the [`KingdomStore`] trait, which the `PostgreSQL` layer
//! and the in-memory [`InMemoryStore`] both implement.
//!
//! Each method is atomic on its own. [`KingdomStore::update_pair`] commits
//! both records or neither, which is what `attack` needs. Read-modify-write
//! sequences spanning several calls are serialized by the engine's
//! per-kingdom locks, not by the store.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::future::Future;

use kingdoms_types::{Kingdom, KingdomDraft, KingdomId};
use tokio::sync::RwLock;

/// A keyed store of kingdom records.
pub trait KingdomStore: Send + Sync + 'static {
    /// Backend failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a new kingdom, assigning it a fresh id.
    fn insert(
        &self,
        draft: KingdomDraft,
    ) -> impl Future<Output = Result<Kingdom, Self::Error>> + Send;

    /// Overwrite the resources of an existing kingdom.
    ///
    /// Updating an id that is not stored changes nothing.
    fn update(&self, kingdom: &Kingdom) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Overwrite two kingdoms atomically, `first` then `second`.
    ///
    /// When both share an id, `second` is what remains stored.
    fn update_pair(
        &self,
        first: &Kingdom,
        second: &Kingdom,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Look up a kingdom by id.
    fn find_by_id(
        &self,
        id: KingdomId,
    ) -> impl Future<Output = Result<Option<Kingdom>, Self::Error>> + Send;

    /// Return every kingdom, ordered by id.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Kingdom>, Self::Error>> + Send;

    /// Remove a kingdom. Deleting a missing id is not an error.
    fn delete(&self, id: KingdomId) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Return the kingdom with the most gold.
    ///
    /// Ties are broken by the lowest id, which for UUID v7 ids is the
    /// earliest created.
    fn find_richest(&self) -> impl Future<Output = Result<Option<Kingdom>, Self::Error>> + Send;
}

/// Process-local store backed by a `BTreeMap`.
///
/// Used by tests and by the `memory` storage backend. Cannot fail.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    kingdoms: RwLock<BTreeMap<KingdomId, Kingdom>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored kingdoms.
    pub async fn len(&self) -> usize {
        self.kingdoms.read().await.len()
    }

    /// Whether the store holds no kingdoms.
    pub async fn is_empty(&self) -> bool {
        self.kingdoms.read().await.is_empty()
    }
}

fn overwrite(kingdoms: &mut BTreeMap<KingdomId, Kingdom>, kingdom: &Kingdom) {
    if let Some(slot) = kingdoms.get_mut(&kingdom.id) {
        *slot = kingdom.clone();
    }
}

impl KingdomStore for InMemoryStore {
    type Error = Infallible;

    async fn insert(&self, draft: KingdomDraft) -> Result<Kingdom, Self::Error> {
        let mut kingdoms = self.kingdoms.write().await;
        let mut id = KingdomId::new();
        while kingdoms.contains_key(&id) {
            id = KingdomId::new();
        }
        let kingdom = draft.into_kingdom(id);
        kingdoms.insert(id, kingdom.clone());
        Ok(kingdom)
    }

    async fn update(&self, kingdom: &Kingdom) -> Result<(), Self::Error> {
        overwrite(&mut *self.kingdoms.write().await, kingdom);
        Ok(())
    }

    async fn update_pair(&self, first: &Kingdom, second: &Kingdom) -> Result<(), Self::Error> {
        let mut kingdoms = self.kingdoms.write().await;
        overwrite(&mut kingdoms, first);
        overwrite(&mut kingdoms, second);
        Ok(())
    }

    async fn find_by_id(&self, id: KingdomId) -> Result<Option<Kingdom>, Self::Error> {
        Ok(self.kingdoms.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Kingdom>, Self::Error> {
        Ok(self.kingdoms.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: KingdomId) -> Result<(), Self::Error> {
        self.kingdoms.write().await.remove(&id);
        Ok(())
    }

    async fn find_richest(&self) -> Result<Option<Kingdom>, Self::Error> {
        let kingdoms = self.kingdoms.read().await;
        // Iteration is in ascending id order; only a strictly larger
        // treasury displaces the current pick.
        let richest = kingdoms.values().fold(None::<&Kingdom>, |best, k| match best {
            Some(b) if b.gold >= k.gold => Some(b),
            _ => Some(k),
        });
        Ok(richest.cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use kingdoms_types::Resources;
    use uuid::Uuid;

    use super::*;

    fn draft(gold: u32, citizens: u32, food: u32) -> KingdomDraft {
        KingdomDraft {
            resources: Resources::new(gold, citizens, food),
            date_of_creation: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default(),
        }
    }

    fn stored(id: u128, gold: u32) -> Kingdom {
        draft(gold, 1, 1).into_kingdom(KingdomId::from(Uuid::from_u128(id)))
    }

    #[tokio::test]
    async fn insert_assigns_id_and_keeps_values() {
        let store = InMemoryStore::new();
        let Ok(kingdom) = store.insert(draft(10, 5, 10)).await;
        assert_eq!(kingdom.resources(), Resources::new(10, 5, 10));

        let Ok(found) = store.find_by_id(kingdom.id).await;
        assert_eq!(found, Some(kingdom));
    }

    #[tokio::test]
    async fn update_overwrites_existing_only() {
        let store = InMemoryStore::new();
        let Ok(kingdom) = store.insert(draft(10, 5, 10)).await;

        let changed = kingdom.with_resources(Resources::new(1, 2, 3));
        let Ok(()) = store.update(&changed).await;
        let Ok(found) = store.find_by_id(kingdom.id).await;
        assert_eq!(found, Some(changed));

        let ghost = stored(7, 99);
        let Ok(()) = store.update(&ghost).await;
        let Ok(missing) = store.find_by_id(ghost.id).await;
        assert_eq!(missing, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_pair_with_same_id_keeps_second() {
        let store = InMemoryStore::new();
        let Ok(kingdom) = store.insert(draft(10, 10, 10)).await;

        let first = kingdom.with_resources(Resources::new(0, 5, 10));
        let second = kingdom.with_resources(Resources::new(20, 15, 10));
        let Ok(()) = store.update_pair(&first, &second).await;

        let Ok(found) = store.find_by_id(kingdom.id).await;
        assert_eq!(found, Some(second));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryStore::new();
        let Ok(kingdom) = store.insert(draft(1, 1, 1)).await;

        let Ok(()) = store.delete(kingdom.id).await;
        let Ok(()) = store.delete(kingdom.id).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn richest_prefers_most_gold() {
        let store = InMemoryStore::new();
        let Ok(_) = store.insert(draft(50, 20, 30)).await;
        let Ok(rich) = store.insert(draft(60, 15, 25)).await;

        let Ok(found) = store.find_richest().await;
        assert_eq!(found, Some(rich));
    }

    #[tokio::test]
    async fn richest_tie_goes_to_lowest_id() {
        let store = InMemoryStore::new();
        {
            let mut kingdoms = store.kingdoms.write().await;
            for k in [stored(3, 40), stored(1, 40), stored(2, 10)] {
                kingdoms.insert(k.id, k);
            }
        }

        let Ok(found) = store.find_richest().await;
        assert_eq!(found.map(|k| k.id), Some(stored(1, 40).id));
    }

    #[tokio::test]
    async fn richest_of_nothing_is_none() {
        let store = InMemoryStore::new();
        let Ok(found) = store.find_richest().await;
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let store = InMemoryStore::new();
        {
            let mut kingdoms = store.kingdoms.write().await;
            for k in [stored(9, 1), stored(4, 2), stored(6, 3)] {
                kingdoms.insert(k.id, k);
            }
        }

        let Ok(all) = store.find_all().await;
        let golds: Vec<u32> = all.iter().map(|k| k.gold).collect();
        assert_eq!(golds, vec![2, 3, 1]);
    }
}
