use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::Item;

/// Repository trait for Item persistence
///
/// Adapters may suspend on I/O and must be safe to call concurrently for
/// different ids; two concurrent writes to the same id resolve as
/// last-writer-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item and assign it a fresh identity. An id is never
    /// handed out twice within one store's lifetime, deleted or not.
    async fn add(&self, item: Item) -> ItemResult<Item>;

    /// Fetch by id. Absence is `None`, not an error.
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// All items, in insertion order, stable across calls with no
    /// intervening writes.
    async fn get_all(&self) -> ItemResult<Vec<Item>>;

    /// Replace an existing record. `None` when no record matches the item's
    /// id; never inserts (no upsert).
    async fn update(&self, item: Item) -> ItemResult<Option<Item>>;

    /// Remove by id. `false` when nothing matched; never an error.
    async fn delete(&self, id: Uuid) -> ItemResult<bool>;

    /// Case-insensitive substring match against name OR description, in
    /// insertion order. An empty query matches nothing, not everything.
    async fn search(&self, query: &str) -> ItemResult<Vec<Item>>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    inner: Arc<RwLock<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    items: HashMap<Uuid, Item>,
    order: Vec<Uuid>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn add(&self, item: Item) -> ItemResult<Item> {
        debug_assert!(item.id().is_none(), "add expects an unpersisted item");
        // UUIDv7 ids are time-ordered and generated fresh on every call, so
        // a deleted id cannot come back within this store's lifetime.
        let id = Uuid::now_v7();
        let item = item.with_id(id);

        let mut store = self.inner.write().await;
        store.items.insert(id, item.clone());
        store.order.push(id);

        tracing::debug!(item_id = %id, "item stored");
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let store = self.inner.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn get_all(&self) -> ItemResult<Vec<Item>> {
        let store = self.inner.read().await;
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.items.get(id))
            .cloned()
            .collect())
    }

    async fn update(&self, item: Item) -> ItemResult<Option<Item>> {
        // an item that was never persisted has no record to update
        let Some(id) = item.id() else {
            return Ok(None);
        };

        let mut store = self.inner.write().await;
        match store.items.get_mut(&id) {
            Some(slot) => {
                *slot = item.clone();
                tracing::debug!(item_id = %id, "item updated");
                Ok(Some(item))
            }
            // no record, no upsert
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> ItemResult<bool> {
        let mut store = self.inner.write().await;
        if store.items.remove(&id).is_some() {
            store.order.retain(|stored| *stored != id);
            tracing::debug!(item_id = %id, "item deleted");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn search(&self, query: &str) -> ItemResult<Vec<Item>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let store = self.inner.read().await;
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.items.get(id))
            .filter(|item| {
                item.name().as_str().to_lowercase().contains(&needle)
                    || item
                        .description()
                        .is_some_and(|d| d.as_str().to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}
