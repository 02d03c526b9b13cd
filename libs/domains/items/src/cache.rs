use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Item;

/// Cache trait for read-through item caching
///
/// The cache is a pure optimization: every operation is infallible from the
/// caller's point of view. Adapters swallow and log their own failures so a
/// cache outage can never fail a use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCache: Send + Sync {
    /// Cached item for this id, if present and fresh.
    async fn get(&self, id: Uuid) -> Option<Item>;

    /// Store an item under its id for at most `ttl`.
    async fn set(&self, item: &Item, ttl: Duration);

    /// Drop whatever is cached for this id.
    async fn invalidate(&self, id: Uuid);
}

/// In-process implementation of ItemCache (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemCache {
    entries: Arc<RwLock<HashMap<Uuid, CacheEntry>>>,
}

#[derive(Debug)]
struct CacheEntry {
    item: Item,
    expires_at: Instant,
}

impl InMemoryItemCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemCache for InMemoryItemCache {
    async fn get(&self, id: Uuid) -> Option<Item> {
        let expired = {
            let entries = self.entries.read().await;
            match entries.get(&id) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.item.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            // drop the stale entry so the map does not grow unbounded
            let mut entries = self.entries.write().await;
            if entries
                .get(&id)
                .is_some_and(|entry| entry.expires_at <= Instant::now())
            {
                entries.remove(&id);
            }
        }
        None
    }

    async fn set(&self, item: &Item, ttl: Duration) {
        let Some(id) = item.id() else {
            tracing::warn!("refusing to cache an item without an id");
            return;
        };
        let mut entries = self.entries.write().await;
        entries.insert(
            id,
            CacheEntry {
                item: item.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    async fn invalidate(&self, id: Uuid) {
        self.entries.write().await.remove(&id);
    }
}
