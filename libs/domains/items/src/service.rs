//! Item Service - application layer use cases

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::ItemCache;
use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemResponse, UpdateItem};
use crate::repository::ItemRepository;

/// Cache TTL used when the caller does not configure one.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Application service orchestrating item use cases.
///
/// Business rules live in the entity; this layer wires entity mutations to
/// the repository port, runs the read-through/invalidate-on-write cache
/// policy, and translates domain failures into [`ItemError`]. Validation and
/// entity mutation complete before any port call is issued, so a cancelled
/// invocation leaves the store either untouched or fully written.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    cache: Option<Arc<dyn ItemCache>>,
    cache_ttl: Duration,
}

impl<R: ItemRepository> ItemService<R> {
    /// Service without a cache; every read goes to the repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Service with a read-through cache.
    pub fn with_cache(repository: R, cache: Arc<dyn ItemCache>, cache_ttl: Duration) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Some(cache),
            cache_ttl,
        }
    }

    /// Create a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<ItemResponse> {
        let item = Item::new(input)?;
        let created = self.repository.add(item).await?;
        self.cache_set(&created).await;
        Self::to_response(&created)
    }

    /// Get an item by ID, reading through the cache when one is configured
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> ItemResult<ItemResponse> {
        if let Some(item) = self.cache_get(id).await {
            return Self::to_response(&item);
        }

        let item = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;
        self.cache_set(&item).await;
        Self::to_response(&item)
    }

    /// List all items in insertion order
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<ItemResponse>> {
        let items = self.repository.get_all().await?;
        items.iter().map(Self::to_response).collect()
    }

    /// Partially update an existing item
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: Uuid, input: UpdateItem) -> ItemResult<ItemResponse> {
        let mut item = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        item.apply_partial_update(input)?;

        let updated = self
            .repository
            .update(item)
            .await?
            .ok_or(ItemError::NotFound(id))?;
        self.cache_invalidate(id).await;
        Self::to_response(&updated)
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> ItemResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ItemError::NotFound(id));
        }
        self.cache_invalidate(id).await;
        Ok(())
    }

    /// Search items by a case-insensitive substring of name or description.
    /// A blank query is answered as empty without touching the repository.
    #[instrument(skip(self))]
    pub async fn search_items(&self, query: &str) -> ItemResult<Vec<ItemResponse>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items = self.repository.search(query).await?;
        items.iter().map(Self::to_response).collect()
    }

    fn to_response(item: &Item) -> ItemResult<ItemResponse> {
        ItemResponse::from_entity(item).ok_or_else(|| {
            ItemError::Storage("repository returned an item without an id".to_string())
        })
    }

    async fn cache_get(&self, id: Uuid) -> Option<Item> {
        match &self.cache {
            Some(cache) => cache.get(id).await,
            None => None,
        }
    }

    async fn cache_set(&self, item: &Item) {
        if let Some(cache) = &self.cache {
            cache.set(item, self.cache_ttl).await;
        }
    }

    async fn cache_invalidate(&self, id: Uuid) {
        if let Some(cache) = &self.cache {
            cache.invalidate(id).await;
        }
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: self.cache.clone(),
            cache_ttl: self.cache_ttl,
        }
    }
}
