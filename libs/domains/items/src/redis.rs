//! Redis-backed implementation of the item cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, RedisResult, aio::ConnectionManager};
use uuid::Uuid;

use crate::cache::ItemCache;
use crate::models::{Item, ItemRecord};

/// Redis adapter for [`ItemCache`].
///
/// Failures never cross this boundary: every Redis or codec error is logged
/// and reported as a miss (`get`) or a no-op (`set`/`invalidate`), so a cache
/// outage degrades to repository reads instead of failing requests.
pub struct RedisItemCache {
    conn: ConnectionManager,
}

impl RedisItemCache {
    pub fn new(conn: ConnectionManager) -> Self {
        tracing::info!("Redis item cache initialized");
        Self { conn }
    }

    /// Connect to a Redis URL (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> RedisResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self::new(conn))
    }

    fn key(id: Uuid) -> String {
        format!("item:{}", id)
    }
}

#[async_trait]
impl ItemCache for RedisItemCache {
    async fn get(&self, id: Uuid) -> Option<Item> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = match conn.get(Self::key(id)).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(item_id = %id, "cache read failed: {}", e);
                return None;
            }
        };
        let payload = payload?;

        let record: ItemRecord = match serde_json::from_str(&payload) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(item_id = %id, "discarding undecodable cache entry: {}", e);
                return None;
            }
        };
        match record.into_entity() {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(item_id = %id, "discarding invalid cache entry: {}", e);
                None
            }
        }
    }

    async fn set(&self, item: &Item, ttl: Duration) {
        let Some(record) = ItemRecord::from_entity(item) else {
            tracing::warn!("refusing to cache an item without an id");
            return;
        };
        let payload = match serde_json::to_string(&record) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(item_id = %record.id, "cache encode failed: {}", e);
                return;
            }
        };

        // SETEX rejects a zero expiry; clamp to the smallest it accepts
        let ttl_seconds = ttl.as_secs().max(1);
        let mut conn = self.conn.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::key(record.id), payload, ttl_seconds)
            .await
        {
            tracing::warn!(item_id = %record.id, "cache write failed: {}", e);
        }
    }

    async fn invalidate(&self, id: Uuid) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(Self::key(id)).await {
            tracing::warn!(item_id = %id, "cache invalidation failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateItem;

    #[test]
    fn test_keys_are_namespaced_by_id() {
        let id = Uuid::now_v7();
        assert_eq!(RedisItemCache::key(id), format!("item:{}", id));
    }

    #[test]
    fn test_payload_codec_round_trip() {
        let item = Item::new(CreateItem {
            name: "Mouse".to_string(),
            description: Some("wireless".to_string()),
            price: 9.99,
            in_stock: true,
        })
        .unwrap()
        .with_id(Uuid::now_v7());

        let record = ItemRecord::from_entity(&item).unwrap();
        let payload = serde_json::to_string(&record).unwrap();
        let decoded: ItemRecord = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded.into_entity().unwrap(), item);
    }

    #[test]
    fn test_garbage_payload_fails_decode() {
        assert!(serde_json::from_str::<ItemRecord>("not json").is_err());
        assert!(serde_json::from_str::<ItemRecord>("{\"id\":42}").is_err());
    }
}
