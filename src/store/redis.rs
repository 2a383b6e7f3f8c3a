//! Persistent key-value storage backed by Redis.
//!
//! One serialized record per id under `context:{id}`, plus an explicit
//! insertion-order list at `context:ids` so that relevance-tie ordering is
//! identical to the in-process backend. Every operation is a network round
//! trip; connectivity failures propagate unchanged with no retry here.

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::model::{Context, ContextPatch, QueryParams, StoreError};

use super::filter;
use super::ContextStorage;

const RECORD_PREFIX: &str = "context:";
const INDEX_KEY: &str = "contexts:index";

fn record_key(id: &str) -> String {
    format!("{RECORD_PREFIX}{id}")
}

/// Durable multi-instance backend over a Redis connection.
pub struct RedisStorage {
    conn: redis::aio::ConnectionManager,
}

impl RedisStorage {
    /// Connect to the key-value service at `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        tracing::info!(url, "connected to redis context store");
        Ok(Self { conn })
    }

    /// Read every record in insertion order. Ids whose value has vanished
    /// (an index entry racing a delete from another instance) are skipped.
    async fn load_all(&self) -> Result<Vec<Context>, StoreError> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.lrange(INDEX_KEY, 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| record_key(id)).collect();
        let raw: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut records = Vec::with_capacity(raw.len());
        for value in raw.into_iter().flatten() {
            records.push(serde_json::from_str(&value)?);
        }
        Ok(records)
    }
}

#[async_trait]
impl ContextStorage for RedisStorage {
    async fn store(&self, mut context: Context) -> Result<String, StoreError> {
        let mut conn = self.conn.clone();

        if context.id.is_empty() {
            context.id = Uuid::new_v4().to_string();
        }
        context.metadata.updated_at = Utc::now();

        let key = record_key(&context.id);
        let exists: bool = conn.exists(&key).await?;
        let json = serde_json::to_string(&context)?;
        let _: () = conn.set(&key, json).await?;
        if !exists {
            let _: () = conn.rpush(INDEX_KEY, &context.id).await?;
        }
        Ok(context.id)
    }

    async fn retrieve(&self, id: &str) -> Result<Option<Context>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(record_key(id)).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn query(&self, params: &QueryParams) -> Result<Vec<Context>, StoreError> {
        let all = self.load_all().await?;
        let ordered = filter::filter_and_order(all, params);
        Ok(filter::paginate(ordered, params.offset(), params.limit()))
    }

    async fn update(&self, id: &str, patch: ContextPatch) -> Result<bool, StoreError> {
        // Read-modify-write without a transaction: concurrent writers race
        // last-write-wins, per the store's concurrency contract.
        let mut existing = match self.retrieve(id).await? {
            Some(ctx) => ctx,
            None => return Ok(false),
        };
        patch.apply_to(&mut existing, Utc::now());

        let mut conn = self.conn.clone();
        let json = serde_json::to_string(&existing)?;
        let _: () = conn.set(record_key(id), json).await?;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(record_key(id)).await?;
        if removed == 0 {
            return Ok(false);
        }
        let _: i64 = conn.lrem(INDEX_KEY, 1, id).await?;
        Ok(true)
    }

    async fn count(&self, params: Option<&QueryParams>) -> Result<usize, StoreError> {
        match params {
            None => {
                let mut conn = self.conn.clone();
                let len: i64 = conn.llen(INDEX_KEY).await?;
                Ok(len as usize)
            }
            Some(p) => {
                let all = self.load_all().await?;
                Ok(all.iter().filter(|ctx| filter::matches(ctx, p)).count())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keys_cannot_collide_with_the_index() {
        assert_eq!(record_key("abc"), "context:abc");
        // Every record key carries a colon after the prefix, so no id can
        // produce the index key.
        assert!(!INDEX_KEY.starts_with(RECORD_PREFIX));
    }
}
