//! Storage backends for the context store.
//!
//! Exactly two implementations exist behind [`ContextStorage`]: a bounded
//! in-process map for single-instance deployments and tests, and a Redis
//! key-value backend for durable multi-instance deployments. Both observe
//! identical filtering, ordering, and pagination semantics; they differ only
//! in latency and durability.

pub mod filter;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{ServerConfig, StorageMode};
use crate::model::{Context, ContextPatch, QueryParams, StoreError};

pub use memory::InMemoryStorage;
pub use redis::RedisStorage;

/// Pluggable persistence contract.
///
/// All intelligence (validation, scoring, similarity) lives above this seam
/// in the service layer; implementations only filter, order, and page.
#[async_trait]
pub trait ContextStorage: Send + Sync {
    /// Persist a record, assigning a fresh id when the given one is empty.
    /// Bounded backends fail with [`StoreError::Capacity`] only when full
    /// *and* the record is new; storing over an existing id always succeeds.
    async fn store(&self, context: Context) -> Result<String, StoreError>;

    /// `None` for an unknown id — never an error.
    async fn retrieve(&self, id: &str) -> Result<Option<Context>, StoreError>;

    /// Filtered, relevance-ordered, paginated scan.
    async fn query(&self, params: &QueryParams) -> Result<Vec<Context>, StoreError>;

    /// Merge a partial update onto an existing record. `false` when the id
    /// is unknown. Always refreshes `updatedAt`; never touches `createdAt`.
    async fn update(&self, id: &str, patch: ContextPatch) -> Result<bool, StoreError>;

    /// Hard removal. `false` when the id is unknown.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Without filters: the store size. With filters: the unpaginated match
    /// count of the equivalent query.
    async fn count(&self, params: Option<&QueryParams>) -> Result<usize, StoreError>;

    /// Short label for logs and the stats tool.
    fn backend_name(&self) -> &'static str;
}

/// Build the backend selected by configuration. Called once at startup; the
/// selection never changes mid-session.
pub async fn build_storage(config: &ServerConfig) -> Result<Arc<dyn ContextStorage>, StoreError> {
    match &config.storage {
        StorageMode::Memory { capacity } => {
            Ok(Arc::new(InMemoryStorage::with_capacity(*capacity)))
        }
        StorageMode::Redis { url } => Ok(Arc::new(RedisStorage::connect(url).await?)),
    }
}
