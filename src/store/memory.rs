//! Bounded in-process storage.
//!
//! A capacity-limited, insertion-ordered map for single-instance or test
//! deployments. Queries are a full scan plus stable sort plus slice —
//! O(n log n) against a 10k-record default cap, with no indexed lookups.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::model::{Context, ContextPatch, QueryParams, StoreError};

use super::filter;
use super::ContextStorage;

/// Default record cap.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Volatile backend holding every record in process memory.
///
/// The lock is held only across synchronous sections and never across an
/// await point, which reproduces run-to-completion atomicity for each
/// operation under a multi-threaded runtime.
pub struct InMemoryStorage {
    records: RwLock<IndexMap<String, Context>>,
    capacity: usize,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
            capacity,
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextStorage for InMemoryStorage {
    async fn store(&self, mut context: Context) -> Result<String, StoreError> {
        let mut records = self.records.write().expect("context store lock poisoned");

        if context.id.is_empty() {
            context.id = Uuid::new_v4().to_string();
        }

        // The capacity check applies to new records only; overwriting an
        // existing id must succeed even at the cap.
        let is_new = !records.contains_key(&context.id);
        if is_new && records.len() >= self.capacity {
            return Err(StoreError::Capacity {
                capacity: self.capacity,
            });
        }

        context.metadata.updated_at = Utc::now();
        let id = context.id.clone();
        records.insert(id.clone(), context);
        Ok(id)
    }

    async fn retrieve(&self, id: &str) -> Result<Option<Context>, StoreError> {
        let records = self.records.read().expect("context store lock poisoned");
        Ok(records.get(id).cloned())
    }

    async fn query(&self, params: &QueryParams) -> Result<Vec<Context>, StoreError> {
        let records = self.records.read().expect("context store lock poisoned");
        let all: Vec<Context> = records.values().cloned().collect();
        drop(records);

        let ordered = filter::filter_and_order(all, params);
        Ok(filter::paginate(ordered, params.offset(), params.limit()))
    }

    async fn update(&self, id: &str, patch: ContextPatch) -> Result<bool, StoreError> {
        let mut records = self.records.write().expect("context store lock poisoned");
        match records.get_mut(id) {
            Some(existing) => {
                patch.apply_to(existing, Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().expect("context store lock poisoned");
        // shift_remove keeps the remaining insertion order intact.
        Ok(records.shift_remove(id).is_some())
    }

    async fn count(&self, params: Option<&QueryParams>) -> Result<usize, StoreError> {
        let records = self.records.read().expect("context store lock poisoned");
        match params {
            None => Ok(records.len()),
            Some(p) => Ok(records.values().filter(|ctx| filter::matches(ctx, p)).count()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContextPayload, ContextType, MetadataPayload};

    fn payload(title: &str) -> ContextPayload {
        ContextPayload {
            id: None,
            kind: ContextType::Documentation,
            content: "body".into(),
            metadata: MetadataPayload {
                title: title.into(),
                description: None,
                tags: vec![],
                language: None,
                contract_type: None,
                author: None,
                relevance_score: None,
            },
            related_context_ids: vec![],
        }
    }

    #[tokio::test]
    async fn store_assigns_id_when_absent() {
        let storage = InMemoryStorage::new();
        let id = storage
            .store(payload("a").into_context(Utc::now()))
            .await
            .unwrap();
        assert!(!id.is_empty());
        assert!(storage.retrieve(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn capacity_error_only_for_new_records() {
        let storage = InMemoryStorage::with_capacity(1);
        let id = storage
            .store(payload("first").into_context(Utc::now()))
            .await
            .unwrap();

        let overflow = storage.store(payload("second").into_context(Utc::now())).await;
        assert!(matches!(overflow, Err(StoreError::Capacity { capacity: 1 })));

        // Same id again is the overwrite path and must succeed at the cap.
        let mut replacement = payload("first again").into_context(Utc::now());
        replacement.id = id.clone();
        let stored = storage.store(replacement).await.unwrap();
        assert_eq!(stored, id);
    }

    #[tokio::test]
    async fn delete_then_count_shrinks() {
        let storage = InMemoryStorage::new();
        let id = storage
            .store(payload("gone soon").into_context(Utc::now()))
            .await
            .unwrap();
        assert_eq!(storage.count(None).await.unwrap(), 1);
        assert!(storage.delete(&id).await.unwrap());
        assert!(!storage.delete(&id).await.unwrap());
        assert_eq!(storage.count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_unknown_id_is_false_not_error() {
        let storage = InMemoryStorage::new();
        let updated = storage
            .update("missing", ContextPatch::default())
            .await
            .unwrap();
        assert!(!updated);
    }
}
