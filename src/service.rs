//! Context service: the one component with ranking and validation logic.
//!
//! Owns a single storage backend behind the [`ContextStorage`] seam and
//! layers ingestion validation, id/timestamp assignment, query totals,
//! similarity lookups, and query-text re-ranking on top of it. The backend
//! never calls back into this layer.

use std::sync::Arc;

use chrono::Utc;

use crate::model::{Context, ContextPatch, ContextPayload, QueryParams, QueryResponse, StoreError};
use crate::ranking;
use crate::store::ContextStorage;

/// Candidate cap applied when a find-similar call names no limit.
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

/// Orchestrates one storage backend. Cheap to clone.
#[derive(Clone)]
pub struct ContextService {
    storage: Arc<dyn ContextStorage>,
}

impl ContextService {
    pub fn new(storage: Arc<dyn ContextStorage>) -> Self {
        Self { storage }
    }

    /// Label of the backend in use (`memory` or `redis`).
    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }

    /// Validate and store a new context, returning its id.
    ///
    /// Fails fast on an empty title or out-of-range score; unrecognized
    /// kinds never reach here (the payload type rejects them during
    /// deserialization). Defaultable fields — timestamps and the relevance
    /// score — are filled in, never rejected.
    pub async fn ingest(&self, payload: ContextPayload) -> Result<String, StoreError> {
        payload.validate()?;
        let context = payload.into_context(Utc::now());
        let id = self.storage.store(context).await?;
        tracing::debug!(id, "ingested context");
        Ok(id)
    }

    /// `None` for an unknown id.
    pub async fn retrieve(&self, id: &str) -> Result<Option<Context>, StoreError> {
        self.storage.retrieve(id).await
    }

    /// Filtered, ranked, paginated query.
    ///
    /// `total` is the unpaginated match count unless the caller disabled
    /// `includeTotal`, in which case it is the page size and the extra
    /// full-match pass is skipped.
    pub async fn query(&self, params: QueryParams) -> Result<QueryResponse, StoreError> {
        let results = self.storage.query(&params).await?;
        let total = if params.include_total() {
            self.storage.count(Some(&params)).await?
        } else {
            results.len()
        };
        Ok(QueryResponse {
            total,
            offset: params.offset(),
            limit: params.limit(),
            results,
        })
    }

    /// Merge a validated partial update. `false` for an unknown id.
    pub async fn update(&self, id: &str, patch: ContextPatch) -> Result<bool, StoreError> {
        patch.validate()?;
        self.storage.update(id, patch).await
    }

    /// Hard removal. `false` for an unknown id.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.storage.delete(id).await
    }

    /// Up to `limit` contexts most similar to the anchor, anchor excluded.
    /// An unknown anchor yields an empty result, not an error.
    pub async fn find_similar(
        &self,
        id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Context>, StoreError> {
        let anchor = match self.storage.retrieve(id).await? {
            Some(ctx) => ctx,
            None => return Ok(Vec::new()),
        };

        // Score against every other record: an unbounded, unfiltered page.
        let candidates = self
            .storage
            .query(&QueryParams {
                limit: Some(usize::MAX),
                offset: Some(0),
                ..QueryParams::default()
            })
            .await?;

        Ok(ranking::top_similar(
            &anchor,
            candidates,
            limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
        ))
    }

    /// Re-order an already-filtered result set against free query text.
    /// Pure re-ranking: no storage access, no filtering.
    pub fn rank_by_relevance(&self, contexts: Vec<Context>, query: &str) -> Vec<Context> {
        ranking::rank_by_relevance(contexts, query)
    }

    /// Store size, or the unpaginated match count of a filtered query.
    pub async fn count(&self, params: Option<&QueryParams>) -> Result<usize, StoreError> {
        self.storage.count(params).await
    }
}
