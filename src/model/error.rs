use thiserror::Error;

/// Failures surfaced by the store and service layers.
///
/// "Not found" is deliberately not here: missing ids come back as `None` or
/// `false` from the storage contract, never as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected at the ingestion/update boundary; nothing was stored.
    #[error("invalid context: {0}")]
    Validation(String),

    /// The bounded backend is full and the record is new. Updates to
    /// existing records never raise this.
    #[error("context store is full (capacity {capacity})")]
    Capacity { capacity: usize },

    /// A stored record could not be encoded or decoded.
    #[error("context serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistent backend connectivity failure, propagated unchanged.
    #[error("storage transport error: {0}")]
    Transport(#[from] redis::RedisError),
}
