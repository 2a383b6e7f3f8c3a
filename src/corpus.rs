//! Seed-corpus ingestion.
//!
//! The composition root loads an externally supplied JSON file — an array of
//! ingestion payloads — and bulk-ingests it before the server accepts
//! requests. There is no ambient corpus state: a store starts empty unless a
//! corpus is configured. Any failure aborts startup; serving a silently
//! partial corpus would be worse than not serving.

use std::path::Path;

use thiserror::Error;

use crate::model::{ContextPayload, StoreError};
use crate::service::ContextService;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot read corpus file: {0}")]
    Io(#[from] std::io::Error),
    #[error("corpus is not a valid payload array: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("corpus entry {index} rejected: {source}")]
    Entry {
        index: usize,
        #[source]
        source: StoreError,
    },
}

/// Ingest every payload in the file, in file order, returning how many
/// contexts were stored.
pub async fn seed_from_file(
    service: &ContextService,
    path: &Path,
) -> Result<usize, CorpusError> {
    let raw = std::fs::read_to_string(path)?;
    let payloads: Vec<ContextPayload> = serde_json::from_str(&raw)?;

    let total = payloads.len();
    for (index, payload) in payloads.into_iter().enumerate() {
        service
            .ingest(payload)
            .await
            .map_err(|source| CorpusError::Entry { index, source })?;
    }

    tracing::info!(count = total, path = %path.display(), "seeded context corpus");
    Ok(total)
}
