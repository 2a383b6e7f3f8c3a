//! Domain model for the context store: the entity, its validation rules,
//! query parameters, and the error taxonomy.

pub mod context;
pub mod error;
pub mod query;

pub use context::{
    default_relevance, Context, ContextMetadata, ContextPatch, ContextPayload, ContextType,
    MetadataPatch, MetadataPayload, DEFAULT_RELEVANCE_SCORE,
};
pub use error::StoreError;
pub use query::{QueryParams, QueryResponse, DEFAULT_QUERY_LIMIT};
