use serde::{Deserialize, Serialize};

use super::context::{Context, ContextType};

/// Page size applied when a query names none.
pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Filter, sort, and pagination parameters for a context query.
///
/// Filters apply in a fixed order — type set, tags, contract type, free
/// text — then results sort by relevance score descending (ties keep
/// storage order) and a contiguous page is sliced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Case-insensitive substring matched against content, title,
    /// description, and tags jointly.
    #[serde(default)]
    pub query: Option<String>,
    /// Inclusion set; empty or absent means no type filter.
    #[serde(default)]
    pub types: Option<Vec<ContextType>>,
    /// OR semantics: one shared tag is a match.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Exact match.
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    /// When false, skip the unpaginated match count and report the page
    /// size as the total.
    #[serde(default)]
    pub include_total: Option<bool>,
}

impl QueryParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_QUERY_LIMIT)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    pub fn include_total(&self) -> bool {
        self.include_total.unwrap_or(true)
    }
}

/// One page of query results plus the match count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub results: Vec<Context>,
    /// Unpaginated match count, or the page size when `includeTotal` was
    /// disabled by the caller.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}
