use serde::Serialize;

use crate::model::Context;
use crate::protocol::{FindSimilarParams, StoreErrorResponse, ToolResult};
use crate::service::ContextService;

#[derive(Debug, Serialize)]
struct FindSimilarResponse {
    results: Vec<Context>,
}

/// Handle a `context.find_similar` tool call.
///
/// An unknown anchor id yields an empty result set, not an error.
pub async fn handle(params: FindSimilarParams, service: &ContextService) -> ToolResult {
    match service.find_similar(&params.id, params.limit).await {
        Ok(results) => ToolResult::json(&FindSimilarResponse { results }),
        Err(err) => StoreErrorResponse::from(err).into(),
    }
}
