use serde::Serialize;

use crate::protocol::{StoreErrorResponse, ToolResult};
use crate::service::ContextService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    backend: &'static str,
    total_contexts: usize,
}

/// Handle a `context.stats` tool call: backend label plus unfiltered size.
pub async fn handle(service: &ContextService) -> ToolResult {
    match service.count(None).await {
        Ok(total_contexts) => ToolResult::json(&StatsResponse {
            backend: service.backend_name(),
            total_contexts,
        }),
        Err(err) => StoreErrorResponse::from(err).into(),
    }
}
