use serde::Serialize;

use crate::model::ContextPayload;
use crate::protocol::{StoreErrorResponse, ToolResult};
use crate::service::ContextService;

#[derive(Debug, Serialize)]
struct AddContextResponse {
    id: String,
}

/// Handle a `context.add` tool call.
///
/// Validation failures (empty title, out-of-range score) and capacity
/// exhaustion surface through the domain error taxonomy; nothing is stored
/// on failure.
pub async fn handle(payload: ContextPayload, service: &ContextService) -> ToolResult {
    match service.ingest(payload).await {
        Ok(id) => ToolResult::json(&AddContextResponse { id }),
        Err(err) => StoreErrorResponse::from(err).into(),
    }
}
