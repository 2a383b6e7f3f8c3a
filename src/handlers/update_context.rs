use serde::Serialize;

use crate::protocol::{StoreErrorResponse, ToolResult, UpdateContextParams};
use crate::service::ContextService;

#[derive(Debug, Serialize)]
struct UpdateContextResponse {
    success: bool,
}

/// Handle a `context.update` tool call.
///
/// `success: false` means the id was unknown; the patch is validated before
/// any storage access, so a rejected patch changes nothing.
pub async fn handle(params: UpdateContextParams, service: &ContextService) -> ToolResult {
    match service.update(&params.id, params.patch).await {
        Ok(success) => ToolResult::json(&UpdateContextResponse { success }),
        Err(err) => StoreErrorResponse::from(err).into(),
    }
}
