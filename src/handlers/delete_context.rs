use serde::Serialize;

use crate::protocol::{DeleteContextParams, StoreErrorResponse, ToolResult};
use crate::service::ContextService;

#[derive(Debug, Serialize)]
struct DeleteContextResponse {
    success: bool,
}

/// Handle a `context.delete` tool call. Hard removal; `success: false` for
/// an unknown id.
pub async fn handle(params: DeleteContextParams, service: &ContextService) -> ToolResult {
    match service.delete(&params.id).await {
        Ok(success) => ToolResult::json(&DeleteContextResponse { success }),
        Err(err) => StoreErrorResponse::from(err).into(),
    }
}
