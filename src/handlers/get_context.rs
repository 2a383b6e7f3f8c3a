use serde::Serialize;

use crate::model::Context;
use crate::protocol::{GetContextParams, StoreErrorResponse, ToolResult};
use crate::service::ContextService;

#[derive(Debug, Serialize)]
struct GetContextResponse {
    found: bool,
    context: Option<Context>,
}

/// Handle a `context.get` tool call.
///
/// An unknown id is a successful lookup with `found: false`, never a tool
/// error — callers branch on presence.
pub async fn handle(params: GetContextParams, service: &ContextService) -> ToolResult {
    match service.retrieve(&params.id).await {
        Ok(context) => ToolResult::json(&GetContextResponse {
            found: context.is_some(),
            context,
        }),
        Err(err) => StoreErrorResponse::from(err).into(),
    }
}
