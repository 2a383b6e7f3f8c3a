use serde::Serialize;

use crate::protocol::ToolResult;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Liveness stub: answers without touching storage.
pub async fn handle() -> ToolResult {
    ToolResult::json(&HealthResponse { status: "ok" })
}
