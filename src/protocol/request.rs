use serde::Deserialize;

use crate::model::{ContextPatch, QueryParams};

/// JSON-RPC 2.0 ID — may be a number or string per spec.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

// ---------------------------------------------------------------------------
// Tool argument shapes (the `context.add` tool takes a ContextPayload as-is)
// ---------------------------------------------------------------------------

/// Arguments for `context.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetContextParams {
    pub id: String,
}

/// Arguments for `context.query`: the store's filter parameters plus a
/// front-end-only flag re-ranking the returned page against the query text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContextsParams {
    #[serde(flatten)]
    pub filter: QueryParams,
    #[serde(default)]
    pub rank_by_query: bool,
}

/// Arguments for `context.update`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContextParams {
    pub id: String,
    pub patch: ContextPatch,
}

/// Arguments for `context.delete`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteContextParams {
    pub id: String,
}

/// Arguments for `context.find_similar`.
#[derive(Debug, Clone, Deserialize)]
pub struct FindSimilarParams {
    pub id: String,
    #[serde(default)]
    pub limit: Option<usize>,
}
