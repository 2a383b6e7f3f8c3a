use serde::{Deserialize, Serialize};

use crate::model::StoreError;

use super::request::RpcId;

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 response layer
// ---------------------------------------------------------------------------

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RpcId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RpcId>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RpcId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object (protocol-level errors).
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn parse_error() -> Self {
        Self { code: -32700, message: "Parse error".into(), data: None }
    }

    pub fn invalid_request() -> Self {
        Self { code: -32600, message: "Invalid Request".into(), data: None }
    }

    pub fn invalid_request_with(detail: impl Into<String>) -> Self {
        Self { code: -32600, message: detail.into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self { code: -32602, message: detail.into(), data: None }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self { code: -32603, message: detail.into(), data: None }
    }
}

// ---------------------------------------------------------------------------
// MCP tool result layer (returned inside a *successful* JSON-RPC response)
// ---------------------------------------------------------------------------

/// MCP tool call result wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: Vec<ToolResultContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// A single content block inside a tool result.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolResultContent {
                content_type: "text".into(),
                text: text.into(),
            }],
            is_error: true,
        }
    }

    /// Serialize a payload as the single text block of a successful result.
    pub fn json(payload: &impl Serialize) -> Self {
        match serde_json::to_string(payload) {
            Ok(json) => Self::text(format!("{json}\n")),
            Err(e) => {
                tracing::error!(error = %e, "tool payload serialization failed");
                StoreErrorResponse::canonical(StoreErrorCode::InternalError).into()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Store domain error layer
// ---------------------------------------------------------------------------

/// Domain error code carried to structured clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorCode {
    ContextInvalid,
    StoreFull,
    StorageUnavailable,
    InternalError,
}

impl StoreErrorCode {
    /// Map to the corresponding JSON-RPC 2.0 error code.
    ///
    /// Input validation failures → -32602 (Invalid params)
    /// Server-side failures     → -32603 (Internal error)
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::ContextInvalid => -32602,
            Self::StoreFull | Self::StorageUnavailable | Self::InternalError => -32603,
        }
    }
}

/// Domain error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreErrorBody {
    pub code: StoreErrorCode,
    pub message: String,
}

/// Top-level domain error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreErrorResponse {
    pub error: StoreErrorBody,
}

impl StoreErrorResponse {
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: StoreErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    /// Construct with the canonical message for a given code.
    pub fn canonical(code: StoreErrorCode) -> Self {
        let message = match &code {
            StoreErrorCode::ContextInvalid => "Context payload is invalid",
            StoreErrorCode::StoreFull => "Context store is at capacity",
            StoreErrorCode::StorageUnavailable => "Storage backend is unavailable",
            StoreErrorCode::InternalError => "Internal error",
        };
        Self::new(code, message)
    }
}

/// Map a store failure onto the wire taxonomy, keeping the error detail as
/// the human-readable message.
impl From<StoreError> for StoreErrorResponse {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::Validation(_) => StoreErrorCode::ContextInvalid,
            StoreError::Capacity { .. } => StoreErrorCode::StoreFull,
            StoreError::Transport(_) => StoreErrorCode::StorageUnavailable,
            StoreError::Serialization(_) => StoreErrorCode::InternalError,
        };
        Self::new(code, err.to_string())
    }
}

/// Convert a domain error into a JSON-RPC error.
///
/// The JSON-RPC `code` is derived from the domain code, the message is the
/// human-readable detail, and the full domain object rides in `data` for
/// structured clients.
impl From<StoreErrorResponse> for JsonRpcError {
    fn from(store: StoreErrorResponse) -> Self {
        Self {
            code: store.error.code.json_rpc_code(),
            message: store.error.message.clone(),
            data: Some(
                serde_json::to_value(&store)
                    .expect("StoreErrorResponse must serialize to JSON Value"),
            ),
        }
    }
}

/// Convert a domain error into a tool result with `isError: true`. The text
/// content is the JSON-serialized response, preserving the structured error
/// for clients that inspect tool output.
impl From<StoreErrorResponse> for ToolResult {
    fn from(store: StoreErrorResponse) -> Self {
        let json = serde_json::to_string(&store)
            .expect("StoreErrorResponse must serialize to JSON string");
        Self::error(format!("{json}\n"))
    }
}
