pub mod add_context;
pub mod delete_context;
pub mod find_similar;
pub mod get_context;
pub mod health;
pub mod query_contexts;
pub mod stats;
pub mod update_context;

use crate::protocol::{
    DeleteContextParams, FindSimilarParams, GetContextParams, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, QueryContextsParams, StoreErrorCode, StoreErrorResponse, ToolCallParams,
    ToolResult, UpdateContextParams,
};
use crate::service::ContextService;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, service: &ContextService) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "mcp-context-store",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => Some(JsonRpcResponse::success(req.id.clone(), tool_listing())),

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            let tool_result = dispatch_tool_call(&params, service).await;
            let result_json = serde_json::to_value(&tool_result)
                .expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

async fn dispatch_tool_call(params: &ToolCallParams, service: &ContextService) -> ToolResult {
    match params.name.as_str() {
        "context.add" => {
            // A malformed payload — unrecognized kind, missing metadata,
            // unknown fields — is a validation failure of the entity, not a
            // protocol slip: report it through the domain taxonomy.
            let payload = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return StoreErrorResponse::new(
                            StoreErrorCode::ContextInvalid,
                            format!("invalid context: {e}"),
                        )
                        .into();
                    }
                },
                None => {
                    return StoreErrorResponse::canonical(StoreErrorCode::ContextInvalid).into();
                }
            };
            add_context::handle(payload, service).await
        }

        "context.get" => {
            let get_params: GetContextParams = match parse_arguments(params) {
                Ok(p) => p,
                Err(err) => return err,
            };
            get_context::handle(get_params, service).await
        }

        "context.query" => {
            let query_params: QueryContextsParams = match parse_arguments(params) {
                Ok(p) => p,
                Err(err) => return err,
            };
            query_contexts::handle(query_params, service).await
        }

        "context.update" => {
            let update_params: UpdateContextParams = match &params.arguments {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return StoreErrorResponse::new(
                            StoreErrorCode::ContextInvalid,
                            format!("invalid context patch: {e}"),
                        )
                        .into();
                    }
                },
                None => {
                    return StoreErrorResponse::canonical(StoreErrorCode::ContextInvalid).into();
                }
            };
            update_context::handle(update_params, service).await
        }

        "context.delete" => {
            let delete_params: DeleteContextParams = match parse_arguments(params) {
                Ok(p) => p,
                Err(err) => return err,
            };
            delete_context::handle(delete_params, service).await
        }

        "context.find_similar" => {
            let similar_params: FindSimilarParams = match parse_arguments(params) {
                Ok(p) => p,
                Err(err) => return err,
            };
            find_similar::handle(similar_params, service).await
        }

        "context.stats" => stats::handle(service).await,

        "health" => health::handle().await,

        _ => ToolResult::error(format!("Unknown tool: {}", params.name)),
    }
}

/// Deserialize tool arguments, reporting failures as a plain error block
/// naming the tool.
fn parse_arguments<T: serde::de::DeserializeOwned>(
    params: &ToolCallParams,
) -> Result<T, ToolResult> {
    match &params.arguments {
        Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
            ToolResult::error(format!("Invalid arguments for {}: {e}", params.name))
        }),
        None => Err(ToolResult::error(format!(
            "Missing arguments for {}",
            params.name
        ))),
    }
}

/// The advertised tool surface. The `type` enums here mirror the closed
/// `ContextType` set.
fn tool_listing() -> serde_json::Value {
    let type_names: serde_json::Value = crate::model::ContextType::ALL
        .iter()
        .map(|k| k.as_str())
        .collect();

    serde_json::json!({
        "tools": [
            {
                "name": "context.add",
                "description": "Store a new knowledge context (code example, best practice, security tip, ...)",
                "inputSchema": {
                    "type": "object",
                    "required": ["type", "content", "metadata"],
                    "additionalProperties": false,
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "Optional caller-chosen id; assigned by the store when absent"
                        },
                        "type": {
                            "type": "string",
                            "enum": type_names.clone(),
                            "description": "Knowledge kind"
                        },
                        "content": {
                            "type": "string",
                            "description": "Free-form body: code, prose, or a command transcript"
                        },
                        "metadata": {
                            "type": "object",
                            "required": ["title"],
                            "additionalProperties": false,
                            "properties": {
                                "title": { "type": "string", "minLength": 1 },
                                "description": { "type": "string" },
                                "tags": { "type": "array", "items": { "type": "string" } },
                                "language": { "type": "string" },
                                "contractType": { "type": "string" },
                                "author": { "type": "string" },
                                "relevanceScore": {
                                    "type": "number",
                                    "minimum": 0,
                                    "maximum": 1,
                                    "description": "Intrinsic importance; defaults to 0.8"
                                }
                            }
                        },
                        "relatedContextIds": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Cross-reference hints, not validated for existence"
                        }
                    }
                }
            },
            {
                "name": "context.get",
                "description": "Retrieve a single context by id",
                "inputSchema": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string" }
                    }
                }
            },
            {
                "name": "context.query",
                "description": "Query contexts by type, tags, contract type, and free text; relevance-ordered and paginated",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Case-insensitive substring matched across content, title, description, and tags"
                        },
                        "types": {
                            "type": "array",
                            "items": { "type": "string", "enum": type_names.clone() },
                            "description": "Inclusion set; empty means no type filter"
                        },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "OR semantics: one shared tag matches"
                        },
                        "contractType": { "type": "string", "description": "Exact match" },
                        "limit": { "type": "integer", "minimum": 0, "description": "Page size, default 10" },
                        "offset": { "type": "integer", "minimum": 0, "description": "Page start, default 0" },
                        "includeTotal": {
                            "type": "boolean",
                            "description": "Compute the unpaginated match count (default true)"
                        },
                        "rankByQuery": {
                            "type": "boolean",
                            "description": "Apply the query text as a graded re-ranking of the returned page instead of a substring filter"
                        }
                    }
                }
            },
            {
                "name": "context.update",
                "description": "Merge a partial update onto an existing context",
                "inputSchema": {
                    "type": "object",
                    "required": ["id", "patch"],
                    "properties": {
                        "id": { "type": "string" },
                        "patch": {
                            "type": "object",
                            "additionalProperties": false,
                            "properties": {
                                "type": { "type": "string", "enum": type_names },
                                "content": { "type": "string" },
                                "metadata": {
                                    "type": "object",
                                    "additionalProperties": false,
                                    "properties": {
                                        "title": { "type": "string", "minLength": 1 },
                                        "description": { "type": "string" },
                                        "tags": { "type": "array", "items": { "type": "string" } },
                                        "language": { "type": "string" },
                                        "contractType": { "type": "string" },
                                        "author": { "type": "string" },
                                        "relevanceScore": { "type": "number", "minimum": 0, "maximum": 1 }
                                    }
                                },
                                "relatedContextIds": { "type": "array", "items": { "type": "string" } }
                            }
                        }
                    }
                }
            },
            {
                "name": "context.delete",
                "description": "Remove a context by id",
                "inputSchema": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string" }
                    }
                }
            },
            {
                "name": "context.find_similar",
                "description": "Find contexts most similar to an anchor (shared tags, matching kind)",
                "inputSchema": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string", "description": "Anchor context id" },
                        "limit": { "type": "integer", "minimum": 0, "description": "Maximum results, default 5" }
                    }
                }
            },
            {
                "name": "context.stats",
                "description": "Report the backend in use and the number of stored contexts",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "health",
                "description": "Liveness check",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    })
}
