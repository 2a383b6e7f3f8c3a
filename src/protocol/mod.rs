pub mod request;
pub mod response;

pub use request::{
    DeleteContextParams, FindSimilarParams, GetContextParams, InitializeParams, JsonRpcRequest,
    QueryContextsParams, RpcId, ToolCallParams, UpdateContextParams,
};
pub use response::{
    JsonRpcError, JsonRpcResponse, StoreErrorBody, StoreErrorCode, StoreErrorResponse, ToolResult,
    ToolResultContent,
};
