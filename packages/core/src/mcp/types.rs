//! MCP JSON-RPC 2.0 Types
//!
//! Type definitions for Model Context Protocol communication.
//! Implements JSON-RPC 2.0 specification for stdio-based MCP transport.

use crate::services::PageServiceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request structure
///
/// A request without `id` is a notification and gets no response.
///
/// # Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 1,
///     "method": "tools/call",
///     "params": {
///         "name": "get_page_content",
///         "arguments": { "page_name": "Reading List" }
///     }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct MCPRequest {
    /// JSON-RPC version (must be "2.0")
    pub jsonrpc: String,

    /// Request identifier, number or string (absent for notifications)
    #[serde(default)]
    pub id: Option<Value>,

    /// Method name to invoke
    pub method: String,

    /// Method parameters as JSON value
    #[serde(default)]
    pub params: Value,
}

impl MCPRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 response structure
///
/// # Success Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 1,
///     "result": { "content": [{ "type": "text", "text": "..." }], "isError": false }
/// }
/// ```
///
/// # Error Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 1,
///     "error": {
///         "code": -32601,
///         "message": "Method not found: pages/list"
///     }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct MCPResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier (matches request; null if it could not be read)
    pub id: Value,

    /// Success result (mutually exclusive with error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error information (mutually exclusive with result)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

/// JSON-RPC 2.0 error structure
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MCPError {
    /// Error code (standard JSON-RPC or application-specific)
    pub code: i32,

    /// Human-readable error message
    pub message: String,
}

// JSON-RPC 2.0 standard error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// Application error codes (-32000 to -32099)
pub const PAGE_NOT_FOUND: i32 = -32000;
pub const BLOCK_CREATION_FAILED: i32 = -32001;
pub const REMOTE_API_ERROR: i32 = -32002;

impl MCPError {
    /// Create a parse error
    pub fn parse_error(message: String) -> Self {
        Self {
            code: PARSE_ERROR,
            message,
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: String) -> Self {
        Self {
            code: INVALID_REQUEST,
            message,
        }
    }

    /// Create a method not found error
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", method),
        }
    }

    /// Create an invalid params error
    pub fn invalid_params(message: String) -> Self {
        Self {
            code: INVALID_PARAMS,
            message,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: String) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message,
        }
    }

    /// Create a page not found error
    pub fn page_not_found(page_name: &str) -> Self {
        Self {
            code: PAGE_NOT_FOUND,
            message: format!("Page '{}' not found", page_name),
        }
    }

    /// Create a block creation failed error
    pub fn block_creation_failed(message: String) -> Self {
        Self {
            code: BLOCK_CREATION_FAILED,
            message,
        }
    }

    /// Create a remote API error
    pub fn remote_api_error(message: String) -> Self {
        Self {
            code: REMOTE_API_ERROR,
            message,
        }
    }
}

impl From<PageServiceError> for MCPError {
    fn from(err: PageServiceError) -> Self {
        match err {
            PageServiceError::PageNotFound { page_name } => Self::page_not_found(&page_name),
            PageServiceError::OutlineWrite(e) => Self::block_creation_failed(e.to_string()),
            PageServiceError::Api(e) => Self::remote_api_error(e.to_string()),
        }
    }
}

impl MCPResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, error: MCPError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

// Include tests
#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
