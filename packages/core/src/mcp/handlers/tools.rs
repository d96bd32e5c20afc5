//! MCP Tools Handler
//!
//! Implements MCP-compliant tools/list and tools/call methods.
//! This module centralizes tool discovery and execution according to the
//! MCP 2024-11-05 specification.

use crate::mcp::handlers::{markdown, pages};
use crate::mcp::types::MCPError;
use crate::services::PageService;
use serde_json::{json, Value};
use std::sync::Arc;

/// Names of every tool this server exposes
pub const TOOL_NAMES: &[&str] = &[
    "get_page_content",
    "get_page_references",
    "write_to_page",
    "write_to_today",
];

/// Handle tools/list MCP request
///
/// # MCP Spec Compliance
///
/// Response format:
/// ```json
/// {
///   "tools": [
///     {
///       "name": "tool_name",
///       "description": "...",
///       "inputSchema": { ... }
///     }
///   ]
/// }
/// ```
pub fn handle_tools_list(_params: Value) -> Result<Value, MCPError> {
    Ok(json!({
        "tools": get_tool_schemas()
    }))
}

/// Handle tools/call MCP request
///
/// Executes a tool by name with provided arguments.
///
/// Request format:
/// ```json
/// {
///   "name": "tool_name",
///   "arguments": { ... }
/// }
/// ```
///
/// Tool failures are not JSON-RPC errors: they come back as a normal result
/// with `isError: true` and the message as text content.
pub async fn handle_tools_call(
    service: &Arc<PageService>,
    params: Value,
) -> Result<Value, MCPError> {
    let tool_name = params["name"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing 'name' parameter".to_string()))?;

    // Extract arguments (defaults to empty object if missing)
    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

    if !TOOL_NAMES.contains(&tool_name) {
        return Err(MCPError::invalid_params(format!(
            "Unknown tool: {}",
            tool_name
        )));
    }

    match call_tool(service, tool_name, arguments).await {
        Ok(data) => {
            let text = serde_json::to_string_pretty(&data).map_err(|e| {
                MCPError::internal_error(format!("JSON serialization failed: {}", e))
            })?;

            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": text
                }],
                "isError": false
            }))
        }
        Err(e) => Ok(json!({
            "content": [{
                "type": "text",
                "text": format!("Error: {}", e.message)
            }],
            "isError": true
        })),
    }
}

/// Route a tool name to its handler
///
/// Also used for direct JSON-RPC calls where the method is the tool name.
pub async fn call_tool(
    service: &Arc<PageService>,
    tool_name: &str,
    arguments: Value,
) -> Result<Value, MCPError> {
    match tool_name {
        "get_page_content" => pages::handle_get_page_content(service, arguments).await,
        "get_page_references" => pages::handle_get_page_references(service, arguments).await,
        "write_to_page" => markdown::handle_write_to_page(service, arguments).await,
        "write_to_today" => markdown::handle_write_to_today(service, arguments).await,
        _ => Err(MCPError::method_not_found(tool_name)),
    }
}

/// JSON schemas for all tools
///
/// Schemas are maintained by hand so descriptions can be written for the
/// agent reading them.
fn get_tool_schemas() -> Value {
    json!([
        {
            "name": "get_page_content",
            "description": "Get the content of a Roam Research page as indented markdown. Returns each top-level block with its children (up to 5 levels), most recently edited first. [[Page]] links are returned as [Page](Page).",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "page_name": {
                        "type": "string",
                        "description": "Exact title of the page to retrieve"
                    }
                },
                "required": ["page_name"]
            }
        },
        {
            "name": "get_page_references",
            "description": "Get blocks that reference a Roam Research page, as indented markdown, newest first. Supports cursor pagination: pass next_cursor from the previous response to get older results.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "page_name": {
                        "type": "string",
                        "description": "Exact title of the page to get references for"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 200,
                        "description": "Maximum number of results to return (default: 10)"
                    },
                    "cursor": {
                        "type": "integer",
                        "description": "Timestamp cursor for pagination (next_cursor from the previous response)"
                    }
                },
                "required": ["page_name"]
            }
        },
        {
            "name": "write_to_page",
            "description": "Write an indented markdown outline to an existing Roam Research page. Each non-blank line becomes a block; indented lines become children of the line above them. A leading '- ' is optional. Blocks are appended after existing content.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "page_name": {
                        "type": "string",
                        "description": "Exact title of the page to write to (must already exist)"
                    },
                    "content": {
                        "type": "string",
                        "description": "Indented markdown outline, e.g. \"- Parent\\n  - Child\""
                    }
                },
                "required": ["page_name", "content"]
            }
        },
        {
            "name": "write_to_today",
            "description": "Write an indented markdown outline to today's daily page in Roam Research, creating the daily page if it does not exist yet.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Indented markdown outline, e.g. \"- Parent\\n  - Child\""
                    }
                },
                "required": ["content"]
            }
        }
    ])
}

// Include tests
#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;
