//! MCP stdio Server
//!
//! Async Tokio task that handles JSON-RPC 2.0 requests over stdin/stdout.
//! One request is handled to completion before the next line is read.

use crate::mcp::handlers::{initialize, tools};
use crate::mcp::types::{MCPError, MCPRequest, MCPResponse};
use crate::services::PageService;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, error, info, instrument, warn};

/// Run the MCP stdio server
///
/// Reads JSON-RPC requests from stdin, processes them via handlers,
/// and writes responses to stdout. Runs until EOF on stdin.
///
/// # Returns
///
/// Returns Ok(()) when stdin is closed, or Err on fatal I/O errors
#[instrument(skip(page_service))]
pub async fn run_mcp_server(page_service: Arc<PageService>) -> anyhow::Result<()> {
    info!("🔌 MCP stdio server started");

    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    serve(&page_service, reader, writer).await?;

    info!("🔌 MCP stdio server stopped (stdin closed)");
    Ok(())
}

/// Serve newline-delimited JSON-RPC over any reader/writer pair
///
/// Notifications (requests without an id) are handled but never answered.
pub async fn serve<R, W>(
    page_service: &Arc<PageService>,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("📥 MCP request: {}", line);

        // Parse JSON-RPC request
        let request: MCPRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                warn!("❌ Failed to parse JSON-RPC request: {}", e);
                let error_response = MCPResponse::error(
                    Value::Null, // Unknown ID since parsing failed
                    MCPError::parse_error(format!("Invalid JSON: {}", e)),
                );
                write_response(&mut writer, &error_response).await?;
                continue;
            }
        };

        let method = request.method.clone();
        let Some(response) = handle_request(page_service, request).await else {
            debug!("🔕 MCP notification '{}' handled", method);
            continue;
        };

        debug!("📤 MCP response for method '{}' (id={})", method, response.id);
        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

/// Handle a JSON-RPC request and return a response
///
/// Returns `None` for notifications.
#[instrument(skip(service, request), fields(method = %request.method))]
pub async fn handle_request(
    service: &Arc<PageService>,
    request: MCPRequest,
) -> Option<MCPResponse> {
    if request.jsonrpc != "2.0" {
        return request.id.map(|id| {
            MCPResponse::error(
                id,
                MCPError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            )
        });
    }

    let is_notification = request.is_notification();
    let result = match request.method.as_str() {
        "initialize" => initialize::handle_initialize(request.params),
        "ping" => Ok(json!({})),
        "tools/list" => tools::handle_tools_list(request.params),
        "tools/call" => tools::handle_tools_call(service, request.params).await,
        method if method.starts_with("notifications/") => Ok(Value::Null),
        method if tools::TOOL_NAMES.contains(&method) => {
            tools::call_tool(service, method, request.params).await
        }
        _ => {
            warn!("⚠️  Unknown MCP method: {}", request.method);
            Err(MCPError::method_not_found(&request.method))
        }
    };

    if is_notification {
        if let Err(error) = result {
            warn!(
                "⚠️  MCP notification '{}' failed: {}",
                request.method, error.message
            );
        }
        return None;
    }
    let id = request.id.unwrap_or(Value::Null);

    Some(match result {
        Ok(result) => {
            debug!("✅ MCP request {} succeeded", id);
            MCPResponse::success(id, result)
        }
        Err(error) => {
            error!(
                "❌ MCP request {} failed: {} (code: {})",
                id, error.message, error.code
            );
            MCPResponse::error(id, error)
        }
    })
}

/// Write one JSON-RPC response line and flush
async fn write_response<W>(writer: &mut W, response: &MCPResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
