//! MCP Outline Write Handlers
//!
//! `write_to_page` and `write_to_today`: parse indented markdown into a block
//! outline and create the blocks under the target page, parents first.
//!
//! # Examples
//!
//! ```rust,no_run
//! use serde_json::json;
//! use std::sync::Arc;
//! use roamspace_core::services::PageService;
//! use roamspace_core::mcp::handlers::markdown::handle_write_to_page;
//!
//! # async fn example(service: Arc<PageService>) -> Result<(), roamspace_core::mcp::MCPError> {
//! let params = json!({
//!     "page_name": "Reading List",
//!     "content": "- Books\n  - [[The Rust Programming Language]]\n  - Zero to Production"
//! });
//! let result = handle_write_to_page(&service, params).await?;
//! println!("Created {} blocks", result["created_count"]);
//! # Ok(())
//! # }
//! ```

use crate::mcp::types::MCPError;
use crate::models::OutlineBlock;
use crate::outline::parse_outline;
use crate::services::{PageService, PageWriteResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Maximum markdown content size (1MB) to prevent resource exhaustion
const MAX_MARKDOWN_SIZE: usize = 1_000_000;

/// Maximum number of blocks that can be created in a single write
const MAX_BLOCKS_PER_WRITE: usize = 1000;

/// Parameters for write_to_page method
#[derive(Debug, Deserialize)]
pub struct WriteToPageParams {
    /// Exact title of an existing page
    pub page_name: String,

    /// Indented markdown; one block per non-blank line
    pub content: String,
}

/// Parameters for write_to_today method
#[derive(Debug, Deserialize)]
pub struct WriteToTodayParams {
    /// Indented markdown; one block per non-blank line
    pub content: String,
}

/// Handle write_to_page MCP request
pub async fn handle_write_to_page(
    service: &Arc<PageService>,
    params: Value,
) -> Result<Value, MCPError> {
    let params: WriteToPageParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let blocks = parse_checked(&params.content)?;
    let written = service
        .write_blocks_to_page(&params.page_name, &blocks)
        .await?;

    Ok(write_response(
        format!("Successfully wrote to page '{}'", params.page_name),
        written,
    ))
}

/// Handle write_to_today MCP request
pub async fn handle_write_to_today(
    service: &Arc<PageService>,
    params: Value,
) -> Result<Value, MCPError> {
    let params: WriteToTodayParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let blocks = parse_checked(&params.content)?;
    let written = service.write_blocks_to_today(&blocks).await?;

    Ok(write_response(
        "Successfully wrote to today's page".to_string(),
        written,
    ))
}

/// Validate size limits around parsing, before any block is created
fn parse_checked(content: &str) -> Result<Vec<OutlineBlock>, MCPError> {
    if content.len() > MAX_MARKDOWN_SIZE {
        return Err(MCPError::invalid_params(format!(
            "Markdown content exceeds maximum size of {} bytes (got {} bytes)",
            MAX_MARKDOWN_SIZE,
            content.len()
        )));
    }

    let blocks = parse_outline(content);
    let total: usize = blocks.iter().map(OutlineBlock::count).sum();
    if total > MAX_BLOCKS_PER_WRITE {
        return Err(MCPError::invalid_params(format!(
            "Content has {} blocks, exceeding maximum of {}",
            total, MAX_BLOCKS_PER_WRITE
        )));
    }

    Ok(blocks)
}

fn write_response(message: String, written: PageWriteResult) -> Value {
    json!({
        "success": true,
        "message": message,
        "page_uid": written.page_uid,
        "created_count": written.created_count,
        "details": written.details
    })
}

// Include tests
#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;
