//! MCP Page Read Handlers
//!
//! `get_page_content` and `get_page_references`: pull blocks from the graph
//! and return them as indented markdown, newest edit first.

use crate::mcp::types::MCPError;
use crate::services::{PageService, DEFAULT_REFERENCE_LIMIT};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Upper bound on references returned per call
const MAX_REFERENCE_LIMIT: usize = 200;

/// Parameters for get_page_content method
#[derive(Debug, Deserialize)]
pub struct GetPageContentParams {
    /// Exact page title
    pub page_name: String,
}

/// Parameters for get_page_references method
#[derive(Debug, Deserialize)]
pub struct GetPageReferencesParams {
    /// Exact title of the referenced page
    pub page_name: String,

    /// Maximum results to return (default: 10)
    #[serde(default = "default_reference_limit")]
    pub limit: usize,

    /// `next_cursor` from a previous call
    #[serde(default)]
    pub cursor: Option<i64>,
}

fn default_reference_limit() -> usize {
    DEFAULT_REFERENCE_LIMIT
}

/// Handle get_page_content MCP request
pub async fn handle_get_page_content(
    service: &Arc<PageService>,
    params: Value,
) -> Result<Value, MCPError> {
    let params: GetPageContentParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    let content = service.get_page_content(&params.page_name).await?;

    serde_json::to_value(content)
        .map_err(|e| MCPError::internal_error(format!("JSON serialization failed: {}", e)))
}

/// Handle get_page_references MCP request
pub async fn handle_get_page_references(
    service: &Arc<PageService>,
    params: Value,
) -> Result<Value, MCPError> {
    let params: GetPageReferencesParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    if params.limit == 0 || params.limit > MAX_REFERENCE_LIMIT {
        return Err(MCPError::invalid_params(format!(
            "limit must be between 1 and {} (got {})",
            MAX_REFERENCE_LIMIT, params.limit
        )));
    }

    let references = service
        .get_page_references(&params.page_name, params.limit, params.cursor)
        .await?;

    serde_json::to_value(references)
        .map_err(|e| MCPError::internal_error(format!("JSON serialization failed: {}", e)))
}
