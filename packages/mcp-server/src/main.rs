//! RoamSpace MCP Server
//!
//! Standalone MCP (Model Context Protocol) server that gives AI agents read
//! and write access to one Roam Research graph.
//!
//! Architecture:
//!   AI Agent → stdio (JSON-RPC 2.0) → MCP Server → PageService → Roam backend API
//!
//! stdout carries protocol messages only. All logging goes to stderr.
//!
//! # Usage
//!
//! ```bash
//! ROAM_TOKEN=roam-graph-token-... ROAM_GRAPH_NAME=my-graph cargo run --bin roamspace-mcp
//! ```
//!
//! # Configuration
//!
//! Values may also come from a `.env` file in the working directory or a
//! parent; variables already set in the environment take precedence.
//!
//! - `ROAM_TOKEN` - graph API token (required)
//! - `ROAM_GRAPH_NAME` - graph name (required)
//! - `ROAM_API_BASE_URL` - API origin override (optional)
//! - `RUST_LOG` - log filter, defaults to `roamspace_mcp=info,roamspace_core=info`

use roamspace_core::config::{load_dotenv, GRAPH_NAME_VAR, TOKEN_VAR};
use roamspace_core::{mcp::run_mcp_server, PageService, RoamClient, RoamConfig};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "roamspace_mcp=info,roamspace_core=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("🔧 Initializing roamspace-mcp...");
    match load_dotenv() {
        Ok(Some(path)) => debug!("📄 Loaded environment from {}", path.display()),
        Ok(None) => debug!("No .env file found"),
        Err(e) => warn!("⚠️  {}", e),
    }
    for var in [TOKEN_VAR, GRAPH_NAME_VAR] {
        let present = std::env::var(var).is_ok_and(|value| !value.trim().is_empty());
        info!("   {}: {}", var, if present { "set" } else { "missing" });
    }

    let config = match RoamConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            error!("   Set ROAM_TOKEN and ROAM_GRAPH_NAME before starting the server");
            return Err(e.into());
        }
    };
    info!("📡 Graph: {} ({})", config.graph_name, config.base_url);

    let client = RoamClient::new(config)?;
    let page_service = Arc::new(PageService::new(Arc::new(client)));
    info!("✅ PageService initialized");

    info!("🚀 Starting MCP server (transport: stdio)");
    run_mcp_server(page_service).await
}
