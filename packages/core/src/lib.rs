//! RoamSpace Core
//!
//! Reads and writes Roam Research outlines for AI agents.
//!
//! # Modules
//!
//! - [`models`] - Block trees as returned by the Roam API and as parsed from markdown
//! - [`outline`] - Block tree rendering and indented-markdown parsing
//! - [`client`] - Roam backend API client (`RoamApi` trait + HTTP implementation)
//! - [`services`] - Page-level operations (`PageService`)
//! - [`config`] - Environment configuration
//! - [`mcp`] - MCP stdio server for AI agent integration

pub mod client;
pub mod config;
pub mod mcp;
pub mod models;
pub mod outline;
pub mod services;

// Re-export commonly used types
pub use client::{RoamApi, RoamApiError, RoamClient};
pub use config::{ConfigError, RoamConfig};
pub use models::*;
pub use outline::{parse_outline, render_block, write_outline};
pub use services::*;
