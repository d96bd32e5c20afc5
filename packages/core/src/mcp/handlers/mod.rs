//! MCP Request Handlers
//!
//! Handler modules for different MCP operations.

pub mod initialize;
pub mod markdown;
pub mod pages;
pub mod tools;
