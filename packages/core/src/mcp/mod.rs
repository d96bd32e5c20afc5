//! Model Context Protocol (MCP) Integration
//!
//! Stdio-based JSON-RPC 2.0 server exposing Roam page operations as tools.
//!
//! # Architecture
//!
//! - **Shared PageService**: Handlers delegate to the page service
//! - **stdio transport**: Newline-delimited JSON-RPC 2.0 over stdin/stdout
//! - **Sequential**: One request completes before the next is read
//!
//! # Usage
//!
//! AI agents send JSON-RPC requests via stdio:
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 1,
//!   "method": "tools/call",
//!   "params": {
//!     "name": "write_to_page",
//!     "arguments": {
//!       "page_name": "Reading List",
//!       "content": "- Dune\n  - Frank Herbert"
//!     }
//!   }
//! }
//! ```

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{handle_request, run_mcp_server, serve};
pub use types::{MCPError, MCPRequest, MCPResponse};
