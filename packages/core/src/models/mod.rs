//! Data Models
//!
//! Block shapes exchanged with the Roam graph and with MCP clients:
//!
//! - `Block` - nested block tree as pulled from the remote store
//! - `OutlineBlock` - nested block tree parsed from indented markdown
//! - `RenderedBlock`, `PageContent`, `PageReferences` - markdown results

mod block;

pub use block::{new_block_uid, Block, OutlineBlock, PageContent, PageReferences, RenderedBlock};
