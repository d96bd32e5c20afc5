//! Block Data Structures
//!
//! Two shapes of the same concept:
//!
//! - [`Block`] - read side, as pulled from a Roam graph (`:block/string`,
//!   `:block/children`, `:edit/time`, ...). Treated as read-only input.
//! - [`OutlineBlock`] - write side, built by the outline parser from indented
//!   markdown. Owns its children outright and carries a freshly generated uid.
//!
//! # Examples
//!
//! ```rust
//! use roamspace_core::models::Block;
//! use serde_json::json;
//!
//! let block: Block = serde_json::from_value(json!({
//!     ":block/string": "Meeting notes [[Project X]]",
//!     ":block/uid": "abc123xyz",
//!     ":edit/time": 1700000000000_i64,
//!     ":block/children": [
//!         { ":block/string": "Agenda", ":block/order": 0 }
//!     ]
//! }))
//! .unwrap();
//!
//! assert_eq!(block.children.len(), 1);
//! assert_eq!(block.children[0].string, "Agenda");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A block pulled from the remote graph
///
/// Every field is optional on the wire: absent text is an empty string and an
/// absent children list is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block text, may contain `[[page]]` reference tokens
    #[serde(rename = ":block/string", default)]
    pub string: String,

    /// Roam uid of the block
    #[serde(rename = ":block/uid", default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Last edit time in milliseconds since the epoch
    #[serde(rename = ":edit/time", default, skip_serializing_if = "Option::is_none")]
    pub edit_time: Option<i64>,

    /// Position among siblings
    #[serde(rename = ":block/order", default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Child blocks (order as received)
    #[serde(rename = ":block/children", default)]
    pub children: Vec<Block>,
}

impl Block {
    /// Create a block with text only
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            ..Default::default()
        }
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Block) -> Self {
        self.children.push(child);
        self
    }

    /// Sort children at every level by `:block/order`.
    ///
    /// Pull results do not guarantee child order. Blocks without an order sort
    /// first; ties keep their received order.
    pub fn sort_children_by_order(&mut self) {
        self.children
            .sort_by_key(|child| child.order.unwrap_or(i64::MIN));
        for child in &mut self.children {
            child.sort_children_by_order();
        }
    }
}

/// A block parsed from indented markdown, not yet persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineBlock {
    /// Generated uid, unique within one parse
    pub uid: String,

    /// Block text with the leading `- ` marker removed
    pub text: String,

    /// Nested children, in document order
    pub children: Vec<OutlineBlock>,
}

impl OutlineBlock {
    /// Create a childless block with a fresh uid
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            uid: new_block_uid(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Number of blocks in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineBlock::count).sum::<usize>()
    }
}

/// Generate a block uid
///
/// Roam accepts any string uid; a v4 UUID in simple form never collides
/// within a write batch or across concurrent writers.
pub fn new_block_uid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// A top-level block rendered to markdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    /// Indented markdown for the block and its descendants
    pub content: String,

    /// Edit time of the top-level block (milliseconds)
    pub timestamp: i64,
}

/// Result of reading a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub result: Vec<RenderedBlock>,
}

/// One page of blocks referencing a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReferences {
    pub result: Vec<RenderedBlock>,

    /// Pass back as `cursor` to fetch the next page; absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<i64>,
}
