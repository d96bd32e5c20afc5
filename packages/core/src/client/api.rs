//! RoamApi Trait - Remote Graph Abstraction
//!
//! The page service talks to the graph only through this trait: one Datalog
//! query endpoint and one write endpoint. `RoamClient` implements it over
//! HTTP; tests implement it in memory.
//!
//! # Examples
//!
//! ```rust
//! use roamspace_core::client::WriteAction;
//! use serde_json::json;
//!
//! let action = WriteAction::create_block("page-uid", "Hello", "block-uid");
//! assert_eq!(
//!     serde_json::to_value(&action).unwrap(),
//!     json!({
//!         "action": "create-block",
//!         "location": { "parent-uid": "page-uid", "order": "last" },
//!         "block": { "string": "Hello", "uid": "block-uid" }
//!     })
//! );
//! ```

use crate::client::RoamApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Access to one Roam graph
///
/// Implementations must be `Send + Sync`; the MCP server shares one instance
/// behind an `Arc`.
#[async_trait]
pub trait RoamApi: Send + Sync {
    /// Run a Datalog query; returns the raw `{"result": [...]}` body
    async fn query(&self, query: &str, args: Vec<Value>) -> Result<Value, RoamApiError>;

    /// Apply one write action; returns the response body, or
    /// `{"result": "success", "status": <code>}` when the body is empty
    async fn write(&self, action: WriteAction) -> Result<Value, RoamApiError>;
}

/// Order value that appends after existing siblings
pub const APPEND_ORDER: &str = "last";

/// Write API actions used by this server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum WriteAction {
    CreateBlock {
        location: BlockLocation,
        block: NewBlock,
    },
    CreatePage {
        page: NewPage,
    },
}

impl WriteAction {
    /// Append a block as the last child of `parent_uid`
    pub fn create_block(
        parent_uid: impl Into<String>,
        string: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self::CreateBlock {
            location: BlockLocation {
                parent_uid: parent_uid.into(),
                order: APPEND_ORDER.to_string(),
            },
            block: NewBlock {
                string: string.into(),
                uid: Some(uid.into()),
            },
        }
    }

    pub fn create_page(title: impl Into<String>, uid: impl Into<String>) -> Self {
        Self::CreatePage {
            page: NewPage {
                title: title.into(),
                uid: Some(uid.into()),
            },
        }
    }
}

/// Where a new block goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockLocation {
    #[serde(rename = "parent-uid")]
    pub parent_uid: String,
    /// Sibling position; always [`APPEND_ORDER`] for blocks written here
    pub order: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBlock {
    pub string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPage {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_page_wire_format() {
        let action = WriteAction::create_page("October 17th, 2026", "10-17-2026");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "action": "create-page",
                "page": { "title": "October 17th, 2026", "uid": "10-17-2026" }
            })
        );
    }
}
