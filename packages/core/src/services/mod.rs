//! Business Services
//!
//! - `PageService` - page reads (rendered to markdown) and outline writes
//!
//! Services sit between the MCP handlers and the Roam API client.

pub mod error;
pub mod page_service;

pub use error::PageServiceError;
pub use page_service::{
    daily_page_title, daily_page_uid, PageService, PageWriteResult, DEFAULT_REFERENCE_LIMIT,
};
