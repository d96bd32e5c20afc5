//! Service Layer Error Types

use crate::client::RoamApiError;
use crate::outline::OutlineWriteError;
use thiserror::Error;

/// Page service errors
#[derive(Error, Debug)]
pub enum PageServiceError {
    /// No page has the given title
    #[error("Page '{page_name}' not found")]
    PageNotFound { page_name: String },

    /// Remote API call failed outside of block creation
    #[error("Roam API error: {0}")]
    Api(#[from] RoamApiError),

    /// Block creation stopped partway; earlier blocks remain in the graph
    #[error("Outline write failed: {0}")]
    OutlineWrite(#[from] OutlineWriteError<RoamApiError>),
}

impl PageServiceError {
    pub fn page_not_found(page_name: impl Into<String>) -> Self {
        Self::PageNotFound {
            page_name: page_name.into(),
        }
    }
}
