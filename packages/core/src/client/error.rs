//! Roam API error types

use thiserror::Error;

/// Failures talking to the Roam backend API
#[derive(Error, Debug)]
pub enum RoamApiError {
    /// Connection, TLS, timeout, or body read failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Roam API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response parsed but did not have the expected shape
    #[error("Unexpected Roam API response: {0}")]
    UnexpectedResponse(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RoamApiError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn unexpected_response(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }
}
