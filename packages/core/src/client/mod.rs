//! Roam Research Backend API
//!
//! - [`RoamApi`] - query/write abstraction consumed by the page service
//! - [`RoamClient`] - reqwest implementation against `api.roamresearch.com`
//! - [`queries`] - Datalog query texts
//! - [`WriteAction`] - write endpoint payloads

mod api;
mod error;
mod http;
pub mod queries;

pub use api::{BlockLocation, NewBlock, NewPage, RoamApi, WriteAction, APPEND_ORDER};
pub use error::RoamApiError;
pub use http::RoamClient;
