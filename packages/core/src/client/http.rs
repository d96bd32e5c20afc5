//! HTTP implementation of [`RoamApi`]
//!
//! Talks to the Roam backend API:
//!
//! - `POST {base}/api/graph/{graph}/q` with `{"query": ..., "args": [...]}`
//! - `POST {base}/api/graph/{graph}/write` with a serialized [`WriteAction`]

use crate::client::{RoamApi, RoamApiError, WriteAction};
use crate::config::RoamConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authorization header used by the Roam backend API (`X-Authorization`)
const AUTH_HEADER: &str = "x-authorization";

/// Roam backend API client for one graph
#[derive(Debug, Clone)]
pub struct RoamClient {
    http: reqwest::Client,
    base_url: String,
    graph_name: String,
}

impl RoamClient {
    pub fn new(config: RoamConfig) -> Result<Self, RoamApiError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|_| RoamApiError::unexpected_response("API token is not a valid header value"))?;
        auth.set_sensitive(true);
        headers.insert(AUTH_HEADER, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            graph_name: config.graph_name,
        })
    }

    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/graph/{}/{}", self.base_url, self.graph_name, name)
    }

    /// POST a JSON body and decode the response
    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, RoamApiError> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("❌ Roam API {} returned {}", url, status);
            return Err(RoamApiError::status(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(json!({ "result": "success", "status": status.as_u16() }));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl RoamApi for RoamClient {
    #[instrument(skip(self, query), fields(graph = %self.graph_name))]
    async fn query(&self, query: &str, args: Vec<Value>) -> Result<Value, RoamApiError> {
        debug!("📤 Roam query with {} args", args.len());
        let body = json!({ "query": query, "args": args });
        self.post(&self.endpoint("q"), &body).await
    }

    #[instrument(skip(self, action), fields(graph = %self.graph_name))]
    async fn write(&self, action: WriteAction) -> Result<Value, RoamApiError> {
        debug!("📤 Roam write: {:?}", action);
        self.post(&self.endpoint("write"), &action).await
    }
}
