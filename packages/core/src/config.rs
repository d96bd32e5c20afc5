//! Runtime configuration
//!
//! RoamConfig is built once at process start and handed to the client by
//! value. Nothing reads the environment after that.
//!
//! A `.env` file, when present, is loaded into the process environment first.
//! Variables that are already set win over the file.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the Roam API token
pub const TOKEN_VAR: &str = "ROAM_TOKEN";

/// Environment variable holding the graph name
pub const GRAPH_NAME_VAR: &str = "ROAM_GRAPH_NAME";

/// Optional override for the API origin
pub const BASE_URL_VAR: &str = "ROAM_API_BASE_URL";

/// Roam backend API origin
pub const DEFAULT_BASE_URL: &str = "https://api.roamresearch.com";

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("Failed to load .env file: {0}")]
    Dotenv(String),
}

/// Load the nearest `.env` (current directory, then parents)
///
/// Returns the loaded path, or `None` when there is no file.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    dotenv_outcome(dotenvy::dotenv())
}

/// Load a specific env file; a missing file is `None`, not an error
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<Option<PathBuf>, ConfigError> {
    let path = path.as_ref();
    dotenv_outcome(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn dotenv_outcome(
    loaded: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, ConfigError> {
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::Dotenv(e.to_string())),
    }
}

/// Connection settings for one Roam graph
#[derive(Clone, PartialEq, Eq)]
pub struct RoamConfig {
    /// Graph API token (sent as `X-Authorization: Bearer <token>`)
    pub api_token: String,

    /// Graph name as it appears in the Roam URL
    pub graph_name: String,

    /// API origin without trailing slash
    pub base_url: String,
}

impl fmt::Debug for RoamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoamConfig")
            .field("api_token", &"<redacted>")
            .field("graph_name", &self.graph_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RoamConfig {
    pub fn new(api_token: impl Into<String>, graph_name: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            graph_name: graph_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API origin (used against local fakes)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read `ROAM_TOKEN`, `ROAM_GRAPH_NAME` and `ROAM_API_BASE_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value lookup
    ///
    /// Required values that are missing or blank are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let api_token = required(TOKEN_VAR)?;
        let graph_name = required(GRAPH_NAME_VAR)?;

        let config = Self::new(api_token, graph_name);
        Ok(match lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(url) => config.with_base_url(url.trim()),
            None => config,
        })
    }
}
