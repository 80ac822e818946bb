//! Remote template retrieval
//!
//! A few project files (`bin/restart`, `Procfile`) are not embedded in the
//! binary but downloaded from the template repository at
//! `<host>/<branch>/<path>`. Host and branch come from `TEMPLATE_HOST` and
//! `TEMPLATE_BRANCH`.

use crate::error::OperationError;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_TEMPLATE_HOST: &str = "https://raw.github.com/thegarage/thegarage-template";
pub const DEFAULT_TEMPLATE_BRANCH: &str = "master";

pub const TEMPLATE_HOST_ENV: &str = "TEMPLATE_HOST";
pub const TEMPLATE_BRANCH_ENV: &str = "TEMPLATE_BRANCH";

const VERSION: &str = env!("CARGO_PKG_VERSION");
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where remote template files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    pub host: String,
    pub branch: String,
}

impl Default for RemoteSource {
    fn default() -> Self {
        Self {
            host: DEFAULT_TEMPLATE_HOST.to_string(),
            branch: DEFAULT_TEMPLATE_BRANCH.to_string(),
        }
    }
}

impl RemoteSource {
    /// Read host and branch from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or empty values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            host: pick(TEMPLATE_HOST_ENV, DEFAULT_TEMPLATE_HOST),
            branch: pick(TEMPLATE_BRANCH_ENV, DEFAULT_TEMPLATE_BRANCH),
        }
    }

    /// Full URL of a template file
    pub fn url_for(&self, remote_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.branch.trim_matches('/'),
            remote_path.trim_start_matches('/')
        )
    }
}

/// Downloads template files by repository-relative path.
pub trait Fetcher {
    fn fetch(&self, remote_path: &str) -> Result<Vec<u8>, OperationError>;
}

/// Fetches over HTTP(S) with a blocking client.
pub struct HttpFetcher {
    source: RemoteSource,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(source: RemoteSource) -> Result<Self, OperationError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("railyard/{}", VERSION))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| OperationError::fetch(source.host.clone(), e.to_string()))?;
        Ok(Self { source, client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, remote_path: &str) -> Result<Vec<u8>, OperationError> {
        let url = self.source.url_for(remote_path);
        info!("fetch: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| OperationError::fetch(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OperationError::fetch(&url, format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .map_err(|e| OperationError::fetch(&url, e.to_string()))?;
        debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
