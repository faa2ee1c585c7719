//! Index document retrieval
//!
//! The index always lives at `index.yaml` relative to the repository base,
//! which is either an HTTP(S) URL or a local site directory.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use super::error::FetchError;

/// File name of the index document under the repository base
pub const INDEX_FILE: &str = "index.yaml";

/// Source of raw index text
#[async_trait]
pub trait IndexFetcher: Send + Sync {
    /// Retrieve the full index document
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Human-readable location, for logging
    fn location(&self) -> String;
}

/// Fetches `index.yaml` over HTTP(S)
pub struct HttpFetcher {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpFetcher {
    /// Create a fetcher for the index under `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let url = index_url(base_url)?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("chartdeck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(url.as_str(), e))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

/// Join the index file name onto a base URL
///
/// A base without a trailing slash is treated as a directory, so
/// `https://host/charts` resolves to `https://host/charts/index.yaml`.
fn index_url(base_url: &str) -> Result<reqwest::Url, FetchError> {
    let mut base =
        reqwest::Url::parse(base_url).map_err(|e| FetchError::transport(base_url, e))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(INDEX_FILE).map_err(|e| FetchError::transport(base_url, e))
}

#[async_trait]
impl IndexFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!("Fetching index from {}", self.url);

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::transport(self.url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::transport(self.url.as_str(), e))?;

        debug!("Index loaded, {} bytes", text.len());
        Ok(text)
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}

/// Reads `index.yaml` from a local site directory
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: site_dir.into().join(INDEX_FILE),
        }
    }
}

#[async_trait]
impl IndexFetcher for FileFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!("Reading index from {}", self.path.display());

        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::Status {
                status: 404,
                status_text: "Not Found".to_string(),
            }),
            Err(e) => Err(FetchError::transport(self.path.display().to_string(), e)),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
