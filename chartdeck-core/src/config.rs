//! Site configuration
//!
//! Describes the chart repository the site presents and where the built
//! page goes. Stored as YAML; a missing file means defaults.
//!
//! ```yaml
//! title: Helm Charts
//! repository:
//!   name: glavien
//!   url: https://charts.glavien.com/
//! timeout_seconds: 30
//! output: index.html
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::{FetchError, FileFetcher, HttpFetcher, IndexFetcher};

/// Default repository alias used in install commands
pub const DEFAULT_REPOSITORY_NAME: &str = "glavien";

/// Default repository base URL
pub const DEFAULT_REPOSITORY_URL: &str = "https://charts.glavien.com/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Failed to write config: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// The chart repository being presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Alias users add the repository under (`helm repo add <name> <url>`)
    pub name: String,

    /// Base URL or local directory that serves index.yaml
    pub url: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REPOSITORY_NAME.to_string(),
            url: DEFAULT_REPOSITORY_URL.to_string(),
        }
    }
}

/// Top-level site configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Request timeout for HTTP fetches
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Where `build` writes the page
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_title() -> String {
    "Helm Charts".to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_output() -> PathBuf {
    PathBuf::from("index.html")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            repository: RepositoryConfig::default(),
            timeout_seconds: default_timeout(),
            output: default_output(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::default_config_path()?)
    }

    /// Load configuration from a specific path, or defaults if it is absent
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SiteConfig =
            serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Default config file path (`<config dir>/chartdeck/config.yaml`)
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("com", "glavien", "chartdeck")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Write configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check values that would produce a broken page or fetcher
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.repository.name;
        if name.is_empty() {
            return Err(ConfigError::Invalid(
                "repository name must not be empty".to_string(),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Invalid(format!(
                "repository name '{name}' may only contain letters, digits, '-' and '_'"
            )));
        }
        if self.repository.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "repository url must not be empty".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Where the index is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// `http://` or `https://` base URL
    Http(String),
    /// Local site directory
    Directory(PathBuf),
}

impl IndexSource {
    /// Classify a repository location
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            IndexSource::Http(location.to_string())
        } else {
            IndexSource::Directory(PathBuf::from(location))
        }
    }

    /// Build the matching fetcher
    pub fn fetcher(&self, timeout: Duration) -> Result<Box<dyn IndexFetcher>, FetchError> {
        Ok(match self {
            IndexSource::Http(url) => Box::new(HttpFetcher::new(url, timeout)?),
            IndexSource::Directory(dir) => Box::new(FileFetcher::new(dir.clone())),
        })
    }
}
