//! Chart records produced from a repository index
//!
//! A `ChartRecord` is the normalized view of the latest published version
//! of one chart. Both index parsers produce records through
//! [`ChartRecord::from_fields`] so the defaulting rules live in one place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder used when an entry has no version
pub const UNKNOWN_VERSION: &str = "unknown";

/// Placeholder used when an entry has no description
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// The latest published version of one chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    /// Chart name
    pub name: String,

    /// Chart version
    pub version: String,

    /// Version of the packaged application
    pub app_version: String,

    /// Description
    pub description: String,

    /// When this version was created
    pub created: String,
}

/// Key/value properties of one version entry, as read from the index
pub(crate) type RawEntry = HashMap<String, String>;

/// One chart and its version entries, newest first
#[derive(Debug, Default)]
pub(crate) struct ChartGroup {
    pub name: String,
    pub entries: Vec<RawEntry>,
}

impl ChartGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Build the published record from the first entry, if any
    pub fn into_record(self) -> Option<ChartRecord> {
        let latest = self.entries.into_iter().next()?;
        Some(ChartRecord::from_fields(
            self.name,
            latest.get("version").map(String::as_str),
            latest.get("appVersion").map(String::as_str),
            latest.get("description").map(String::as_str),
            latest.get("created").map(String::as_str),
        ))
    }
}

impl ChartRecord {
    /// Build a record, filling in defaults for missing or empty fields
    ///
    /// `app_version` falls back to `version` before falling back to
    /// `"unknown"`. A missing `created` becomes the current UTC time.
    pub fn from_fields(
        name: impl Into<String>,
        version: Option<&str>,
        app_version: Option<&str>,
        description: Option<&str>,
        created: Option<&str>,
    ) -> Self {
        let version = present(version);
        let app_version = present(app_version).or(version);

        Self {
            name: name.into(),
            version: version.unwrap_or(UNKNOWN_VERSION).to_string(),
            app_version: app_version.unwrap_or(UNKNOWN_VERSION).to_string(),
            description: present(description)
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
            created: present(created)
                .map(str::to_string)
                .unwrap_or_else(now_timestamp),
        }
    }

    /// Creation date as `YYYY-MM-DD`, if `created` is an RFC 3339 timestamp
    pub fn created_date(&self) -> Option<String> {
        chrono::DateTime::parse_from_rfc3339(&self.created)
            .ok()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    /// Description truncated to its first line
    pub fn short_description(&self) -> &str {
        self.description
            .lines()
            .next()
            .unwrap_or(&self.description)
            .trim()
    }
}

/// Empty strings count as missing
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
