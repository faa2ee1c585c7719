//! Pattern-based fallback scanner
//!
//! Used when the structural scan finds nothing, typically because the index
//! uses a different indentation than expected. Each chart header found
//! anywhere in the document opens a section that runs to the end of the
//! document, and the first match of each field inside that section wins.
//! A chart missing a field locally can therefore pick up a later chart's
//! value.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::record::ChartRecord;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^  ([a-zA-Z][a-zA-Z0-9-]+):\r?$").expect("valid header pattern")
});

static VERSION: Lazy<Regex> = Lazy::new(|| field_pattern("version"));
static APP_VERSION: Lazy<Regex> = Lazy::new(|| field_pattern("appVersion"));
static DESCRIPTION: Lazy<Regex> = Lazy::new(|| field_pattern("description"));
static CREATED: Lazy<Regex> = Lazy::new(|| field_pattern("created"));

fn field_pattern(key: &str) -> Regex {
    Regex::new(&format!(r#"{key}:\s*"?([^"\n]+)"?"#)).expect("valid field pattern")
}

/// Extract one record per chart header using loose pattern matching
///
/// Never fails: a document without any chart header yields no records.
pub fn parse_fallback(text: &str) -> Vec<ChartRecord> {
    let records: Vec<ChartRecord> = HEADER
        .captures_iter(text)
        .filter_map(|caps| {
            let header = caps.get(0)?.as_str();
            let name = caps.get(1)?.as_str();

            let (_, section) = text.split_once(header)?;
            if section.is_empty() {
                return None;
            }

            Some(ChartRecord::from_fields(
                name,
                first_value(&VERSION, section),
                first_value(&APP_VERSION, section),
                first_value(&DESCRIPTION, section),
                first_value(&CREATED, section),
            ))
        })
        .collect();

    debug!("Fallback scan found {} chart(s)", records.len());
    records
}

fn first_value<'a>(pattern: &Regex, section: &'a str) -> Option<&'a str> {
    pattern
        .captures(section)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('\r'))
}
