//! Repository index parsing
//!
//! The index.yaml file lists every chart in the repository with its
//! versions. Parsing tries the structural scan first and falls back to
//! pattern matching only when the structural scan finds no charts.

use serde::Serialize;
use tracing::{debug, warn};

use super::fallback::parse_fallback;
use super::parser::parse_structured;
use super::record::ChartRecord;

/// Which scanner produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    /// Line-oriented structural scan
    Structural,
    /// Pattern-matching fallback
    Pattern,
    /// Neither scanner found a chart
    Nothing,
}

/// Result of parsing an index document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexParse {
    /// Latest version of every chart, in document order
    pub records: Vec<ChartRecord>,

    /// Scanner that produced `records`
    pub strategy: ParseStrategy,
}

impl IndexParse {
    /// True when the repository has no published charts
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse an index document into chart records
///
/// An empty result is not an error; it means nothing has been published.
pub fn parse_index(text: &str) -> IndexParse {
    debug!("Parsing index ({} bytes)", text.len());

    let records = parse_structured(text);
    if !records.is_empty() {
        return IndexParse {
            records,
            strategy: ParseStrategy::Structural,
        };
    }

    warn!("No charts found by structural scan, trying fallback parser");
    let records = parse_fallback(text);
    let strategy = if records.is_empty() {
        ParseStrategy::Nothing
    } else {
        ParseStrategy::Pattern
    };

    IndexParse { records, strategy }
}
