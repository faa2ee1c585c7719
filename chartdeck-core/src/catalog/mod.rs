//! Chart catalog - index retrieval and parsing
//!
//! # Overview
//!
//! A Helm repository publishes an `index.yaml` listing every chart and its
//! version history. This module fetches that document and reduces it to
//! one [`ChartRecord`] per chart (its newest entry).
//!
//! # Architecture
//!
//! ```text
//! Repository (static host or local dir)
//!     │
//!     └── index.yaml
//!            │  IndexFetcher
//!            ▼
//!     parse_structured ──(no charts)──▶ parse_fallback
//!            │                               │
//!            └──────────────┬────────────────┘
//!                           ▼
//!                   Vec<ChartRecord>
//! ```

mod error;
mod fallback;
mod fetcher;
mod index;
mod parser;
mod record;

pub use error::FetchError;
pub use fallback::parse_fallback;
pub use fetcher::{FileFetcher, HttpFetcher, IndexFetcher, INDEX_FILE};
pub use index::{parse_index, IndexParse, ParseStrategy};
pub use parser::parse_structured;
pub use record::{ChartRecord, DEFAULT_DESCRIPTION, UNKNOWN_VERSION};
