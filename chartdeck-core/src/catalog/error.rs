//! Index fetch error types

use thiserror::Error;

/// Failure to retrieve the index document
///
/// Neither kind is retried; the load attempt ends here.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a usable response
    #[error("Failed to retrieve index from {location}: {source}")]
    Transport {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A response arrived with a non-success status
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },
}

impl FetchError {
    pub(crate) fn transport(
        location: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        FetchError::Transport {
            location: location.into(),
            source: source.into(),
        }
    }

    /// Status code, when the failure came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { .. } => None,
        }
    }
}
