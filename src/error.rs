//! Error types for clipping operations
//!
//! Every fallible library entry point returns [`ClipResult`]. Degradations that
//! the pipeline recovers from (a failed image fetch, a malformed date token) are
//! logged instead of surfaced here.

use thiserror::Error;

/// Result type alias for clipping operations
pub type ClipResult<T> = Result<T, ClipError>;

/// Error types for clipping operations
#[derive(Debug, Error)]
pub enum ClipError {
    /// The content extractor found nothing worth converting
    #[error("no article content found")]
    NoArticleContent,

    /// The base URL handed to the pipeline is not an absolute URL
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Input HTML exceeds the accepted size
    #[error("HTML input too large: {size} bytes (limit {limit} bytes)")]
    DocumentTooLarge { size: usize, limit: usize },

    /// A remote resource could not be retrieved
    #[error("failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    /// Conversion options failed validation
    #[error("invalid conversion options: {0}")]
    InvalidOptions(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClipError {
    pub(crate) fn invalid_base_url(url: &str, source: url::ParseError) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn fetch(url: &str, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Whether the caller may reasonably retry with a different input or network state.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoArticleContent | Self::Fetch { .. })
    }
}
