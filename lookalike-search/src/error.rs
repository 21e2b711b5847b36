//! Error types for the lookalike-search crate.
//!
//! Messages are stable and never contain credentials. Upstream failures
//! stay inside the fallback chain; only configuration and request errors
//! reach callers of [`crate::search`].

use crate::types::SourceKind;

/// Errors that can occur while querying a platform source.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The upstream answered with a non-success status.
    #[error("{kind} returned HTTP {status}")]
    Api {
        /// Which source was queried.
        kind: SourceKind,
        /// The HTTP status code.
        status: u16,
    },

    /// The upstream payload or page did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration or request.
    #[error("config error: {0}")]
    Config(String),

    /// The source needs a credential that is unset or still a placeholder.
    #[error("no credential configured for {0}")]
    MissingCredential(SourceKind),
}

impl SearchError {
    /// Returns `true` for errors caused by the caller's input rather than
    /// an upstream or internal failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Convenience type alias for lookalike-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
