//! Error types for ContentLink.
//!
//! Library crates use [`ContentLinkError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all ContentLink operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentLinkError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while probing, querying, or fetching.
    #[error("network error: {0}")]
    Network(String),

    /// The body could not be parsed as well-formed markup.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The rewritten document could not be written back to text.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The content read endpoint answered 500/503 or returned an unreadable body.
    #[error("content read service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A URL (href, redirect target, endpoint) could not be parsed or resolved.
    #[error("invalid URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ContentLinkError>;

impl ContentLinkError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create an invalid-URL error for `url`.
    pub fn invalid_url(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the content read endpoint being unavailable,
    /// as opposed to an ordinary resolution failure.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}
