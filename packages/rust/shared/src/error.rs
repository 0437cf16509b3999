//! Error types for docbot.
//!
//! Library crates use [`DocbotError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docbot operations.
#[derive(Debug, thiserror::Error)]
pub enum DocbotError {
    /// Bad or unreadable `docbot.toml`.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error during a manual lookup.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed HTML listing or event payload.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A manual page did not have the structure its extractor needs.
    #[error("unrecognized page format at {url}: {reason}")]
    UnrecognizedPage { url: String, reason: String },

    /// A search listing had no usable first result.
    #[error("no search results: {0}")]
    NoSearchResults(String),

    /// Reading or writing a file failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A value failed validation, e.g. a URL that will not parse.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Result alias for docbot library crates.
pub type Result<T> = std::result::Result<T, DocbotError>;

impl DocbotError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// `reason` is usually the extractor's own error text.
    pub fn unrecognized_page(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnrecognizedPage {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Attach the offending path to an I/O failure.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
