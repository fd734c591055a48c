//! Error types for the filmyzilla scraper
//!
//! Every failure collapses into one enum. Callers only ever surface the
//! display text, so variants carry human-readable context.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// so it can be embedded directly in JSON payloads.
#[derive(Error, Debug)]
pub enum FilmyzillaError {
    /// HTTP request failed (connect, timeout, body decode)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Indirection document is missing or malformed
    #[error("Invalid sources document: {0}")]
    InvalidSource(String),
}

impl Serialize for FilmyzillaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, FilmyzillaError>;
