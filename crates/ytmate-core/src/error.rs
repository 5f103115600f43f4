//! Error types for the ytmate proxy core
//!
//! One enum covers validation, transport and upstream-semantic failures.
//! Rows the parser cannot classify are not errors; they are dropped.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all analyze/convert operations
///
/// Implements Display for human-readable messages and Serialize
/// so it can be embedded directly in JSON error bodies.
#[derive(Error, Debug)]
pub enum YtMateError {
    /// Required input was missing or blank
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Conversion requested without the upstream identifier
    #[error("Invalid conversion request: {0}")]
    InvalidConversionRequest(String),

    /// HTTP request to the upstream site failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with something other than a usable 2xx JSON body
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered, but reported failure or an empty result
    #[error("Upstream analysis failed: {0}")]
    UpstreamAnalysisFailure(String),

    /// Failed to build an HTML selector or pattern
    #[error("Failed to parse HTML: {0}")]
    Parse(String),
}

impl YtMateError {
    /// True for failures of the outbound round trip itself
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UpstreamUnavailable(_))
    }

    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidConversionRequest(_)
        )
    }
}

impl Serialize for YtMateError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for ytmate operations
pub type Result<T> = std::result::Result<T, YtMateError>;
