//! Error types for retrieval, extraction and filtering

use thiserror::Error;

/// Failure while obtaining the raw dataset text
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Invalid source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while turning the raw script text into records
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Could not find {identifier} in source text")]
    MarkerNotFound { identifier: String },

    #[error("Array literal for {identifier} is never closed")]
    Unterminated { identifier: String },

    #[error("Failed to parse repaired data as JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ExtractionError {
    /// True when the upstream source no longer has the expected shape,
    /// false when the literal was found but its content could not be parsed.
    pub fn is_format_change(&self) -> bool {
        matches!(
            self,
            ExtractionError::MarkerNotFound { .. } | ExtractionError::Unterminated { .. }
        )
    }
}

/// A threshold field value that could not be read as a number.
/// Never fatal: the record is excluded and the error is logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("{field} value {value} is not numeric")]
    NotNumeric { field: String, value: String },
}

/// Top-level error for the fetch-and-extract step
#[derive(Error, Debug)]
pub enum HelmetDataError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
