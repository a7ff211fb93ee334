//! ChEMBL client error types.

use thiserror::Error;

/// Result type for ChEMBL client operations.
pub type ChemblResult<T> = Result<T, ChemblError>;

/// Errors that can occur while talking to the ChEMBL REST API.
#[derive(Debug, Error)]
pub enum ChemblError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be read.
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("ChEMBL returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The configured base URL or a derived endpoint is unusable.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A filter criterion could not be turned into a request.
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// Query string serialization failed.
    #[error("Query encoding error: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl ChemblError {
    /// Create a new "decode" error.
    pub fn decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "invalid url" error.
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "invalid criteria" error.
    pub fn invalid_criteria(msg: impl Into<String>) -> Self {
        Self::InvalidCriteria(msg.into())
    }
}
