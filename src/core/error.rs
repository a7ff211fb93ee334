//! Error types and handling for the MCP server.
//!
//! Errors raised while building the server: a ChEMBL client that cannot be
//! constructed, or configuration values that make no sense together. Tool
//! calls report their failures as reply text instead.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the ChEMBL client.
    #[error("ChEMBL error: {0}")]
    Chembl(#[from] crate::domains::chembl::ChemblError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
