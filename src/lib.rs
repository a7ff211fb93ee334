//! ChEMBL MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing the ChEMBL database of
//! bioactive molecules as fourteen tools: molecule search and lookup
//! (including similarity, substructure and SDF export), targets, assays,
//! bioactivities and documents.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **chembl**: REST client for the ChEMBL API and the record model
//!   - **tools**: The MCP tools, their registry and router
//!
//! # Example
//!
//! ```rust,no_run
//! use chembl_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
