//! Transports that carry MCP sessions for the ChEMBL tool server.
//!
//! - **STDIO** (feature `stdio`, default): a single session with the parent
//!   process.
//! - **TCP** (feature `tcp`): line-delimited JSON-RPC, one session per
//!   accepted connection.
//!
//! `MCP_TRANSPORT` picks one at startup. All sessions share the server's
//! tool registry and ChEMBL client.

mod config;
mod error;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
