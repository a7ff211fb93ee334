//! Server plumbing around the ChEMBL tools: environment configuration,
//! startup errors, the rmcp handler and the STDIO/TCP transports.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
