//! STDIO transport: one MCP session over the process's stdin and stdout.
//!
//! The client that spawned the process owns the session and ends it by
//! closing stdin. Logging stays on stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve the ChEMBL tools to the parent process until it disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let name = server.name().to_string();
        info!("{} ready on stdin/stdout", name);

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("{} session closed: {:?}", name, reason);
        Ok(())
    }
}
