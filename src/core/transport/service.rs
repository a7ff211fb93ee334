//! Startup of the ChEMBL tool server on its configured transport.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

/// Runs an [`McpServer`] over the transport selected by configuration.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a transport service with an explicit configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Transport service for the transport named in the server's own config.
    pub fn for_server(server: &McpServer) -> Self {
        Self::new(server.config().transport.clone())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// One-line summary of what is about to be served, and where from.
    pub fn startup_summary(&self, server: &McpServer) -> String {
        let config = server.config();
        let mut summary = format!(
            "Serving {} ChEMBL tools from {} over {}",
            server.registry().len(),
            config.chembl.base_url,
            self.config.description()
        );
        if config.tools.flag_errors {
            summary.push_str(" (unsuccessful replies flagged as errors)");
        }
        summary
    }

    /// Serve until the transport shuts down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("{}", self.startup_summary(&server));

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::chembl::fake::FakeChembl;
    use std::sync::Arc;

    fn server(config: Config) -> McpServer {
        McpServer::with_client(config, Arc::new(FakeChembl::new()))
    }

    #[test]
    fn test_startup_summary() {
        let server = server(Config::default());
        let service = TransportService::for_server(&server);
        assert_eq!(service.config(), &server.config().transport);

        let summary = service.startup_summary(&server);
        assert!(summary.starts_with(
            "Serving 14 ChEMBL tools from https://www.ebi.ac.uk/chembl/api/data over "
        ));
        assert!(summary.ends_with(&service.config().description()));
    }

    #[test]
    fn test_startup_summary_mentions_error_flagging() {
        let mut config = Config::default();
        config.tools.flag_errors = true;
        let server = server(config);
        let summary = TransportService::for_server(&server).startup_summary(&server);
        assert!(summary.ends_with("(unsuccessful replies flagged as errors)"));
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_explicit_transport_overrides_server_config() {
        let server = server(Config::default());
        let service = TransportService::new(TransportConfig::tcp(4100, "0.0.0.0"));
        assert!(
            service
                .startup_summary(&server)
                .ends_with("over TCP on 0.0.0.0:4100")
        );
    }
}
