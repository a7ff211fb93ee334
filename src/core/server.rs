//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/`, grouped by ChEMBL
//! entity. They are registered once into a [`ToolRegistry`] shared by every
//! session, and the rmcp ToolRouter is built from that registry in
//! `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::{self, Error};
use crate::domains::chembl::{ChemblApi, ChemblClient};
use crate::domains::tools::{ToolRegistry, build_tool_router};

const INSTRUCTIONS: &str = "Query the ChEMBL database of bioactive molecules. \
Search molecules by name or structure (similarity, substructure), look up targets, \
assays, bioactivity measurements and source documents by their ChEMBL IDs. \
Results are plain text; lookups that find nothing answer with a sentence saying so.";

/// The main MCP server handler.
///
/// Cloning is cheap: clones share the configuration and the tool registry,
/// so each TCP connection gets its own handler over the same tools.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools and the ChEMBL client they call.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured ChEMBL endpoint.
    pub fn new(config: Config) -> error::Result<Self> {
        if config.chembl.timeout_secs == 0 {
            return Err(Error::config("CHEMBL_TIMEOUT_SECS must be at least 1"));
        }
        let client = ChemblClient::new(&config.chembl)?;
        info!("Using ChEMBL API at {}", config.chembl.base_url);
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a server over an arbitrary [`ChemblApi`] implementation.
    pub fn with_client(config: Config, client: Arc<dyn ChemblApi>) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(ToolRegistry::with_all_tools(client));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone(), config.tools.flag_errors),
            registry,
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ChemblConfig;
    use crate::domains::chembl::fake::FakeChembl;

    fn test_server() -> McpServer {
        McpServer::with_client(Config::default(), Arc::new(FakeChembl::new()))
    }

    #[test]
    fn test_server_lists_all_tools() {
        let server = test_server();
        assert_eq!(server.name(), "chembl");
        assert_eq!(server.list_tools().len(), 14);
        assert_eq!(server.registry().len(), 14);
    }

    #[test]
    fn test_server_info_advertises_tools_only() {
        let info = test_server().get_info();
        assert_eq!(info.server_info.name, "chembl");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.unwrap().contains("ChEMBL"));
    }

    #[test]
    fn test_new_rejects_bad_configuration() {
        let mut config = Config::default();
        config.chembl = ChemblConfig {
            base_url: "not a url".to_string(),
            ..ChemblConfig::default()
        };
        assert!(matches!(McpServer::new(config), Err(Error::Chembl(_))));

        let mut config = Config::default();
        config.chembl.timeout_secs = 0;
        assert!(matches!(McpServer::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_clones_share_registry() {
        let server = test_server();
        let clone = server.clone();
        assert!(Arc::ptr_eq(server.registry(), clone.registry()));
    }
}
