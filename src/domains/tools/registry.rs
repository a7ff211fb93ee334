//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is built once at startup. Each tool group (molecule, target,
//! assay, activity, document) registers its tools into it; afterwards it is
//! shared read-only behind an `Arc` by the router and the server.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use tracing::{info, instrument, warn};

use crate::domains::chembl::ChemblApi;

use super::definitions::{activity, assay, document, molecule, target};
use super::error::ToolError;
use super::handlers::{ChemblTool, ToolParameter, ToolReply};

type ToolFn = Arc<
    dyn Fn(Arc<dyn ChemblApi>, JsonObject) -> BoxFuture<'static, Result<ToolReply, ToolError>>
        + Send
        + Sync,
>;

/// Metadata and handler of one registered tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    tool: Tool,
    parameters: Vec<ToolParameter>,
    handler: ToolFn,
}

impl ToolDescriptor {
    fn new<T: ChemblTool>() -> Self {
        let tool = Tool {
            name: T::NAME.into(),
            description: Some(T::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<T::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        };
        let parameters = ToolParameter::from_schema(&tool.input_schema);

        let handler: ToolFn = Arc::new(|client: Arc<dyn ChemblApi>, arguments: JsonObject| {
            async move {
                let params: T::Params = serde_json::from_value(serde_json::Value::Object(arguments))
                    .map_err(|e| ToolError::invalid_arguments(format!("{}: {}", T::NAME, e)))?;
                Ok::<_, ToolError>(T::run(client.as_ref(), params).await)
            }
            .boxed()
        });

        Self {
            tool,
            parameters,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    /// MCP metadata (name, description, input schema).
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Declared parameters in declaration order.
    pub fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }
}

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<dyn ChemblApi>,
    tools: BTreeMap<&'static str, ToolDescriptor>,
}

impl ToolRegistry {
    /// Create an empty registry around a ChEMBL client.
    pub fn new(client: Arc<dyn ChemblApi>) -> Self {
        Self {
            client,
            tools: BTreeMap::new(),
        }
    }

    /// Create a registry holding every ChEMBL tool.
    pub fn with_all_tools(client: Arc<dyn ChemblApi>) -> Self {
        let mut registry = Self::new(client);
        molecule::register(&mut registry);
        target::register(&mut registry);
        assay::register(&mut registry);
        activity::register(&mut registry);
        document::register(&mut registry);
        info!("Registered {} tools", registry.len());
        registry
    }

    /// Register `T`, replacing any tool previously registered under its name.
    pub fn register<T: ChemblTool>(&mut self) {
        if self.tools.insert(T::NAME, ToolDescriptor::new::<T>()).is_some() {
            warn!("Tool {} registered twice, keeping the latest", T::NAME);
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|d| d.tool.clone()).collect()
    }

    /// Dispatch a tool call by name.
    #[instrument(skip(self, arguments))]
    pub async fn call(&self, name: &str, arguments: JsonObject) -> Result<ToolReply, ToolError> {
        let descriptor = self.tools.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;
        (descriptor.handler)(self.client.clone(), arguments).await
    }
}
