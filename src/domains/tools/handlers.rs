//! Tool handler contract.
//!
//! Every ChEMBL tool implements [`ChemblTool`]: a name, a description, a
//! typed parameter struct and an async `run` that always produces a
//! [`ToolReply`]. The registry erases the parameter type so tools can be
//! stored side by side and dispatched by name.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, JsonObject};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::domains::chembl::ChemblApi;

/// A tool backed by the ChEMBL API.
#[async_trait]
pub trait ChemblTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Arguments accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Execute the tool. Failures are reported inside the reply text.
    async fn run(client: &dyn ChemblApi, params: Self::Params) -> ToolReply;
}

/// Category of a tool reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Found,
    NotFound,
    Invalid,
    Failed,
}

/// Text produced by a tool, tagged with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    pub kind: ReplyKind,
    pub text: String,
}

impl ToolReply {
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Found,
            text: text.into(),
        }
    }

    pub fn not_found(text: impl Into<String>) -> Self {
        let text = text.into();
        warn!("{}", text);
        Self {
            kind: ReplyKind::NotFound,
            text,
        }
    }

    pub fn invalid(text: impl Into<String>) -> Self {
        let text = text.into();
        warn!("{}", text);
        Self {
            kind: ReplyKind::Invalid,
            text,
        }
    }

    /// `Error <action>: <error>`.
    pub fn failed(action: &str, err: impl std::fmt::Display) -> Self {
        let text = format!("Error {}: {}", action, err);
        error!("{}", text);
        Self {
            kind: ReplyKind::Failed,
            text,
        }
    }

    pub fn is_found(&self) -> bool {
        self.kind == ReplyKind::Found
    }

    /// Wrap the reply for MCP.
    ///
    /// With `flag_errors` unset every reply is a successful result, the
    /// outcome being carried by the text alone.
    pub fn into_call_result(self, flag_errors: bool) -> CallToolResult {
        let content = vec![Content::text(self.text)];
        if flag_errors && self.kind != ReplyKind::Found {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// One declared tool argument, as advertised to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolParameter {
    pub name: String,
    /// JSON schema type (`string`, `integer`, `number`, ...).
    pub kind: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToolParameter {
    /// Read the parameter list out of a tool's input schema, in declaration
    /// order.
    pub fn from_schema(schema: &JsonObject) -> Vec<Self> {
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(name, property)| Self {
                name: name.clone(),
                kind: schema_type(property),
                optional: !required.contains(&name.as_str()),
                default: property.get("default").cloned(),
                description: property
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }
}

/// First non-null type of a property schema.
fn schema_type(property: &Value) -> String {
    let declared = match property.get("type") {
        Some(Value::String(kind)) => Some(kind.as_str()),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .find(|kind| *kind != "null"),
        _ => None,
    };
    declared.unwrap_or("any").to_string()
}
