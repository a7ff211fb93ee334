//! Tools domain module.
//!
//! The fourteen ChEMBL tools exposed over MCP. Every tool turns its typed
//! arguments into one ChEMBL request and renders the records it gets back
//! as text.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, one file per entity group
//! - `handlers.rs` - The [`ChemblTool`] trait and [`ToolReply`]
//! - `registry.rs` - Central tool registry and dispatch by name
//! - `router.rs` - rmcp ToolRouter built from the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Implement [`ChemblTool`] in the matching `definitions/` file
//! 2. Register it in that file's `register()` function
//!
//! The router is built from the registry, so nothing else changes.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::*;
pub use registry::{ToolDescriptor, ToolRegistry};
pub use router::build_tool_router;
