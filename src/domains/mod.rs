//! Domains module containing business logic organized by bounded contexts.
//!
//! - `chembl` - ChEMBL REST client and the record model it returns
//! - `tools` - MCP tools built on top of the client

pub mod chembl;
pub mod tools;
