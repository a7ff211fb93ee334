//! ChEMBL data access.
//!
//! This module wraps the ChEMBL REST API behind the [`ChemblApi`] trait so
//! tool handlers can be exercised without the network:
//!
//! - `client.rs` - `reqwest` implementation of the trait
//! - `criteria.rs` - ordered filter criteria and endpoint pseudo-fields
//! - `record.rs` - loosely-typed records with `N/A` fallback accessors
//! - `error.rs` - client error types

mod client;
mod criteria;
mod error;
mod record;

#[cfg(test)]
pub mod fake;

use std::fmt;

use async_trait::async_trait;

pub use client::{ChemblClient, MAX_PAGE_SIZE, records_from};
pub use criteria::{Criteria, SIMILARITY, SIMILARITY_THRESHOLD, SUBSTRUCTURE, similarity_percent};
pub use error::{ChemblError, ChemblResult};
pub use record::{Field, Fields, NOT_AVAILABLE, Record};

/// Default ChEMBL REST API location.
pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Entity types exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Molecule,
    Target,
    Assay,
    Activity,
    Document,
}

impl Resource {
    /// Path segment of the resource (`/molecule`, `/target`, ...).
    pub fn path(self) -> &'static str {
        match self {
            Self::Molecule => "molecule",
            Self::Target => "target",
            Self::Assay => "assay",
            Self::Activity => "activity",
            Self::Document => "document",
        }
    }

    /// Key holding the record list in collection responses.
    pub fn collection_key(self) -> &'static str {
        match self {
            Self::Molecule => "molecules",
            Self::Target => "targets",
            Self::Assay => "assays",
            Self::Activity => "activities",
            Self::Document => "documents",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Serialization formats a single record can be fetched in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Json,
    /// MDL structure data file (molecules only).
    Sdf,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Sdf => "sdf",
        }
    }
}

/// Read-only access to the ChEMBL API.
///
/// The output format is a parameter of [`ChemblApi::get_as`] rather than
/// client state, so concurrent calls cannot observe each other's format.
#[async_trait]
pub trait ChemblApi: Send + Sync {
    /// Fetch one record by ChEMBL ID. Unknown IDs and empty records yield
    /// `None`.
    async fn get(&self, resource: Resource, id: &str) -> ChemblResult<Option<Record>>;

    /// Fetch one record as raw text in `format`. Unknown IDs yield `None`.
    async fn get_as(
        &self,
        resource: Resource,
        id: &str,
        format: OutputFormat,
    ) -> ChemblResult<Option<String>>;

    /// Fetch the first page of records matching `criteria`.
    async fn filter(&self, resource: Resource, criteria: &Criteria) -> ChemblResult<Vec<Record>>;

    /// Free-text search, returning at most `limit` records.
    async fn search(&self, resource: Resource, query: &str, limit: usize)
    -> ChemblResult<Vec<Record>>;
}
