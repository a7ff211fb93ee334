//! Tool definitions module.
//!
//! One file per entity group. Each group exposes a `register()` function
//! that adds its tools to the [`ToolRegistry`](super::ToolRegistry):
//!
//! - `molecule`: search, details, SDF, similarity and substructure
//! - `target`: target search, details, targets of a molecule
//! - `assay`: assay search and details
//! - `activity`: bioactivities of a molecule, activity details
//! - `document`: document details and compounds
//!
//! `format` holds the record formatters shared by the groups.

pub mod activity;
pub mod assay;
pub mod common;
pub mod document;
pub mod format;
pub mod molecule;
pub mod target;

pub use activity::{GetActivityDetailsTool, GetBioactivitiesTool};
pub use assay::{GetAssayDetailsTool, SearchAssaysTool};
pub use document::{GetDocumentCompoundsTool, GetDocumentInfoTool};
pub use molecule::{
    GetMoleculeDetailsTool, GetMoleculeSdfTool, GetSimilarMoleculesTool,
    SearchMoleculeSubstructureTool, SearchMoleculeTool,
};
pub use target::{GetMoleculeTargetsTool, GetTargetDetailsTool, SearchTargetsTool};
