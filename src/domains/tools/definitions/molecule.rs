//! Molecule tools.
//!
//! Free-text search, single-molecule lookups (formatted or as SDF), and the
//! similarity and substructure searches delegated to ChEMBL.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::chembl::{
    ChemblApi, Criteria, OutputFormat, Resource, SIMILARITY, SIMILARITY_THRESHOLD, SUBSTRUCTURE,
};
use crate::domains::tools::{ChemblTool, ToolRegistry, ToolReply};

use super::common::{RESULT_CAP, default_limit, join_blocks, validate_limit, with_header};
use super::format::format_molecule;

/// Register all molecule tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register::<SearchMoleculeTool>();
    registry.register::<GetMoleculeDetailsTool>();
    registry.register::<GetMoleculeSdfTool>();
    registry.register::<GetSimilarMoleculesTool>();
    registry.register::<SearchMoleculeSubstructureTool>();
}

fn default_similarity_threshold() -> f64 {
    0.7
}

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchMoleculeParams {
    #[schemars(description = "Search query string (e.g., 'aspirin', 'CHEMBL25')")]
    pub query: String,

    #[schemars(description = "Maximum number of results to return (default: 5)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Parameters for tools taking a single molecule ChEMBL ID.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MoleculeIdParams {
    #[schemars(description = "ChEMBL ID of the molecule (e.g., 'CHEMBL25')")]
    pub chembl_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SimilarMoleculesParams {
    #[schemars(description = "ChEMBL ID of the reference molecule")]
    pub chembl_id: String,

    #[schemars(description = "Similarity threshold (0.0 to 1.0, default: 0.7)")]
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SubstructureParams {
    #[schemars(description = "SMILES notation of the substructure to search for")]
    pub smiles: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

pub struct SearchMoleculeTool;

#[async_trait]
impl ChemblTool for SearchMoleculeTool {
    const NAME: &'static str = "search_molecule";
    const DESCRIPTION: &'static str = "Search for molecules in the ChEMBL database by name, synonym or identifier. Returns formula, weight and drug-likeness properties for each match.";
    type Params = SearchMoleculeParams;

    async fn run(client: &dyn ChemblApi, params: SearchMoleculeParams) -> ToolReply {
        let limit = validate_limit(params.limit);
        info!("Searching molecules matching: {}", params.query);

        match client.search(Resource::Molecule, &params.query, limit).await {
            Ok(molecules) if molecules.is_empty() => {
                ToolReply::not_found("No molecules found matching the query.")
            }
            Ok(molecules) => {
                ToolReply::found(join_blocks(molecules.iter().take(limit).map(format_molecule)))
            }
            Err(e) => ToolReply::failed("searching molecules", e),
        }
    }
}

pub struct GetMoleculeDetailsTool;

#[async_trait]
impl ChemblTool for GetMoleculeDetailsTool {
    const NAME: &'static str = "get_molecule_details";
    const DESCRIPTION: &'static str =
        "Get detailed information about a molecule by its ChEMBL ID.";
    type Params = MoleculeIdParams;

    async fn run(client: &dyn ChemblApi, params: MoleculeIdParams) -> ToolReply {
        let id = params.chembl_id;
        info!("Fetching molecule {}", id);

        match client.get(Resource::Molecule, &id).await {
            Ok(Some(molecule)) => ToolReply::found(format_molecule(&molecule)),
            Ok(None) => ToolReply::not_found(format!("No molecule found with ID {}", id)),
            Err(e) => ToolReply::failed("retrieving molecule details", e),
        }
    }
}

pub struct GetMoleculeSdfTool;

#[async_trait]
impl ChemblTool for GetMoleculeSdfTool {
    const NAME: &'static str = "get_molecule_sdf";
    const DESCRIPTION: &'static str =
        "Get the SDF (Structure Data File) of a molecule. The structure text is returned verbatim.";
    type Params = MoleculeIdParams;

    async fn run(client: &dyn ChemblApi, params: MoleculeIdParams) -> ToolReply {
        let id = params.chembl_id;
        info!("Fetching SDF for molecule {}", id);

        match client.get_as(Resource::Molecule, &id, OutputFormat::Sdf).await {
            Ok(Some(sdf)) => ToolReply::found(sdf),
            Ok(None) => ToolReply::not_found(format!("No SDF data found for molecule {}", id)),
            Err(e) => ToolReply::failed("retrieving SDF data", e),
        }
    }
}

pub struct GetSimilarMoleculesTool;

#[async_trait]
impl ChemblTool for GetSimilarMoleculesTool {
    const NAME: &'static str = "get_similar_molecules";
    const DESCRIPTION: &'static str = "Get molecules structurally similar to a reference molecule, above a Tanimoto similarity threshold.";
    type Params = SimilarMoleculesParams;

    async fn run(client: &dyn ChemblApi, params: SimilarMoleculesParams) -> ToolReply {
        let SimilarMoleculesParams {
            chembl_id: id,
            similarity_threshold: threshold,
        } = params;
        info!("Searching molecules similar to {} (threshold {})", id, threshold);

        let criteria = Criteria::new()
            .with(SIMILARITY, &id)
            .with(SIMILARITY_THRESHOLD, threshold)
            .limit(RESULT_CAP);

        match client.filter(Resource::Molecule, &criteria).await {
            Ok(molecules) if molecules.is_empty() => ToolReply::not_found(format!(
                "No similar molecules found for {} at threshold {}",
                id, threshold
            )),
            Ok(molecules) => ToolReply::found(with_header(
                &format!("Similar molecules to {} (threshold: {}):", id, threshold),
                &join_blocks(molecules.iter().take(RESULT_CAP).map(format_molecule)),
            )),
            Err(e) => ToolReply::failed("finding similar molecules", e),
        }
    }
}

pub struct SearchMoleculeSubstructureTool;

#[async_trait]
impl ChemblTool for SearchMoleculeSubstructureTool {
    const NAME: &'static str = "search_molecule_substructure";
    const DESCRIPTION: &'static str =
        "Search for molecules containing a specific substructure given as SMILES.";
    type Params = SubstructureParams;

    async fn run(client: &dyn ChemblApi, params: SubstructureParams) -> ToolReply {
        let smiles = params.smiles;
        info!("Searching molecules containing substructure {}", smiles);

        let criteria = Criteria::new()
            .with(SUBSTRUCTURE, &smiles)
            .limit(RESULT_CAP);

        match client.filter(Resource::Molecule, &criteria).await {
            Ok(molecules) if molecules.is_empty() => ToolReply::not_found(format!(
                "No molecules found containing substructure {}",
                smiles
            )),
            Ok(molecules) => ToolReply::found(with_header(
                &format!("Molecules containing substructure {}:", smiles),
                &join_blocks(molecules.iter().take(RESULT_CAP).map(format_molecule)),
            )),
            Err(e) => ToolReply::failed("searching by substructure", e),
        }
    }
}
