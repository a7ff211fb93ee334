//! Assay tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::chembl::{ChemblApi, Criteria, Record, Resource};
use crate::domains::tools::{ChemblTool, ToolRegistry, ToolReply};

use super::common::{RESULT_CAP, join_blocks};
use super::format::{format_assay, labelled};

/// Register all assay tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register::<SearchAssaysTool>();
    registry.register::<GetAssayDetailsTool>();
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchAssaysParams {
    #[schemars(description = "Assay type code, e.g. 'B' (binding), 'F' (functional), 'A' (ADME) (optional)")]
    #[serde(default)]
    pub assay_type: Option<String>,

    #[schemars(description = "ChEMBL ID of the assayed target (optional)")]
    #[serde(default)]
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AssayIdParams {
    #[schemars(description = "ChEMBL ID of the assay (e.g., 'CHEMBL615117')")]
    pub chembl_id: String,
}

pub struct SearchAssaysTool;

#[async_trait]
impl ChemblTool for SearchAssaysTool {
    const NAME: &'static str = "search_assays";
    const DESCRIPTION: &'static str = "Search for assays by assay type and/or target ChEMBL ID.";
    type Params = SearchAssaysParams;

    async fn run(client: &dyn ChemblApi, params: SearchAssaysParams) -> ToolReply {
        let criteria = Criteria::new()
            .with_optional("assay_type", params.assay_type.as_deref())
            .with_optional("target_chembl_id", params.target_id.as_deref())
            .limit(RESULT_CAP);
        info!("Searching assays with {:?}", criteria.filters());

        match client.filter(Resource::Assay, &criteria).await {
            Ok(assays) if assays.is_empty() => {
                ToolReply::not_found("No assays found matching the criteria.")
            }
            Ok(assays) => {
                ToolReply::found(join_blocks(assays.iter().take(RESULT_CAP).map(format_assay)))
            }
            Err(e) => ToolReply::failed("searching assays", e),
        }
    }
}

pub struct GetAssayDetailsTool;

#[async_trait]
impl ChemblTool for GetAssayDetailsTool {
    const NAME: &'static str = "get_assay_details";
    const DESCRIPTION: &'static str = "Get detailed information about an assay by its ChEMBL ID.";
    type Params = AssayIdParams;

    async fn run(client: &dyn ChemblApi, params: AssayIdParams) -> ToolReply {
        let id = params.chembl_id;
        info!("Fetching assay {}", id);

        match client.get(Resource::Assay, &id).await {
            Ok(Some(assay)) => ToolReply::found(format_assay_details(&assay)),
            Ok(None) => ToolReply::not_found(format!("No assay found with ID {}", id)),
            Err(e) => ToolReply::failed("retrieving assay details", e),
        }
    }
}

fn format_assay_details(assay: &Record) -> String {
    let block = labelled(&[
        ("ChEMBL ID", assay.field("assay_chembl_id")),
        ("Description", assay.field("description")),
        ("Assay Type", assay.field("assay_type")),
        ("Assay Organism", assay.field("assay_organism")),
        ("Target ChEMBL ID", assay.field("target_chembl_id")),
        ("Target Name", assay.field("target_pref_name")),
        ("Document ChEMBL ID", assay.field("document_chembl_id")),
    ]);
    format!("Assay Details:\n{}", block)
}
