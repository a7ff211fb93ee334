//! Bioactivity tools.
//!
//! Activity IDs are plain integers in ChEMBL, unlike the `CHEMBLxxx` IDs of
//! the other entities, so they are checked before any request is made.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::chembl::{ChemblApi, Criteria, Record, Resource};
use crate::domains::tools::{ChemblTool, ToolRegistry, ToolReply};

use super::common::{RESULT_CAP, is_numeric_id, join_blocks};
use super::format::{format_activity, labelled, measured, named_id};

/// Register all activity tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register::<GetBioactivitiesTool>();
    registry.register::<GetActivityDetailsTool>();
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BioactivitiesParams {
    #[schemars(description = "ChEMBL ID of the molecule (e.g., 'CHEMBL25')")]
    pub chembl_id: String,

    #[schemars(description = "Activity type to keep, e.g. 'IC50', 'Ki', 'EC50' (optional)")]
    #[serde(default)]
    pub activity_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ActivityIdParams {
    #[schemars(description = "Numeric ChEMBL activity ID (e.g., '31863')")]
    pub activity_id: String,
}

pub struct GetBioactivitiesTool;

#[async_trait]
impl ChemblTool for GetBioactivitiesTool {
    const NAME: &'static str = "get_bioactivities";
    const DESCRIPTION: &'static str = "Get bioactivity measurements recorded for a molecule, optionally restricted to one activity type.";
    type Params = BioactivitiesParams;

    async fn run(client: &dyn ChemblApi, params: BioactivitiesParams) -> ToolReply {
        let id = params.chembl_id;
        let criteria = Criteria::new()
            .with("molecule_chembl_id", &id)
            .with_optional("standard_type", params.activity_type.as_deref())
            .limit(RESULT_CAP);
        info!("Fetching bioactivities with {:?}", criteria.filters());

        match client.filter(Resource::Activity, &criteria).await {
            Ok(activities) if activities.is_empty() => {
                ToolReply::not_found(format!("No bioactivity data found for molecule {}", id))
            }
            Ok(activities) => ToolReply::found(join_blocks(
                activities.iter().take(RESULT_CAP).map(format_activity),
            )),
            Err(e) => ToolReply::failed("retrieving bioactivity data", e),
        }
    }
}

pub struct GetActivityDetailsTool;

#[async_trait]
impl ChemblTool for GetActivityDetailsTool {
    const NAME: &'static str = "get_activity_details";
    const DESCRIPTION: &'static str = "Get detailed information about a single bioactivity measurement by its numeric activity ID.";
    type Params = ActivityIdParams;

    async fn run(client: &dyn ChemblApi, params: ActivityIdParams) -> ToolReply {
        let id = params.activity_id;
        if !is_numeric_id(&id) {
            return ToolReply::invalid(format!(
                "Invalid activity ID format. Expected a number, got '{}'",
                id
            ));
        }
        info!("Fetching activity {}", id);

        let criteria = Criteria::new().with("activity_id", &id).limit(1);
        match client.filter(Resource::Activity, &criteria).await {
            Ok(activities) => match activities.first() {
                Some(activity) => ToolReply::found(format_activity_details(activity)),
                None => ToolReply::not_found(format!("No activity found with ID {}", id)),
            },
            Err(e) => ToolReply::failed("retrieving activity details", e),
        }
    }
}

fn format_activity_details(activity: &Record) -> String {
    let block = labelled(&[
        ("Activity ID", activity.field("activity_id").to_string()),
        ("Type", activity.field("standard_type").to_string()),
        (
            "Value",
            measured(
                activity.field("standard_value"),
                activity.field("standard_units"),
            ),
        ),
        ("Relation", activity.field("standard_relation").to_string()),
        (
            "Target",
            named_id(
                activity.field("target_pref_name"),
                activity.field("target_chembl_id"),
            ),
        ),
        (
            "Molecule",
            named_id(
                activity.field("molecule_pref_name"),
                activity.field("molecule_chembl_id"),
            ),
        ),
        (
            "Assay",
            named_id(
                activity.field("assay_description"),
                activity.field("assay_chembl_id"),
            ),
        ),
        ("Document", activity.field("document_chembl_id").to_string()),
    ]);
    format!("Activity Details:\n{}", block)
}
