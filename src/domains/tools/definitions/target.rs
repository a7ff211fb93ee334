//! Target tools.
//!
//! Target search by name or UniProt accession, target details with their
//! protein components, and the targets a molecule was measured against.

use std::collections::HashSet;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domains::chembl::{ChemblApi, Criteria, Record, Resource};
use crate::domains::tools::{ChemblTool, ToolRegistry, ToolReply};

use super::common::{RESULT_CAP, default_limit, join_blocks, validate_limit};
use super::format::{format_target, labelled, measured};

/// Activities fetched per page when collecting the targets of a molecule.
const ACTIVITY_PAGE: usize = 100;

/// Pages read before giving up on finding more targets.
const MAX_ACTIVITY_PAGES: usize = 20;

/// Register all target tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register::<SearchTargetsTool>();
    registry.register::<GetTargetDetailsTool>();
    registry.register::<GetMoleculeTargetsTool>();
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTargetsParams {
    #[schemars(description = "Name of the target, matched case-insensitively (optional)")]
    #[serde(default)]
    pub target_name: Option<String>,

    #[schemars(description = "UniProt accession ID (optional)")]
    #[serde(default)]
    pub uniprot_id: Option<String>,

    #[schemars(description = "Maximum number of results to return (default: 5)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TargetIdParams {
    #[schemars(description = "ChEMBL ID of the target (e.g., 'CHEMBL1824')")]
    pub chembl_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MoleculeTargetsParams {
    #[schemars(description = "ChEMBL ID of the molecule (e.g., 'CHEMBL25')")]
    pub chembl_id: String,
}

pub struct SearchTargetsTool;

#[async_trait]
impl ChemblTool for SearchTargetsTool {
    const NAME: &'static str = "search_targets";
    const DESCRIPTION: &'static str = "Search for targets in the ChEMBL database by name and/or UniProt accession.";
    type Params = SearchTargetsParams;

    async fn run(client: &dyn ChemblApi, params: SearchTargetsParams) -> ToolReply {
        let limit = validate_limit(params.limit);
        let criteria = Criteria::new()
            .with_optional("target_pref_name__icontains", params.target_name.as_deref())
            .with_optional("target_components__accession", params.uniprot_id.as_deref())
            .limit(limit);
        info!("Searching targets with {:?}", criteria.filters());

        match client.filter(Resource::Target, &criteria).await {
            Ok(targets) if targets.is_empty() => {
                ToolReply::not_found("No targets found matching the criteria.")
            }
            Ok(targets) => {
                ToolReply::found(join_blocks(targets.iter().take(limit).map(format_target)))
            }
            Err(e) => ToolReply::failed("searching targets", e),
        }
    }
}

pub struct GetTargetDetailsTool;

#[async_trait]
impl ChemblTool for GetTargetDetailsTool {
    const NAME: &'static str = "get_target_details";
    const DESCRIPTION: &'static str = "Get detailed information about a target by its ChEMBL ID, including its protein components.";
    type Params = TargetIdParams;

    async fn run(client: &dyn ChemblApi, params: TargetIdParams) -> ToolReply {
        let id = params.chembl_id;
        info!("Fetching target {}", id);

        match client.get(Resource::Target, &id).await {
            Ok(Some(target)) => ToolReply::found(format_target_details(&target)),
            Ok(None) => ToolReply::not_found(format!("No target found with ID {}", id)),
            Err(e) => ToolReply::failed("retrieving target details", e),
        }
    }
}

/// Target block plus a numbered component list when the target has any.
fn format_target_details(target: &Record) -> String {
    let mut details = format!("Target Details:\n{}", format_target(target));

    let components = target.list("target_components");
    if !components.is_empty() {
        details.push_str("\n\nComponents:");
        for (i, component) in components.iter().enumerate() {
            details.push_str(&format!(
                "\n{}. {}",
                i + 1,
                component.field("component_description")
            ));
            if let Some(accession) = component.field("accession").non_empty() {
                details.push_str(&format!(" (UniProt: {})", accession));
            }
        }
    }

    details
}

pub struct GetMoleculeTargetsTool;

#[async_trait]
impl ChemblTool for GetMoleculeTargetsTool {
    const NAME: &'static str = "get_molecule_targets";
    const DESCRIPTION: &'static str = "Get known targets of a molecule, derived from its recorded bioactivities.";
    type Params = MoleculeTargetsParams;

    async fn run(client: &dyn ChemblApi, params: MoleculeTargetsParams) -> ToolReply {
        let id = params.chembl_id;
        info!("Collecting targets of molecule {}", id);

        let mut activities = Vec::new();
        let mut target_ids = HashSet::new();
        for page in 0..MAX_ACTIVITY_PAGES {
            let criteria = Criteria::new()
                .with("molecule_chembl_id", &id)
                .limit(ACTIVITY_PAGE)
                .offset(page * ACTIVITY_PAGE);
            let batch = match client.filter(Resource::Activity, &criteria).await {
                Ok(batch) => batch,
                Err(e) => return ToolReply::failed("retrieving target information", e),
            };

            let exhausted = batch.len() < ACTIVITY_PAGE;
            target_ids.extend(
                batch
                    .iter()
                    .filter_map(|activity| activity.field("target_chembl_id").non_empty()),
            );
            activities.extend(batch);
            if exhausted || target_ids.len() >= RESULT_CAP {
                break;
            }
        }

        let targets = distinct_targets(&activities, RESULT_CAP);
        debug!(
            "{} activities yielded {} distinct targets",
            activities.len(),
            targets.len()
        );
        if targets.is_empty() {
            return ToolReply::not_found(format!(
                "No target information found for molecule {}",
                id
            ));
        }

        ToolReply::found(join_blocks(targets.into_iter().map(format_molecule_target)))
    }
}

/// First activity seen for each distinct target, in encounter order, at most
/// `cap` of them. Activities without a target ID are skipped.
fn distinct_targets(activities: &[Record], cap: usize) -> Vec<(String, &Record)> {
    let mut seen = HashSet::new();
    activities
        .iter()
        .filter_map(|activity| {
            activity
                .field("target_chembl_id")
                .non_empty()
                .map(|target_id| (target_id, activity))
        })
        .filter(|(target_id, _)| seen.insert(target_id.clone()))
        .take(cap)
        .collect()
}

fn format_molecule_target((target_id, activity): (String, &Record)) -> String {
    labelled(&[
        ("Target", activity.field("target_pref_name").to_string()),
        ("ChEMBL ID", target_id),
        ("Organism", activity.field("target_organism").to_string()),
        (
            "Activity",
            format!(
                "{} = {}",
                activity.field("standard_type"),
                measured(
                    activity.field("standard_value"),
                    activity.field("standard_units")
                )
            ),
        ),
    ])
}
