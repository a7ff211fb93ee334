//! Document tools.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::chembl::{ChemblApi, Criteria, Record, Resource};
use crate::domains::tools::{ChemblTool, ToolRegistry, ToolReply};

use super::common::{default_limit, validate_limit, with_header};
use super::format::labelled;

/// Register all document tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register::<GetDocumentInfoTool>();
    registry.register::<GetDocumentCompoundsTool>();
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentIdParams {
    #[schemars(description = "ChEMBL ID of the document (e.g., 'CHEMBL1123')")]
    pub chembl_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DocumentCompoundsParams {
    #[schemars(description = "ChEMBL ID of the document (e.g., 'CHEMBL1123')")]
    pub chembl_id: String,

    #[schemars(description = "Maximum number of compounds to return (default: 5)")]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub struct GetDocumentInfoTool;

#[async_trait]
impl ChemblTool for GetDocumentInfoTool {
    const NAME: &'static str = "get_document_info";
    const DESCRIPTION: &'static str = "Get bibliographic information about a document (publication) by its ChEMBL ID.";
    type Params = DocumentIdParams;

    async fn run(client: &dyn ChemblApi, params: DocumentIdParams) -> ToolReply {
        let id = params.chembl_id;
        info!("Fetching document {}", id);

        match client.get(Resource::Document, &id).await {
            Ok(Some(document)) => ToolReply::found(format_document(&document)),
            Ok(None) => ToolReply::not_found(format!("No document found with ID {}", id)),
            Err(e) => ToolReply::failed("retrieving document information", e),
        }
    }
}

fn format_document(document: &Record) -> String {
    let block = labelled(&[
        ("Title", document.field("title")),
        ("ChEMBL ID", document.field("document_chembl_id")),
        ("Journal", document.field("journal")),
        ("Year", document.field("year")),
        ("Authors", document.field("authors")),
        ("DOI", document.field("doi")),
        ("PubMed ID", document.field("pubmed_id")),
    ]);
    format!("Document Details:\n{}", block)
}

pub struct GetDocumentCompoundsTool;

#[async_trait]
impl ChemblTool for GetDocumentCompoundsTool {
    const NAME: &'static str = "get_document_compounds";
    const DESCRIPTION: &'static str = "List the compounds reported in a document.";
    type Params = DocumentCompoundsParams;

    async fn run(client: &dyn ChemblApi, params: DocumentCompoundsParams) -> ToolReply {
        let id = params.chembl_id;
        let limit = validate_limit(params.limit);
        info!("Fetching up to {} compounds of document {}", limit, id);

        let criteria = Criteria::new()
            .with("document_chembl_id", &id)
            .limit(limit);
        match client.filter(Resource::Molecule, &criteria).await {
            Ok(molecules) if molecules.is_empty() => {
                ToolReply::not_found(format!("No compounds found for document {}", id))
            }
            Ok(molecules) => {
                let lines = molecules
                    .iter()
                    .take(limit)
                    .enumerate()
                    .map(|(i, molecule)| compound_line(i + 1, molecule))
                    .collect::<Vec<_>>()
                    .join("\n");
                ToolReply::found(with_header(
                    &format!("Compounds in document {}:", id),
                    &lines,
                ))
            }
            Err(e) => ToolReply::failed("retrieving document compounds", e),
        }
    }
}

fn compound_line(number: usize, molecule: &Record) -> String {
    format!(
        "{}. {} ({}) - {}",
        number,
        molecule.field("pref_name"),
        molecule.field("molecule_chembl_id"),
        molecule.nested("molecule_properties").field("full_molformula")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::chembl::fake::{Call, FakeChembl};
    use crate::domains::tools::ReplyKind;
    use serde_json::json;

    fn compounds(id: &str, limit: i64) -> DocumentCompoundsParams {
        DocumentCompoundsParams {
            chembl_id: id.to_string(),
            limit,
        }
    }

    #[tokio::test]
    async fn test_document_info() {
        let fake = FakeChembl::new().with_record(
            Resource::Document,
            "CHEMBL1123",
            json!({
                "title": "Discovery of novel COX-2 inhibitors",
                "document_chembl_id": "CHEMBL1123",
                "journal": "J. Med. Chem.",
                "year": 2004,
                "doi": null
            }),
        );
        let params = DocumentIdParams {
            chembl_id: "CHEMBL1123".to_string(),
        };
        let reply = GetDocumentInfoTool::run(&fake, params).await;
        assert_eq!(
            reply.text,
            "Document Details:\n\
             Title: Discovery of novel COX-2 inhibitors\n\
             ChEMBL ID: CHEMBL1123\n\
             Journal: J. Med. Chem.\n\
             Year: 2004\n\
             Authors: N/A\n\
             DOI: N/A\n\
             PubMed ID: N/A"
        );
    }

    #[tokio::test]
    async fn test_document_info_empty_record_is_not_found() {
        let fake = FakeChembl::new().with_record(Resource::Document, "CHEMBL1123", json!({}));
        let params = DocumentIdParams {
            chembl_id: "CHEMBL1123".to_string(),
        };
        let reply = GetDocumentInfoTool::run(&fake, params).await;
        assert_eq!(reply.text, "No document found with ID CHEMBL1123");
        assert_eq!(reply.kind, ReplyKind::NotFound);
    }

    #[tokio::test]
    async fn test_document_compounds_clamps_negative_limit() {
        let params: DocumentCompoundsParams =
            serde_json::from_str(r#"{"chembl_id": "CHEMBL1123", "limit": -5}"#).unwrap();
        let fake = FakeChembl::new();
        GetDocumentCompoundsTool::run(&fake, params).await;

        let expected = Criteria::new()
            .with("document_chembl_id", "CHEMBL1123")
            .limit(1);
        assert_eq!(fake.calls(), vec![Call::Filter(Resource::Molecule, expected)]);
    }

    #[tokio::test]
    async fn test_document_info_not_found_and_error() {
        let params = DocumentIdParams {
            chembl_id: "CHEMBL0".to_string(),
        };
        let reply = GetDocumentInfoTool::run(&FakeChembl::new(), params.clone()).await;
        assert_eq!(reply.text, "No document found with ID CHEMBL0");

        let reply = GetDocumentInfoTool::run(&FakeChembl::new().failing(500), params).await;
        assert!(reply.text.starts_with("Error retrieving document information: "));
    }

    #[tokio::test]
    async fn test_document_compounds_numbered_lines() {
        let fake = FakeChembl::new().with_collection(
            Resource::Molecule,
            vec![
                json!({
                    "pref_name": "CELECOXIB",
                    "molecule_chembl_id": "CHEMBL118",
                    "molecule_properties": { "full_molformula": "C17H14F3N3O2S" }
                }),
                json!({ "molecule_chembl_id": "CHEMBL9999" }),
                json!({ "molecule_chembl_id": "CHEMBL10000" }),
            ],
        );
        let reply = GetDocumentCompoundsTool::run(&fake, compounds("CHEMBL1123", 2)).await;
        assert_eq!(
            reply.text,
            "Compounds in document CHEMBL1123:\n\n\
             1. CELECOXIB (CHEMBL118) - C17H14F3N3O2S\n\
             2. N/A (CHEMBL9999) - N/A"
        );

        let expected = Criteria::new()
            .with("document_chembl_id", "CHEMBL1123")
            .limit(2);
        assert_eq!(fake.calls(), vec![Call::Filter(Resource::Molecule, expected)]);
    }

    #[tokio::test]
    async fn test_document_compounds_not_found_and_error() {
        let reply =
            GetDocumentCompoundsTool::run(&FakeChembl::new(), compounds("CHEMBL0", 5)).await;
        assert_eq!(reply.text, "No compounds found for document CHEMBL0");

        let reply = GetDocumentCompoundsTool::run(
            &FakeChembl::new().failing(500),
            compounds("CHEMBL0", 5),
        )
        .await;
        assert!(reply.text.starts_with("Error retrieving document compounds: "));
    }
}
