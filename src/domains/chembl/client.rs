//! HTTP implementation of [`ChemblApi`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use super::criteria::{SIMILARITY, SIMILARITY_THRESHOLD, SUBSTRUCTURE, similarity_percent};
use super::{ChemblApi, ChemblError, ChemblResult, Criteria, OutputFormat, Record, Resource};
use crate::core::config::ChemblConfig;

/// Upper bound ChEMBL accepts for the `limit` parameter.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Client for the ChEMBL REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ChemblClient {
    http: Client,
    base_url: Url,
    page_size: usize,
}

impl ChemblClient {
    /// Create a client from configuration.
    pub fn new(config: &ChemblConfig) -> ChemblResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ChemblError::invalid_url(&config.base_url, e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ChemblError::invalid_url(
                &config.base_url,
                "URL cannot be used as a base",
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ChemblError::Client)?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// URL of a single record in the requested format.
    pub fn record_url(
        &self,
        resource: Resource,
        id: &str,
        format: OutputFormat,
    ) -> ChemblResult<Url> {
        self.endpoint(
            &[resource.path(), id],
            &[("format", format.as_str().to_string())],
        )
    }

    /// URL of a filtered collection page.
    ///
    /// Molecule criteria carrying [`SIMILARITY`] or [`SUBSTRUCTURE`] are
    /// routed to the dedicated search endpoints; everything else becomes a
    /// query parameter.
    pub fn filter_url(&self, resource: Resource, criteria: &Criteria) -> ChemblResult<Url> {
        let mut params = self.page_params(criteria.page_limit());
        if criteria.page_offset() > 0 {
            params.push(("offset", criteria.page_offset().to_string()));
        }

        let (segments, consumed): (Vec<String>, &[&str]) = match (
            resource,
            criteria.get(SIMILARITY),
            criteria.get(SUBSTRUCTURE),
        ) {
            (Resource::Molecule, Some(reference), _) => {
                let percent = similarity_percent(criteria.get(SIMILARITY_THRESHOLD))
                    .map_err(ChemblError::invalid_criteria)?;
                (
                    vec![
                        "similarity".to_string(),
                        reference.to_string(),
                        percent.to_string(),
                    ],
                    &[SIMILARITY, SIMILARITY_THRESHOLD][..],
                )
            }
            (Resource::Molecule, None, Some(smiles)) => (
                vec!["substructure".to_string(), smiles.to_string()],
                &[SUBSTRUCTURE][..],
            ),
            _ => (vec![resource.path().to_string()], &[][..]),
        };

        params.extend(
            criteria
                .remaining(consumed)
                .map(|(field, value)| (field, value.to_string())),
        );

        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.endpoint(&segments, &params)
    }

    /// URL of a free-text search page.
    pub fn search_url(&self, resource: Resource, query: &str, limit: usize) -> ChemblResult<Url> {
        let mut params = self.page_params(Some(limit));
        params.push(("q", query.to_string()));
        self.endpoint(&[resource.path(), "search"], &params)
    }

    fn page_params(&self, limit: Option<usize>) -> Vec<(&'static str, String)> {
        let limit = limit.unwrap_or(self.page_size).clamp(1, MAX_PAGE_SIZE);
        vec![
            ("format", OutputFormat::Json.as_str().to_string()),
            ("limit", limit.to_string()),
        ]
    }

    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> ChemblResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChemblError::invalid_url(self.base_url.as_str(), "not a base URL"))?
            .pop_if_empty()
            .extend(segments);

        let query = serde_urlencoded::to_string(params)?;
        url.set_query((!query.is_empty()).then_some(query.as_str()));
        Ok(url)
    }

    /// Send a GET request. A 404 is reported as `None`.
    async fn fetch(&self, url: Url) -> ChemblResult<Option<Response>> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ChemblError::Http {
                url: url.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            status => Err(ChemblError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    async fn fetch_json(&self, url: Url) -> ChemblResult<Option<Value>> {
        let Some(response) = self.fetch(url.clone()).await? else {
            return Ok(None);
        };
        response
            .json::<Value>()
            .await
            .map(Some)
            .map_err(|source| ChemblError::Http {
                url: url.to_string(),
                source,
            })
    }

    async fn fetch_collection(&self, resource: Resource, url: Url) -> ChemblResult<Vec<Record>> {
        match self.fetch_json(url.clone()).await? {
            Some(body) => records_from(body, resource, url.as_str()),
            None => Ok(Vec::new()),
        }
    }
}

/// Extract the records of a collection page (`{"molecules": [...], ...}`).
pub fn records_from(body: Value, resource: Resource, url: &str) -> ChemblResult<Vec<Record>> {
    let key = resource.collection_key();
    let Value::Object(mut page) = body else {
        return Err(ChemblError::decode(url, "expected a JSON object"));
    };

    match page.remove(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| {
                Record::from_value(item)
                    .ok_or_else(|| ChemblError::decode(url, format!("non-object entry in '{}'", key)))
            })
            .collect(),
        Some(Value::Null) => Ok(Vec::new()),
        Some(_) => Err(ChemblError::decode(url, format!("'{}' is not a list", key))),
        None => Err(ChemblError::decode(url, format!("missing '{}' list", key))),
    }
}

#[async_trait]
impl ChemblApi for ChemblClient {
    async fn get(&self, resource: Resource, id: &str) -> ChemblResult<Option<Record>> {
        let url = self.record_url(resource, id, OutputFormat::Json)?;
        match self.fetch_json(url.clone()).await? {
            Some(body) => Record::from_value(body)
                .map(|record| Some(record).filter(|r| !r.is_empty()))
                .ok_or_else(|| ChemblError::decode(url.as_str(), "expected a JSON object")),
            None => Ok(None),
        }
    }

    async fn get_as(
        &self,
        resource: Resource,
        id: &str,
        format: OutputFormat,
    ) -> ChemblResult<Option<String>> {
        let url = self.record_url(resource, id, format)?;
        let Some(response) = self.fetch(url.clone()).await? else {
            return Ok(None);
        };
        let text = response.text().await.map_err(|source| ChemblError::Http {
            url: url.to_string(),
            source,
        })?;
        Ok(Some(text).filter(|t| !t.trim().is_empty()))
    }

    async fn filter(&self, resource: Resource, criteria: &Criteria) -> ChemblResult<Vec<Record>> {
        let url = self.filter_url(resource, criteria)?;
        self.fetch_collection(resource, url).await
    }

    async fn search(
        &self,
        resource: Resource,
        query: &str,
        limit: usize,
    ) -> ChemblResult<Vec<Record>> {
        let url = self.search_url(resource, query, limit)?;
        self.fetch_collection(resource, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ChemblClient {
        ChemblClient::new(&ChemblConfig::default()).unwrap()
    }

    #[test]
    fn test_record_url() {
        let url = client()
            .record_url(Resource::Molecule, "CHEMBL25", OutputFormat::Sdf)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.ebi.ac.uk/chembl/api/data/molecule/CHEMBL25?format=sdf"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let config = ChemblConfig {
            base_url: "http://localhost:8000/chembl/api/data/".to_string(),
            ..ChemblConfig::default()
        };
        let url = ChemblClient::new(&config)
            .unwrap()
            .record_url(Resource::Target, "CHEMBL1824", OutputFormat::Json)
            .unwrap();
        assert_eq!(url.path(), "/chembl/api/data/target/CHEMBL1824");
    }

    #[test]
    fn test_filter_url_plain_criteria() {
        let criteria = Criteria::new()
            .with("target_pref_name__icontains", "cyclooxygenase 2")
            .limit(5);
        let url = client().filter_url(Resource::Target, &criteria).unwrap();
        assert_eq!(url.path(), "/chembl/api/data/target");
        assert_eq!(
            url.query(),
            Some("format=json&limit=5&target_pref_name__icontains=cyclooxygenase+2")
        );
    }

    #[test]
    fn test_filter_url_with_offset() {
        let criteria = Criteria::new()
            .with("molecule_chembl_id", "CHEMBL25")
            .limit(100)
            .offset(200);
        let url = client().filter_url(Resource::Activity, &criteria).unwrap();
        assert_eq!(
            url.query(),
            Some("format=json&limit=100&offset=200&molecule_chembl_id=CHEMBL25")
        );
    }

    #[test]
    fn test_filter_url_uses_default_page_size() {
        let url = client()
            .filter_url(Resource::Assay, &Criteria::new())
            .unwrap();
        assert_eq!(url.query(), Some("format=json&limit=20"));
    }

    #[test]
    fn test_filter_url_similarity_endpoint() {
        let criteria = Criteria::new()
            .with(SIMILARITY, "CHEMBL25")
            .with(SIMILARITY_THRESHOLD, 0.7)
            .limit(5);
        let url = client().filter_url(Resource::Molecule, &criteria).unwrap();
        assert_eq!(url.path(), "/chembl/api/data/similarity/CHEMBL25/70");
        assert_eq!(url.query(), Some("format=json&limit=5"));
    }

    #[test]
    fn test_filter_url_substructure_endpoint() {
        let criteria = Criteria::new().with(SUBSTRUCTURE, "CC(=O)O");
        let url = client().filter_url(Resource::Molecule, &criteria).unwrap();
        assert_eq!(url.path(), "/chembl/api/data/substructure/CC(=O)O");
    }

    #[test]
    fn test_filter_url_rejects_bad_threshold() {
        let criteria = Criteria::new()
            .with(SIMILARITY, "CHEMBL25")
            .with(SIMILARITY_THRESHOLD, "very");
        let err = client()
            .filter_url(Resource::Molecule, &criteria)
            .unwrap_err();
        assert!(matches!(err, ChemblError::InvalidCriteria(_)));
    }

    #[test]
    fn test_search_url() {
        let url = client()
            .search_url(Resource::Molecule, "aspirin", 10)
            .unwrap();
        assert_eq!(url.path(), "/chembl/api/data/molecule/search");
        assert_eq!(url.query(), Some("format=json&limit=10&q=aspirin"));
    }

    #[test]
    fn test_records_from_collection_page() {
        let body = json!({
            "activities": [{ "activity_id": 1 }, { "activity_id": 2 }],
            "page_meta": { "total_count": 2 }
        });
        let records = records_from(body, Resource::Activity, "test").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].field("activity_id").to_string(), "2");
    }

    #[test]
    fn test_records_from_rejects_wrong_shape() {
        assert!(records_from(json!({ "targets": [] }), Resource::Molecule, "t").is_err());
        assert!(records_from(json!({ "molecules": [1] }), Resource::Molecule, "t").is_err());
        assert!(records_from(json!([]), Resource::Molecule, "t").is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ChemblConfig {
            base_url: "not a url".to_string(),
            ..ChemblConfig::default()
        };
        assert!(matches!(
            ChemblClient::new(&config),
            Err(ChemblError::InvalidUrl { .. })
        ));
    }

    // Integration tests (require network, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_get_aspirin() {
        let record = client().get(Resource::Molecule, "CHEMBL25").await.unwrap();
        let record = record.expect("CHEMBL25 should exist");
        assert_eq!(record.field("molecule_chembl_id").to_string(), "CHEMBL25");
    }

    #[ignore]
    #[tokio::test]
    async fn test_get_sdf() {
        let sdf = client()
            .get_as(Resource::Molecule, "CHEMBL25", OutputFormat::Sdf)
            .await
            .unwrap()
            .expect("SDF should exist");
        assert!(sdf.contains("M  END"));
    }
}
