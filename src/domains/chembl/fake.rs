//! In-memory [`ChemblApi`] used by handler tests.
//!
//! Every call is recorded so tests can assert which requests a handler made
//! (or that it made none).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ChemblApi, ChemblError, ChemblResult, Criteria, OutputFormat, Record, Resource};

/// A request observed by [`FakeChembl`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(Resource, String),
    GetAs(Resource, String, OutputFormat),
    Filter(Resource, Criteria),
    Search(Resource, String, usize),
}

#[derive(Default)]
pub struct FakeChembl {
    records: HashMap<(Resource, String), Record>,
    documents: HashMap<(String, OutputFormat), String>,
    collections: HashMap<Resource, Vec<Record>>,
    failure: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

fn record(value: Value) -> Record {
    Record::from_value(value).expect("fixture must be a JSON object")
}

impl FakeChembl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `value` for `get(resource, id)`.
    pub fn with_record(mut self, resource: Resource, id: &str, value: Value) -> Self {
        self.records.insert((resource, id.to_string()), record(value));
        self
    }

    /// Serve `text` for `get_as(_, id, format)`.
    pub fn with_text(mut self, id: &str, format: OutputFormat, text: &str) -> Self {
        self.documents
            .insert((id.to_string(), format), text.to_string());
        self
    }

    /// Serve `values` for `filter` and `search` on `resource`. Filters see
    /// the page selected by the criteria offset and limit.
    pub fn with_collection(mut self, resource: Resource, values: Vec<Value>) -> Self {
        self.collections
            .insert(resource, values.into_iter().map(record).collect());
        self
    }

    /// Make every call fail with the given HTTP status.
    pub fn failing(mut self, status: u16) -> Self {
        self.failure = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: Call) -> ChemblResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(status) => Err(ChemblError::Status {
                status,
                url: "fake://chembl".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn collection(&self, resource: Resource) -> Vec<Record> {
        self.collections.get(&resource).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChemblApi for FakeChembl {
    async fn get(&self, resource: Resource, id: &str) -> ChemblResult<Option<Record>> {
        self.record_call(Call::Get(resource, id.to_string()))?;
        Ok(self
            .records
            .get(&(resource, id.to_string()))
            .filter(|record| !record.is_empty())
            .cloned())
    }

    async fn get_as(
        &self,
        resource: Resource,
        id: &str,
        format: OutputFormat,
    ) -> ChemblResult<Option<String>> {
        self.record_call(Call::GetAs(resource, id.to_string(), format))?;
        Ok(self.documents.get(&(id.to_string(), format)).cloned())
    }

    async fn filter(&self, resource: Resource, criteria: &Criteria) -> ChemblResult<Vec<Record>> {
        self.record_call(Call::Filter(resource, criteria.clone()))?;
        let page = self
            .collection(resource)
            .into_iter()
            .skip(criteria.page_offset())
            .take(criteria.page_limit().unwrap_or(usize::MAX))
            .collect();
        Ok(page)
    }

    async fn search(
        &self,
        resource: Resource,
        query: &str,
        limit: usize,
    ) -> ChemblResult<Vec<Record>> {
        self.record_call(Call::Search(resource, query.to_string(), limit))?;
        Ok(self.collection(resource))
    }
}
