//! Filter criteria for ChEMBL collection queries.
//!
//! Criteria are an ordered list of `field=value` pairs in the ChEMBL
//! query language (`target_pref_name__icontains`, `molecule_chembl_id`, ...).
//! A few pseudo-fields select dedicated endpoints instead of query
//! parameters; see [`SIMILARITY`] and [`SUBSTRUCTURE`].

/// Reference molecule for a similarity search.
pub const SIMILARITY: &str = "similarity";

/// Tanimoto threshold paired with [`SIMILARITY`].
pub const SIMILARITY_THRESHOLD: &str = "similarity_threshold";

/// SMILES pattern for a substructure search.
pub const SUBSTRUCTURE: &str = "substructure";

/// Threshold used when a similarity search does not specify one (percent).
const DEFAULT_SIMILARITY_PERCENT: u32 = 70;

/// Ordered filter criteria plus an optional page size hint and page offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    filters: Vec<(String, String)>,
    limit: Option<usize>,
    offset: usize,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion unconditionally.
    pub fn with(mut self, field: &str, value: impl ToString) -> Self {
        self.filters.push((field.to_string(), value.to_string()));
        self
    }

    /// Add a criterion only when a non-blank value was supplied.
    pub fn with_optional(self, field: &str, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.with(field, value),
            None => self,
        }
    }

    /// Ask the API for at most `limit` records per page.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` records of the result set.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn page_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn page_offset(&self) -> usize {
        self.offset
    }

    /// First value recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Criteria that stay query parameters once `consumed` fields have been
    /// turned into path segments.
    pub(crate) fn remaining<'a>(
        &'a self,
        consumed: &'a [&'a str],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.filters
            .iter()
            .filter(move |(name, _)| !consumed.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Convert a similarity threshold to the integer percentage ChEMBL expects.
///
/// Fractions (`0.7`) are scaled to percent, values above 1 are taken as
/// percentages already.
pub fn similarity_percent(threshold: Option<&str>) -> Result<u32, String> {
    let Some(raw) = threshold else {
        return Ok(DEFAULT_SIMILARITY_PERCENT);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("similarity threshold must be a number, got '{}'", raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("similarity threshold out of range: {}", raw));
    }
    let percent = if value <= 1.0 { value * 100.0 } else { value };
    Ok(percent.round() as u32)
}
