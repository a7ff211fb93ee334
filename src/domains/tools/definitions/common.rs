//! Common utilities shared across ChEMBL tools.

/// Separator placed between formatted records.
pub const SEPARATOR: &str = "\n---\n";

/// Number of records shown by tools without a `limit` argument.
pub const RESULT_CAP: usize = 5;

/// Largest `limit` a caller may request.
pub const MAX_LIMIT: usize = 100;

/// Default limit for search results.
pub fn default_limit() -> i64 {
    RESULT_CAP as i64
}

/// Validate and clamp limit to allowed range (1-100).
///
/// Any integer is accepted; zero and negative values become 1.
pub fn validate_limit(limit: i64) -> usize {
    limit.clamp(1, MAX_LIMIT as i64) as usize
}

/// Join formatted records with [`SEPARATOR`].
pub fn join_blocks<I>(blocks: I) -> String
where
    I: IntoIterator<Item = String>,
{
    blocks.into_iter().collect::<Vec<_>>().join(SEPARATOR)
}

/// Prefix `body` with a section header and a blank line.
pub fn with_header(header: &str, body: &str) -> String {
    format!("{}\n\n{}", header, body)
}

/// Whether `id` is a non-empty run of ASCII digits.
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}
