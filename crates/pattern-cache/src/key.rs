//! Canonical cache keys.

use pattern_core::models::PatternQuery;
use serde::Serialize;

/// The fields of a query that decide which results it gets, normalized.
#[derive(Debug, Serialize)]
struct CanonicalQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    query_type: Option<String>,
    limit: usize,
    min_relevance: f64,
    requester_id: Option<&'a str>,
    tags: Vec<String>,
    file_types: Vec<String>,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn normalized_set(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = values
        .iter()
        .map(|v| normalize(v))
        .filter(|v| !v.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

fn canonical(query: &PatternQuery, with_text: bool) -> CanonicalQuery<'_> {
    CanonicalQuery {
        text: with_text.then(|| normalize(&query.text)),
        query_type: query.query_type.as_deref().map(normalize),
        limit: query.limit,
        min_relevance: query.min_relevance,
        requester_id: query.requester_id.as_deref(),
        tags: normalized_set(&query.tags),
        file_types: normalized_set(&query.file_types),
    }
}

fn digest(canonical: &CanonicalQuery<'_>) -> String {
    let serialized =
        serde_json::to_string(canonical).unwrap_or_else(|_| format!("{canonical:?}"));
    blake3::hash(serialized.as_bytes()).to_hex().to_string()
}

/// Deterministic key for `query`.
///
/// Text and type are trimmed and lower-cased; tag and file-type filters are
/// normalized, sorted, and deduplicated. The result is a blake3 hex digest.
pub fn generate_key(query: &PatternQuery) -> String {
    digest(&canonical(query, true))
}

/// Everything in the key except the text.
///
/// Similarity lookups only consider entries with the same scope, so a
/// paraphrase never crosses a requester, filter, or limit boundary.
pub fn generate_scope(query: &PatternQuery) -> String {
    digest(&canonical(query, false))
}
