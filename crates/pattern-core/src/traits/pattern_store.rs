use crate::errors::PatternResult;
use crate::models::{Pattern, PatternMatch, PatternQuery, StoreStats};

/// A private or public pattern store.
///
/// Retrieval internals (keyword index, vector similarity, graph traversal)
/// are the store's business. Implementations own their timeouts.
pub trait IPatternStore: Send + Sync {
    /// Store id used in logs and cache metadata.
    fn name(&self) -> &str;

    /// Ranked matches for `query`, honoring its limit, minimum relevance,
    /// requester, and tag filters.
    fn query(&self, query: &PatternQuery) -> PatternResult<Vec<PatternMatch>>;

    /// Persist a pattern and return its id.
    fn add_pattern(&self, pattern: &Pattern) -> PatternResult<String>;

    fn stats(&self) -> PatternResult<StoreStats>;
}
