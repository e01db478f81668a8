use serde::{Deserialize, Serialize};

use super::defaults;

/// Pattern router configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Upper bound on merged results returned per read.
    pub max_results: usize,
    /// Query the private store when one is configured.
    pub prefer_private: bool,
    /// Query the public store.
    pub include_public: bool,
    /// Collapse near-duplicate results across stores.
    pub deduplicate: bool,
    /// Serve repeated reads from the retrieval cache.
    pub use_cache: bool,
    /// Invalidate overlapping cached reads after a successful write.
    pub invalidate_on_write: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_results: defaults::DEFAULT_MAX_RESULTS,
            prefer_private: defaults::DEFAULT_PREFER_PRIVATE,
            include_public: defaults::DEFAULT_INCLUDE_PUBLIC,
            deduplicate: defaults::DEFAULT_DEDUPLICATE,
            use_cache: defaults::DEFAULT_USE_CACHE,
            invalidate_on_write: defaults::DEFAULT_INVALIDATE_ON_WRITE,
        }
    }
}
