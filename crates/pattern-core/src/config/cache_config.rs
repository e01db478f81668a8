use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction.
    pub max_cache_size: usize,
    /// Minimum cosine similarity for an embedding-based hit.
    pub similarity_threshold: f64,
    /// Time-to-live per tier, in seconds, measured from last access.
    pub hot_ttl_secs: u64,
    pub warm_ttl_secs: u64,
    pub cold_ttl_secs: u64,
    /// Access count at which an entry promotes cold → warm.
    pub warm_threshold: u64,
    /// Access count at which an entry promotes warm → hot.
    pub hot_threshold: u64,
    /// Interval between background expiry sweeps.
    pub sweep_interval_secs: u64,
    /// Expired entries removed per write-lock acquisition during a sweep.
    pub sweep_batch_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cache_size: defaults::DEFAULT_MAX_CACHE_SIZE,
            similarity_threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            hot_ttl_secs: defaults::DEFAULT_HOT_TTL_SECS,
            warm_ttl_secs: defaults::DEFAULT_WARM_TTL_SECS,
            cold_ttl_secs: defaults::DEFAULT_COLD_TTL_SECS,
            warm_threshold: defaults::DEFAULT_WARM_THRESHOLD,
            hot_threshold: defaults::DEFAULT_HOT_THRESHOLD,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
            sweep_batch_size: defaults::DEFAULT_SWEEP_BATCH_SIZE,
        }
    }
}
