// Single source of truth for all default values.

// --- Cache ---
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1_000;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.90;
pub const DEFAULT_HOT_TTL_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_WARM_TTL_SECS: u64 = 1_800; // 30 minutes
pub const DEFAULT_COLD_TTL_SECS: u64 = 600; // 10 minutes
pub const DEFAULT_WARM_THRESHOLD: u64 = 3;
pub const DEFAULT_HOT_THRESHOLD: u64 = 10;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_SWEEP_BATCH_SIZE: usize = 256;

// --- Policy ---
pub const DEFAULT_CONFIDENCE_THRESHOLD: u8 = 85;

// --- Router ---
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_PREFER_PRIVATE: bool = true;
pub const DEFAULT_INCLUDE_PUBLIC: bool = true;
pub const DEFAULT_DEDUPLICATE: bool = true;
pub const DEFAULT_USE_CACHE: bool = true;
pub const DEFAULT_INVALIDATE_ON_WRITE: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
