/// Crate version, shared by every workspace member.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ranking priority for results served by the private store.
pub const PRIVATE_PRIORITY: u8 = 1;

/// Ranking priority for results served by the public store.
pub const PUBLIC_PRIORITY: u8 = 2;

/// Backend id recorded on cache entries populated by the router's merged reads.
pub const ROUTER_BACKEND: &str = "router";

/// Words of this length or shorter are ignored when building a dedup key.
pub const DEDUP_MIN_WORD_LEN: usize = 3;

/// Number of significant words kept in a dedup key.
pub const DEDUP_KEY_WORDS: usize = 5;

/// Maximum sanitizer confidence.
pub const MAX_CONFIDENCE: u8 = 100;
