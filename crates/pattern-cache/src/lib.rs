//! # pattern-cache
//!
//! Retrieval cache for routed query results.
//!
//! - Keys: blake3 over a canonical, normalized view of the query.
//! - Lookup: exact key first, then best cosine match over stored embeddings
//!   within the same scope (the key minus the query text).
//! - Tiers: cold → warm → hot by access count; tier sets the TTL only.
//! - Eviction: strict LRU on `last_accessed` when full.
//! - Expiry: lazy on lookup, eager via [`CacheSweeper`].

pub mod cache;
pub mod clock;
pub mod entry;
pub mod key;
pub mod metrics;
pub mod similarity;
pub mod sweeper;

pub use cache::{InvalidationCriteria, RetrievalCache, SimilarTo};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntryInfo, Tier, TierPolicy};
pub use key::{generate_key, generate_scope};
pub use metrics::{CacheMetrics, CacheStats, RequesterStats, TierCounts};
pub use sweeper::CacheSweeper;
