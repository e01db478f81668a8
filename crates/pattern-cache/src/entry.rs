//! Cache entries and the tier policy.
//!
//! Mutable metadata lives in atomics so hits never take the map's write lock.

use std::sync::atomic::{AtomicI64, AtomicU64, AtomicU8, Ordering};

use pattern_core::config::CacheConfig;
use pattern_core::models::PatternQuery;
use serde::{Deserialize, Serialize};

/// Access tier. Ordered so promotion is a `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Tier {
    Cold = 0,
    Warm = 1,
    Hot = 2,
}

impl Tier {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Tier::Cold,
            1 => Tier::Warm,
            _ => Tier::Hot,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Cold => "cold",
            Tier::Warm => "warm",
            Tier::Hot => "hot",
        }
    }
}

/// Promotion thresholds and per-tier TTLs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPolicy {
    pub warm_threshold: u64,
    pub hot_threshold: u64,
    pub hot_ttl_ms: i64,
    pub warm_ttl_ms: i64,
    pub cold_ttl_ms: i64,
}

impl TierPolicy {
    pub fn from_config(config: &CacheConfig) -> Self {
        let ms = |secs: u64| i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        Self {
            warm_threshold: config.warm_threshold,
            hot_threshold: config.hot_threshold,
            hot_ttl_ms: ms(config.hot_ttl_secs),
            warm_ttl_ms: ms(config.warm_ttl_secs),
            cold_ttl_ms: ms(config.cold_ttl_secs),
        }
    }

    pub fn tier_for(&self, access_count: u64) -> Tier {
        if access_count >= self.hot_threshold {
            Tier::Hot
        } else if access_count >= self.warm_threshold {
            Tier::Warm
        } else {
            Tier::Cold
        }
    }

    pub fn ttl_ms(&self, tier: Tier) -> i64 {
        match tier {
            Tier::Hot => self.hot_ttl_ms,
            Tier::Warm => self.warm_ttl_ms,
            Tier::Cold => self.cold_ttl_ms,
        }
    }
}

/// One cached query result.
#[derive(Debug)]
pub struct CacheEntry<V> {
    pub key: String,
    pub query: PatternQuery,
    pub result: V,
    pub embedding: Option<Vec<f32>>,
    pub backend: String,
    /// Similarity lookups only match entries within the same scope.
    pub scope: String,
    pub created_at_ms: i64,
    last_accessed_ms: AtomicI64,
    access_count: AtomicU64,
    tier: AtomicU8,
    /// Monotonic sequence of the last touch; breaks `last_accessed` ties.
    touch_seq: AtomicU64,
}

impl<V> CacheEntry<V> {
    pub fn new(
        key: String,
        query: PatternQuery,
        result: V,
        embedding: Option<Vec<f32>>,
        backend: String,
        now_ms: i64,
        seq: u64,
    ) -> Self {
        let scope = crate::key::generate_scope(&query);
        Self {
            key,
            query,
            result,
            embedding,
            backend,
            scope,
            created_at_ms: now_ms,
            last_accessed_ms: AtomicI64::new(now_ms),
            access_count: AtomicU64::new(0),
            tier: AtomicU8::new(Tier::Cold as u8),
            touch_seq: AtomicU64::new(seq),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Take over the usage history of the entry this one replaces, so a
    /// refreshed result keeps its tier.
    pub fn inherit_usage(&self, previous: &CacheEntry<V>) {
        self.access_count
            .fetch_max(previous.access_count(), Ordering::AcqRel);
        self.tier.fetch_max(previous.tier() as u8, Ordering::AcqRel);
        self.last_accessed_ms
            .fetch_max(previous.last_accessed_ms(), Ordering::AcqRel);
    }

    /// Record a hit. Returns the tier after any promotion.
    pub fn touch(&self, now_ms: i64, seq: u64, policy: &TierPolicy) -> Tier {
        self.last_accessed_ms.fetch_max(now_ms, Ordering::AcqRel);
        self.touch_seq.fetch_max(seq, Ordering::AcqRel);
        let count = self.access_count.fetch_add(1, Ordering::AcqRel) + 1;
        let target = policy.tier_for(count) as u8;
        let previous = self.tier.fetch_max(target, Ordering::AcqRel);
        Tier::from_u8(previous.max(target))
    }

    pub fn tier(&self) -> Tier {
        Tier::from_u8(self.tier.load(Ordering::Acquire))
    }

    pub fn access_count(&self) -> u64 {
        self.access_count.load(Ordering::Acquire)
    }

    pub fn last_accessed_ms(&self) -> i64 {
        self.last_accessed_ms.load(Ordering::Acquire)
    }

    /// `(last_accessed, touch_seq)`: the smallest is the LRU entry.
    pub fn recency(&self) -> (i64, u64) {
        (
            self.last_accessed_ms(),
            self.touch_seq.load(Ordering::Acquire),
        )
    }

    pub fn is_expired(&self, now_ms: i64, policy: &TierPolicy) -> bool {
        now_ms.saturating_sub(self.last_accessed_ms()) > policy.ttl_ms(self.tier())
    }

    pub fn info(&self) -> CacheEntryInfo {
        CacheEntryInfo {
            key: self.key.clone(),
            backend: self.backend.clone(),
            requester_id: self.query.requester_id.clone(),
            created_at_ms: self.created_at_ms,
            last_accessed_ms: self.last_accessed_ms(),
            access_count: self.access_count(),
            tier: self.tier(),
            has_embedding: self.embedding.is_some(),
        }
    }
}

/// Plain snapshot of an entry's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntryInfo {
    pub key: String,
    pub backend: String,
    pub requester_id: Option<String>,
    pub created_at_ms: i64,
    pub last_accessed_ms: i64,
    pub access_count: u64,
    pub tier: Tier,
    pub has_embedding: bool,
}
