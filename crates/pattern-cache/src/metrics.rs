//! Cache metrics: atomic counters, latency averages, per-requester hit rates.
//!
//! Observational only. Nothing here affects lookup or eviction.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct RequesterCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    similarity_hits: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
    invalidations: AtomicU64,
    hit_latency_us: AtomicU64,
    hit_samples: AtomicU64,
    miss_latency_us: AtomicU64,
    miss_samples: AtomicU64,
    requesters: DashMap<String, RequesterCounters>,
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup served from the cache, with the time the lookup took.
    pub fn record_hit(&self, requester: Option<&str>, latency: Duration, by_similarity: bool) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        if by_similarity {
            self.similarity_hits.fetch_add(1, Ordering::Relaxed);
        }
        self.hit_latency_us.fetch_add(micros(latency), Ordering::Relaxed);
        self.hit_samples.fetch_add(1, Ordering::Relaxed);
        if let Some(r) = requester {
            self.requesters
                .entry(r.to_string())
                .or_default()
                .hits
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_miss(&self, requester: Option<&str>) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        if let Some(r) = requester {
            self.requesters
                .entry(r.to_string())
                .or_default()
                .misses
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Time spent producing a result after a miss.
    pub fn record_miss_latency(&self, latency: Duration) {
        self.miss_latency_us.fetch_add(micros(latency), Ordering::Relaxed);
        self.miss_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evictions(&self, n: u64) {
        self.evictions.fetch_add(n, Ordering::Relaxed);
    }

    pub fn record_expirations(&self, n: u64) {
        self.expirations.fetch_add(n, Ordering::Relaxed);
    }

    pub fn record_invalidations(&self, n: u64) {
        self.invalidations.fetch_add(n, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        ratio(hits, hits + self.misses())
    }

    /// Snapshot. `entries` and `tiers` come from the cache itself.
    pub fn snapshot(&self, entries: usize, tiers: TierCounts) -> CacheStats {
        let avg_hit_latency_us = ratio(
            self.hit_latency_us.load(Ordering::Relaxed),
            self.hit_samples.load(Ordering::Relaxed),
        );
        let avg_miss_latency_us = ratio(
            self.miss_latency_us.load(Ordering::Relaxed),
            self.miss_samples.load(Ordering::Relaxed),
        );
        let speedup = (avg_hit_latency_us > 0.0 && avg_miss_latency_us > 0.0)
            .then(|| avg_miss_latency_us / avg_hit_latency_us);

        let requesters = self
            .requesters
            .iter()
            .map(|r| {
                let hits = r.hits.load(Ordering::Relaxed);
                let misses = r.misses.load(Ordering::Relaxed);
                (
                    r.key().clone(),
                    RequesterStats {
                        hits,
                        misses,
                        hit_rate: ratio(hits, hits + misses),
                    },
                )
            })
            .collect();

        CacheStats {
            entries,
            tiers,
            hits: self.hits(),
            misses: self.misses(),
            hit_rate: self.hit_rate(),
            similarity_hits: self.similarity_hits.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            avg_hit_latency_us,
            avg_miss_latency_us,
            speedup,
            requesters,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequesterStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub tiers: TierCounts,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub similarity_hits: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub avg_hit_latency_us: f64,
    pub avg_miss_latency_us: f64,
    /// Average miss latency over average hit latency.
    pub speedup: Option<f64>,
    pub requesters: BTreeMap<String, RequesterStats>,
}
