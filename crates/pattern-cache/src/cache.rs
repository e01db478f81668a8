//! The retrieval cache.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use pattern_core::config::CacheConfig;
use pattern_core::models::PatternQuery;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::entry::{CacheEntry, CacheEntryInfo, Tier, TierPolicy};
use crate::key;
use crate::metrics::{CacheMetrics, CacheStats, TierCounts};
use crate::similarity::cosine_similarity;

/// Which entries [`RetrievalCache::invalidate`] removes.
///
/// An entry is removed when any set criterion matches it. An empty criteria
/// removes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvalidationCriteria {
    /// Matches entries whose query came from this requester.
    pub agent: Option<String>,
    /// Matches entries produced by this backend.
    pub backend: Option<String>,
    /// Matches entries whose query tag filter overlaps this set.
    pub tags: BTreeSet<String>,
    /// Matches entries whose query had no tag filter.
    pub untagged: bool,
    pub all: bool,
}

impl InvalidationCriteria {
    pub fn all() -> Self {
        Self {
            all: true,
            ..Default::default()
        }
    }

    pub fn by_agent(agent: impl Into<String>) -> Self {
        Self {
            agent: Some(agent.into()),
            ..Default::default()
        }
    }

    pub fn by_backend(backend: impl Into<String>) -> Self {
        Self {
            backend: Some(backend.into()),
            ..Default::default()
        }
    }

    pub fn by_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Also match entries cached for queries without a tag filter.
    pub fn including_untagged(mut self) -> Self {
        self.untagged = true;
        self
    }

    fn matches<V>(&self, entry: &CacheEntry<V>) -> bool {
        if self.all {
            return true;
        }
        if let Some(agent) = &self.agent {
            if entry.query.requester_id.as_deref() == Some(agent.as_str()) {
                return true;
            }
        }
        if let Some(backend) = &self.backend {
            if &entry.backend == backend {
                return true;
            }
        }
        if self.untagged && entry.query.tags.is_empty() {
            return true;
        }
        !self.tags.is_empty() && entry.query.tags.iter().any(|t| self.tags.contains(t))
    }
}

/// Embedding fallback for [`RetrievalCache::get`]: only entries stored under
/// `scope` are candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarTo<'a> {
    pub embedding: &'a [f32],
    pub scope: &'a str,
}

impl<'a> SimilarTo<'a> {
    pub fn new(embedding: &'a [f32], scope: &'a str) -> Self {
        Self { embedding, scope }
    }
}

/// Tiered query-result cache shared across concurrent callers.
///
/// Structural changes (insert, evict, remove) take the map's write lock.
/// Hits only take the read lock and update entry atomics. Never errors: a
/// failed lookup is a miss, a poisoned lock is recovered.
pub struct RetrievalCache<V> {
    entries: RwLock<HashMap<String, Arc<CacheEntry<V>>>>,
    policy: TierPolicy,
    max_size: usize,
    similarity_threshold: f64,
    sweep_batch_size: usize,
    clock: Arc<dyn Clock>,
    metrics: CacheMetrics,
    seq: AtomicU64,
}

impl<V: Clone + Send + Sync> RetrievalCache<V> {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            policy: TierPolicy::from_config(config),
            max_size: config.max_cache_size.max(1),
            similarity_threshold: config.similarity_threshold,
            sweep_batch_size: config.sweep_batch_size.max(1),
            clock,
            metrics: CacheMetrics::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Deterministic key for `query`. See [`key::generate_key`].
    pub fn generate_key(&self, query: &PatternQuery) -> String {
        key::generate_key(query)
    }

    /// Scope [`RetrievalCache::set`] records for `query`. See
    /// [`key::generate_scope`].
    pub fn generate_scope(&self, query: &PatternQuery) -> String {
        key::generate_scope(query)
    }

    /// Look up `key`, falling back to the most similar stored embedding in
    /// the same scope.
    pub fn get(
        &self,
        key: &str,
        similar: Option<SimilarTo<'_>>,
        requester: Option<&str>,
    ) -> Option<V> {
        let started = Instant::now();
        let now = self.clock.now_millis();

        let exact = self.read().get(key).cloned();
        if let Some(entry) = exact {
            if entry.is_expired(now, &self.policy) {
                self.remove_if_same(key, &entry);
                self.metrics.record_expirations(1);
                debug!(key, tier = entry.tier().as_str(), "cache entry expired on lookup");
            } else {
                let tier = entry.touch(now, self.next_seq(), &self.policy);
                self.metrics.record_hit(requester, started.elapsed(), false);
                debug!(key, tier = tier.as_str(), "cache hit");
                return Some(entry.result.clone());
            }
        }

        if let Some(similar) = similar {
            if let Some((entry, score)) = self.most_similar(similar, now) {
                let tier = entry.touch(now, self.next_seq(), &self.policy);
                self.metrics.record_hit(requester, started.elapsed(), true);
                debug!(
                    key,
                    matched = %entry.key,
                    similarity = score,
                    tier = tier.as_str(),
                    "cache similarity hit"
                );
                return Some(entry.result.clone());
            }
        }

        self.metrics.record_miss(requester);
        debug!(key, "cache miss");
        None
    }

    /// Insert or replace `key`, scoped by the query's own filters.
    pub fn set(
        &self,
        key: impl Into<String>,
        query: PatternQuery,
        result: V,
        embedding: Option<Vec<f32>>,
        backend: &str,
    ) {
        let scope = key::generate_scope(&query);
        self.set_scoped(key, scope, query, result, embedding, backend);
    }

    /// Insert or replace `key` under an explicit similarity scope.
    ///
    /// Evicts the least recently used entry first when inserting a new key
    /// into a full cache. Replacing a live entry keeps its access count and
    /// tier.
    pub fn set_scoped(
        &self,
        key: impl Into<String>,
        scope: impl Into<String>,
        query: PatternQuery,
        result: V,
        embedding: Option<Vec<f32>>,
        backend: &str,
    ) {
        let key = key.into();
        let now = self.clock.now_millis();
        let entry = CacheEntry::new(
            key.clone(),
            query,
            result,
            embedding,
            backend.to_string(),
            now,
            self.next_seq(),
        )
        .with_scope(scope);

        let mut map = self.write();
        if let Some(previous) = map.get(&key) {
            if !previous.is_expired(now, &self.policy) {
                entry.inherit_usage(previous);
            }
        } else if map.len() >= self.max_size {
            let victim = map
                .values()
                .min_by_key(|e| e.recency())
                .map(|e| e.key.clone());
            if let Some(victim) = victim {
                map.remove(&victim);
                self.metrics.record_evictions(1);
                debug!(evicted = %victim, "cache LRU eviction");
            }
        }
        map.insert(key, Arc::new(entry));
    }

    /// Remove every entry matching `criteria`. Returns the number removed.
    pub fn invalidate(&self, criteria: &InvalidationCriteria) -> usize {
        let mut map = self.write();
        let before = map.len();
        map.retain(|_, e| !criteria.matches(e));
        let removed = before - map.len();
        drop(map);
        if removed > 0 {
            self.metrics.record_invalidations(removed as u64);
            debug!(removed, "cache invalidation");
        }
        removed
    }

    pub fn clear(&self) -> usize {
        self.invalidate(&InvalidationCriteria::all())
    }

    /// Remove all expired entries, taking the write lock once per batch.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let expired: Vec<String> = self
            .read()
            .values()
            .filter(|e| e.is_expired(now, &self.policy))
            .map(|e| e.key.clone())
            .collect();

        let mut removed = 0;
        for batch in expired.chunks(self.sweep_batch_size) {
            let mut map = self.write();
            for key in batch {
                // Re-check: a hit may have refreshed it since the scan.
                if map.get(key).is_some_and(|e| e.is_expired(now, &self.policy)) {
                    map.remove(key);
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            self.metrics.record_expirations(removed as u64);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn entry_snapshot(&self, key: &str) -> Option<CacheEntryInfo> {
        self.read().get(key).map(|e| e.info())
    }

    /// Report the time spent fetching a result after a miss.
    pub fn record_fetch_latency(&self, latency: Duration) {
        self.metrics.record_miss_latency(latency);
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn stats(&self) -> CacheStats {
        let (entries, tiers) = {
            let map = self.read();
            let mut tiers = TierCounts::default();
            for e in map.values() {
                match e.tier() {
                    Tier::Hot => tiers.hot += 1,
                    Tier::Warm => tiers.warm += 1,
                    Tier::Cold => tiers.cold += 1,
                }
            }
            (map.len(), tiers)
        };
        self.metrics.snapshot(entries, tiers)
    }

    fn most_similar(
        &self,
        similar: SimilarTo<'_>,
        now: i64,
    ) -> Option<(Arc<CacheEntry<V>>, f64)> {
        let map = self.read();
        let mut best: Option<(&Arc<CacheEntry<V>>, f64)> = None;
        for entry in map.values() {
            if entry.scope != similar.scope {
                continue;
            }
            let Some(stored) = entry.embedding.as_deref() else {
                continue;
            };
            if entry.is_expired(now, &self.policy) {
                continue;
            }
            let score = cosine_similarity(similar.embedding, stored);
            if score >= self.similarity_threshold && best.map_or(true, |(_, b)| score > b) {
                best = Some((entry, score));
            }
        }
        best.map(|(e, s)| (Arc::clone(e), s))
    }

    fn remove_if_same(&self, key: &str, entry: &Arc<CacheEntry<V>>) {
        let mut map = self.write();
        if map.get(key).is_some_and(|current| Arc::ptr_eq(current, entry)) {
            map.remove(key);
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CacheEntry<V>>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CacheEntry<V>>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
