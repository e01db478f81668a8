//! PatternRouter: private-first reads across two stores, policy-driven writes.

use std::sync::Arc;
use std::time::Instant;

use pattern_cache::{InvalidationCriteria, RetrievalCache, SimilarTo};
use pattern_core::config::{PolicyConfig, RouterConfig};
use pattern_core::constants::ROUTER_BACKEND;
use pattern_core::errors::{PatternResult, RouterError};
use pattern_core::models::{
    Destination, Pattern, PatternMatch, PatternQuery, PolicyDecision, RoutedMatch, Source,
    StoreStats,
};
use pattern_core::traits::{IEmbeddingProvider, IPatternStore};
use pattern_observability::{router_query_span, router_store_span};
use pattern_policy::PolicyEngine;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::merge;
use crate::options::{Resolved, RouteOptions};

/// Cache of merged reads.
pub type RoutedCache = RetrievalCache<Vec<RoutedMatch>>;

/// Result of [`PatternRouter::store`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreOutcome {
    /// Canonical id: the public id when something was published, else the
    /// private id.
    pub id: String,
    pub decision: PolicyDecision,
    pub private_id: Option<String>,
    pub public_id: Option<String>,
}

/// Aggregated store and cache statistics. A store whose stats call failed
/// reports `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterStats {
    pub private: Option<StoreStats>,
    pub public: Option<StoreStats>,
    pub cache: Option<pattern_cache::CacheStats>,
}

/// Per-store outcome of one read.
enum Fetch {
    Skipped,
    Ok(Vec<PatternMatch>),
    Failed,
}

impl Fetch {
    fn succeeded(&self) -> bool {
        matches!(self, Fetch::Ok(_))
    }

    fn into_matches(self) -> Vec<PatternMatch> {
        match self {
            Fetch::Ok(m) => m,
            Fetch::Skipped | Fetch::Failed => Vec::new(),
        }
    }
}

pub struct PatternRouter {
    public: Arc<dyn IPatternStore>,
    private: Option<Arc<dyn IPatternStore>>,
    policy: PolicyEngine,
    cache: Option<Arc<RoutedCache>>,
    embedder: Option<Arc<dyn IEmbeddingProvider>>,
    config: RouterConfig,
}

impl PatternRouter {
    /// Router over a public store and an optional private store. Uses the
    /// rule-based policy engine with default settings and no cache.
    pub fn new(
        public: Arc<dyn IPatternStore>,
        private: Option<Arc<dyn IPatternStore>>,
        config: RouterConfig,
    ) -> Self {
        Self {
            public,
            private,
            policy: PolicyEngine::with_rule_sanitizer(PolicyConfig::default()),
            cache: None,
            embedder: None,
            config,
        }
    }

    pub fn with_policy(mut self, policy: PolicyEngine) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cache(mut self, cache: Arc<RoutedCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Embedder for cache similarity lookups. Ignored without a cache.
    pub fn with_embedder(mut self, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn policy(&self) -> &PolicyEngine {
        &self.policy
    }

    pub fn cache(&self) -> Option<&Arc<RoutedCache>> {
        self.cache.as_ref()
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Ranked matches for `query` with the configured options.
    pub fn query(&self, query: &PatternQuery) -> Vec<RoutedMatch> {
        self.query_with(query, &RouteOptions::default())
    }

    /// Ranked matches for `query`. Store failures are logged and treated as
    /// empty results from that store.
    pub fn query_with(&self, query: &PatternQuery, options: &RouteOptions) -> Vec<RoutedMatch> {
        let _span = router_query_span!(query.text, query.requester_id).entered();
        let opts = options.resolve(&self.config);

        let cache = self.cache.as_ref().filter(|_| opts.use_cache);
        let mut cache_slot = None;
        let mut embedding = None;
        if let Some(cache) = cache {
            let base = cache.generate_key(query);
            let key = if opts.matches_config(&self.config) {
                base
            } else {
                format!("{base}:{}", opts.fingerprint())
            };
            // Paraphrase matches stay within reads of the same shape.
            let scope = format!("{}:{}", cache.generate_scope(query), opts.fingerprint());
            embedding = self.embed(&query.text);
            let similar = embedding.as_deref().map(|e| SimilarTo::new(e, &scope));
            if let Some(hit) = cache.get(&key, similar, query.requester_id.as_deref()) {
                debug!(results = hit.len(), "read served from cache");
                return hit;
            }
            cache_slot = Some((key, scope));
        }

        let started = Instant::now();
        let (private, public) = self.fetch(query, &opts);
        let any_succeeded = private.succeeded() || public.succeeded();
        let merged = merge::merge(
            private.into_matches(),
            public.into_matches(),
            opts.deduplicate,
            opts.max_results,
        );

        if let (Some(cache), Some((key, scope))) = (cache, cache_slot) {
            cache.record_fetch_latency(started.elapsed());
            if any_succeeded {
                cache.set_scoped(
                    key,
                    scope,
                    query.clone(),
                    merged.clone(),
                    embedding,
                    ROUTER_BACKEND,
                );
            }
        }

        info!(
            results = merged.len(),
            private = merged.iter().filter(|r| r.source == Source::Private).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "routed read"
        );
        merged
    }

    /// Query both stores without serializing one behind the other.
    fn fetch(&self, query: &PatternQuery, opts: &Resolved) -> (Fetch, Fetch) {
        let private_store = self.private.as_deref().filter(|_| opts.prefer_private);
        let public_store = Some(self.public.as_ref()).filter(|_| opts.include_public);
        rayon::join(
            || fetch_one(private_store, query),
            || fetch_one(public_store, query),
        )
    }

    fn embed(&self, text: &str) -> Option<Vec<f32>> {
        let embedder = self.embedder.as_ref().filter(|e| e.is_available())?;
        match embedder.embed(text) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(provider = embedder.name(), error = %e, "query embedding failed");
                None
            }
        }
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Write `pattern` to the stores `destination` names and return the
    /// canonical id. For [`Destination::Both`] the policy engine's redacted
    /// copy is published and the full pattern kept privately; if no redacted
    /// copy can be built the pattern is stored privately only.
    pub fn store_pattern(&self, pattern: &Pattern, destination: Destination) -> PatternResult<String> {
        let _span = router_store_span!(pattern.category, destination).entered();
        let result = match destination {
            Destination::None => return Err(RouterError::NothingToStore.into()),
            Destination::PublicOnly => self.write_public(pattern),
            Destination::PrivateOnly => self.write_private(pattern),
            Destination::Both => match self.policy.sanitize_for_publication(pattern) {
                Ok(public_copy) => self
                    .write_both(&public_copy, pattern)
                    .map(|(public_id, _)| public_id),
                Err(e) => {
                    warn!(error = %e, "no sanitized copy, storing privately only");
                    self.write_private(pattern)
                }
            },
        };
        self.after_write(pattern, &result);
        result
    }

    /// Evaluate `pattern` with the policy engine, then write it per the
    /// decision. For [`Destination::Both`] the sanitized copy is published
    /// and the original kept privately.
    pub fn store(&self, pattern: &Pattern) -> PatternResult<StoreOutcome> {
        let decision = self.policy.evaluate(pattern);
        let _span = router_store_span!(pattern.category, decision.destination).entered();

        let (private_id, public_id) = match decision.destination {
            Destination::None => return Err(RouterError::NothingToStore.into()),
            Destination::PublicOnly => {
                let result = self.write_public(pattern);
                self.after_write(pattern, &result);
                (None, Some(result?))
            }
            Destination::PrivateOnly => {
                let result = self.write_private(pattern);
                self.after_write(pattern, &result);
                (Some(result?), None)
            }
            Destination::Both => match decision.sanitized.as_ref() {
                Some(public_copy) => {
                    let result = self.write_both(public_copy, pattern);
                    self.after_write(pattern, &result);
                    let (public_id, private_id) = result?;
                    (Some(private_id), Some(public_id))
                }
                None => {
                    warn!("no sanitized copy for a BOTH decision, storing privately only");
                    let result = self.write_private(pattern);
                    self.after_write(pattern, &result);
                    (Some(result?), None)
                }
            },
        };

        let id = public_id
            .clone()
            .or_else(|| private_id.clone())
            .unwrap_or_default();
        Ok(StoreOutcome {
            id,
            decision,
            private_id,
            public_id,
        })
    }

    fn write_public(&self, pattern: &Pattern) -> PatternResult<String> {
        let id = self.public.add_pattern(pattern).inspect_err(|e| {
            warn!(store = self.public.name(), error = %e, "public write failed");
        })?;
        info!(store = self.public.name(), id = %id, "pattern published");
        Ok(id)
    }

    fn write_private(&self, pattern: &Pattern) -> PatternResult<String> {
        let store = self
            .private
            .as_ref()
            .ok_or(RouterError::PrivateStoreNotConfigured)?;
        let id = store.add_pattern(pattern).inspect_err(|e| {
            warn!(store = store.name(), error = %e, "private write failed");
        })?;
        info!(store = store.name(), id = %id, "pattern stored privately");
        Ok(id)
    }

    /// Public first, then private independently. Nothing is rolled back.
    /// Returns `(public_id, private_id)`.
    fn write_both(
        &self,
        public_copy: &Pattern,
        full: &Pattern,
    ) -> PatternResult<(String, String)> {
        let public = self.write_public(public_copy);
        let private = self.write_private(full);
        match (public, private) {
            (Ok(public_id), Ok(private_id)) => Ok((public_id, private_id)),
            (Ok(public_id), Err(e)) => Err(RouterError::PartialWrite {
                succeeded: Source::Public,
                failed: Source::Private,
                id: public_id,
                reason: e.to_string(),
            }
            .into()),
            (Err(e), Ok(private_id)) => Err(RouterError::PartialWrite {
                succeeded: Source::Private,
                failed: Source::Public,
                id: private_id,
                reason: e.to_string(),
            }
            .into()),
            (Err(e), Err(_)) => Err(e),
        }
    }

    /// Drop cached reads a write may have made stale. Runs when anything was
    /// written, including one side of a partial write.
    fn after_write<T>(&self, pattern: &Pattern, result: &PatternResult<T>) {
        let wrote = match result {
            Ok(_) => true,
            Err(e) => matches!(
                e,
                pattern_core::errors::PatternError::Router(RouterError::PartialWrite { .. })
            ),
        };
        if !wrote || !self.config.invalidate_on_write {
            return;
        }
        let Some(cache) = &self.cache else {
            return;
        };
        let removed = if pattern.tags.is_empty() {
            cache.clear()
        } else {
            cache.invalidate(
                &InvalidationCriteria::by_tags(pattern.tags.iter().cloned()).including_untagged(),
            )
        };
        debug!(removed, "cached reads invalidated after write");
    }

    // ── Stats ─────────────────────────────────────────────────────────────

    pub fn stats(&self) -> RouterStats {
        let private = self.private.as_deref().and_then(store_stats);
        let public = store_stats(self.public.as_ref());
        RouterStats {
            private,
            public,
            cache: self.cache.as_ref().map(|c| c.stats()),
        }
    }
}

fn fetch_one(store: Option<&dyn IPatternStore>, query: &PatternQuery) -> Fetch {
    let Some(store) = store else {
        return Fetch::Skipped;
    };
    match store.query(query) {
        Ok(matches) => {
            debug!(store = store.name(), results = matches.len(), "store query");
            Fetch::Ok(matches)
        }
        Err(e) => {
            warn!(store = store.name(), error = %e, "store query failed, continuing without it");
            Fetch::Failed
        }
    }
}

fn store_stats(store: &dyn IPatternStore) -> Option<StoreStats> {
    store
        .stats()
        .inspect_err(|e| warn!(store = store.name(), error = %e, "store stats failed"))
        .ok()
}
