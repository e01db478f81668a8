use std::sync::Arc;
use std::time::Duration;

use pattern_cache::{ManualClock, RetrievalCache};
use pattern_core::config::{CacheConfig, PolicyConfig, RouterConfig};
use pattern_core::errors::{PatternError, RouterError};
use pattern_core::models::{Destination, Pattern, PatternQuery, SanitizationLevel, Source};
use pattern_core::traits::{IPatternStore, SanitizerDecision};
use pattern_policy::PolicyEngine;
use pattern_router::{PatternRouter, RouteOptions, RoutedCache};
use test_fixtures::{BagOfWordsEmbedder, FailingSanitizer, InMemoryPatternStore, ScriptedSanitizer};

fn p(text: &str, category: &str) -> Pattern {
    Pattern::new(text, "backend", category)
}

fn auth_stores() -> (Arc<InMemoryPatternStore>, Arc<InMemoryPatternStore>) {
    let private = InMemoryPatternStore::with_patterns(
        "private",
        [
            p("Internal auth gateway signs JWT with rotating keys", "auth"),
            p("JWT auth claims mapped onto tenant roles", "auth"),
        ],
    );
    let public = InMemoryPatternStore::with_patterns(
        "public",
        [
            p("Validate JWT expiry before trusting auth claims", "auth"),
            p("Short lived JWT access tokens with refresh auth flow", "auth"),
            p("Store JWT in httponly cookies for browser auth", "auth"),
            p("Paginate large result sets with cursors", "api"),
        ],
    );
    (Arc::new(private), Arc::new(public))
}

fn router(
    private: &Arc<InMemoryPatternStore>,
    public: &Arc<InMemoryPatternStore>,
) -> PatternRouter {
    let private: Arc<dyn IPatternStore> = private.clone();
    PatternRouter::new(public.clone(), Some(private), RouterConfig::default())
}

fn cache() -> (Arc<RoutedCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    (
        Arc::new(RetrievalCache::with_clock(&CacheConfig::default(), clock.clone())),
        clock,
    )
}

// ── Reads ─────────────────────────────────────────────────────────────────

#[test]
fn auth_jwt_returns_private_first() {
    let (private, public) = auth_stores();
    let results = router(&private, &public).query(&PatternQuery::new("auth JWT"));

    assert_eq!(results.len(), 5);
    assert!(results[..2].iter().all(|r| r.source == Source::Private));
    assert!(results[2..].iter().all(|r| r.source == Source::Public));
    assert!(results.iter().all(|r| r.priority() == r.source.priority()));
}

#[test]
fn collision_keeps_private_match() {
    let private = Arc::new(InMemoryPatternStore::with_patterns(
        "private",
        [p("Retry idempotent requests with jittered backoff", "resilience")],
    ));
    let public = Arc::new(InMemoryPatternStore::with_patterns(
        "public",
        [p("retry IDEMPOTENT requests with jittered backoff", "resilience")],
    ));
    let results = router(&private, &public).query(&PatternQuery::new("retry backoff"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, Source::Private);
}

#[test]
fn max_results_truncates() {
    let (private, public) = auth_stores();
    let r = router(&private, &public);
    assert_eq!(r.query_with(&PatternQuery::new("auth JWT"), &RouteOptions::new().max_results(3)).len(), 3);
}

#[test]
fn excluding_public_reads_private_only() {
    let (private, public) = auth_stores();
    let results = router(&private, &public).query_with(
        &PatternQuery::new("auth JWT"),
        &RouteOptions::new().include_public(false),
    );
    assert_eq!(results.len(), 2);
    assert_eq!(public.query_calls(), 0);
}

#[test]
fn failing_store_degrades_to_other_results() {
    let (private, public) = auth_stores();
    private.set_fail_queries(true);
    let results = router(&private, &public).query(&PatternQuery::new("auth JWT"));
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.source == Source::Public));
}

#[test]
fn both_stores_failing_yields_empty_and_is_not_cached() {
    let (private, public) = auth_stores();
    private.set_fail_queries(true);
    public.set_fail_queries(true);
    let (cache, _) = cache();
    let r = router(&private, &public).with_cache(cache.clone());
    assert!(r.query(&PatternQuery::new("auth JWT")).is_empty());
    assert!(cache.is_empty());
}

#[test]
fn missing_private_store_reads_public() {
    let (_, public) = auth_stores();
    let r = PatternRouter::new(public.clone(), None, RouterConfig::default());
    assert_eq!(r.query(&PatternQuery::new("auth JWT")).len(), 3);
}

// ── Cache integration ─────────────────────────────────────────────────────

#[test]
fn second_identical_query_is_served_from_cache() {
    let (private, public) = auth_stores();
    let (cache, clock) = cache();
    let r = router(&private, &public).with_cache(cache.clone());
    let q = PatternQuery::new("auth JWT");

    let first = r.query(&q);
    let second = r.query(&q);
    assert_eq!(first, second);
    assert_eq!(private.query_calls(), 1);
    assert_eq!(public.query_calls(), 1);
    assert_eq!(cache.entry_snapshot(&cache.generate_key(&q)).unwrap().backend, "router");

    clock.advance(Duration::from_secs(601));
    r.query(&q);
    assert_eq!(public.query_calls(), 2);
}

#[test]
fn paraphrase_hits_through_embedder() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public)
        .with_cache(cache.clone())
        .with_embedder(Arc::new(BagOfWordsEmbedder::default()));

    r.query(&PatternQuery::new("auth JWT"));
    r.query(&PatternQuery::new("JWT auth"));
    assert_eq!(public.query_calls(), 1);
    assert_eq!(cache.stats().similarity_hits, 1);
}

#[test]
fn paraphrase_never_serves_a_read_of_another_shape() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public)
        .with_cache(cache.clone())
        .with_embedder(Arc::new(BagOfWordsEmbedder::default()));

    assert_eq!(r.query(&PatternQuery::new("auth JWT")).len(), 5);

    let q = PatternQuery::new("JWT auth");
    let bounded = r.query_with(&q, &RouteOptions::new().max_results(2));
    assert_eq!(bounded.len(), 2);

    let private_only = r.query_with(&q, &RouteOptions::new().include_public(false));
    assert_eq!(private_only.len(), 2);
    assert!(private_only.iter().all(|m| m.source == Source::Private));
    assert_eq!(public.query_calls(), 2);
    assert_eq!(cache.stats().similarity_hits, 0);

    // Same shape again: the bounded read is reused.
    let again = r.query_with(
        &PatternQuery::new("auth JWT"),
        &RouteOptions::new().max_results(2),
    );
    assert_eq!(again, bounded);
    assert_eq!(public.query_calls(), 2);
}

#[test]
fn paraphrase_never_crosses_requesters_or_filters() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public)
        .with_cache(cache.clone())
        .with_embedder(Arc::new(BagOfWordsEmbedder::default()));

    r.query(&PatternQuery::new("auth JWT").with_requester("alice"));
    r.query(&PatternQuery::new("JWT auth").with_requester("bob"));
    r.query(&PatternQuery::new("JWT auth").with_requester("alice").with_tags(["auth"]));
    assert_eq!(public.query_calls(), 3);
    assert_eq!(cache.stats().similarity_hits, 0);

    r.query(&PatternQuery::new("JWT auth").with_requester("alice"));
    assert_eq!(public.query_calls(), 3);
    assert_eq!(cache.stats().similarity_hits, 1);
}

#[test]
fn cache_bypass_option_queries_stores() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public).with_cache(cache);
    let q = PatternQuery::new("auth JWT");
    r.query(&q);
    r.query_with(&q, &RouteOptions::new().use_cache(false));
    assert_eq!(public.query_calls(), 2);
}

#[test]
fn different_options_do_not_share_cache_entries() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public).with_cache(cache);
    let q = PatternQuery::new("auth JWT");
    assert_eq!(r.query(&q).len(), 5);
    assert_eq!(r.query_with(&q, &RouteOptions::new().max_results(2)).len(), 2);
    assert_eq!(public.query_calls(), 2);
}

#[test]
fn write_invalidates_overlapping_cached_reads() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public).with_cache(cache.clone());

    let tagged = PatternQuery::new("auth JWT").with_tags(["auth"]);
    let other = PatternQuery::new("paginate cursors").with_tags(["api"]);
    r.query(&tagged);
    r.query(&other);
    assert_eq!(cache.len(), 2);

    r.store_pattern(
        &p("Pin JWT signing algorithm", "auth").with_tags(["auth"]),
        Destination::PublicOnly,
    )
    .unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.contains_key(&cache.generate_key(&other)));

    r.store_pattern(&p("Untagged tip", "misc"), Destination::PublicOnly)
        .unwrap();
    assert!(cache.is_empty());
}

// ── Writes ────────────────────────────────────────────────────────────────

#[test]
fn store_pattern_routes_by_destination() {
    let (private, public) = auth_stores();
    let r = router(&private, &public);
    let pattern = p("Use feature flags for risky rollouts", "release");

    r.store_pattern(&pattern, Destination::PublicOnly).unwrap();
    assert_eq!((public.add_calls(), private.add_calls()), (1, 0));

    r.store_pattern(&pattern, Destination::PrivateOnly).unwrap();
    assert_eq!((public.add_calls(), private.add_calls()), (1, 1));

    let id = r.store_pattern(&pattern, Destination::Both).unwrap();
    assert_eq!((public.add_calls(), private.add_calls()), (2, 2));
    assert!(public.get(&id).is_some());
}

#[test]
fn store_pattern_both_publishes_redacted_copy() {
    let (private, public) = auth_stores();
    let r = router(&private, &public);
    let pattern = p(
        "Page ops.lead@acme-corp.io when the export job fails twice",
        "operations",
    );

    let id = r.store_pattern(&pattern, Destination::Both).unwrap();
    let published = public.get(&id).unwrap();
    assert!(!published.pattern.contains("ops.lead@acme-corp.io"));
    assert!(published.pattern.contains("export job fails"));
    assert!(published.file_path.is_none());

    let kept = private.patterns();
    assert_eq!(kept.len(), 3);
    assert_eq!(kept[2], pattern);
}

#[test]
fn store_pattern_both_without_sanitizer_stays_private() {
    let (private, public) = auth_stores();
    let r = router(&private, &public).with_policy(PolicyEngine::new(
        Arc::new(FailingSanitizer),
        PolicyConfig::default(),
    ));
    let pattern = p("Page ops.lead@acme-corp.io on failure", "operations");

    let id = r.store_pattern(&pattern, Destination::Both).unwrap();
    assert_eq!(public.add_calls(), 0);
    assert_eq!(private.get(&id), Some(pattern));
}

#[test]
fn destination_none_is_an_error() {
    let (private, public) = auth_stores();
    let err = router(&private, &public)
        .store_pattern(&p("x", "c"), Destination::None)
        .unwrap_err();
    assert!(matches!(err, PatternError::Router(RouterError::NothingToStore)));
    assert_eq!(public.add_calls() + private.add_calls(), 0);
}

#[test]
fn private_write_without_private_store_errors() {
    let (_, public) = auth_stores();
    let r = PatternRouter::new(public, None, RouterConfig::default());
    let err = r.store_pattern(&p("x", "c"), Destination::PrivateOnly).unwrap_err();
    assert!(matches!(
        err,
        PatternError::Router(RouterError::PrivateStoreNotConfigured)
    ));
}

#[test]
fn both_with_private_failure_is_partial_and_not_rolled_back() {
    let (private, public) = auth_stores();
    private.set_fail_writes(true);
    let before = public.len();
    let err = router(&private, &public)
        .store_pattern(&p("Cache DNS lookups", "net"), Destination::Both)
        .unwrap_err();
    match err {
        PatternError::Router(RouterError::PartialWrite {
            succeeded,
            failed,
            id,
            ..
        }) => {
            assert_eq!(succeeded, Source::Public);
            assert_eq!(failed, Source::Private);
            assert!(public.get(&id).is_some());
        }
        other => panic!("expected partial write, got {other:?}"),
    }
    assert_eq!(public.len(), before + 1);
}

#[test]
fn both_with_public_failure_still_writes_private() {
    let (private, public) = auth_stores();
    public.set_fail_writes(true);
    let err = router(&private, &public)
        .store_pattern(&p("Cache DNS lookups", "net"), Destination::Both)
        .unwrap_err();
    assert!(matches!(
        err,
        PatternError::Router(RouterError::PartialWrite {
            succeeded: Source::Private,
            ..
        })
    ));
    assert_eq!(private.add_calls(), 1);
}

#[test]
fn both_failing_propagates_store_error() {
    let (private, public) = auth_stores();
    private.set_fail_writes(true);
    public.set_fail_writes(true);
    let err = router(&private, &public)
        .store_pattern(&p("x", "c"), Destination::Both)
        .unwrap_err();
    assert!(matches!(err, PatternError::Store(_)));
}

// ── Policy-driven store ───────────────────────────────────────────────────

#[test]
fn store_publishes_sanitized_copy_and_keeps_original_private() {
    let (private, public) = auth_stores();
    let policy = PolicyEngine::new(
        Arc::new(
            ScriptedSanitizer::new(
                SanitizerDecision::AllowAfterSanitization,
                SanitizationLevel::Light,
                90,
            )
            .replacing("billing.prod.internal", "[INTERNAL_HOST]"),
        ),
        PolicyConfig::default(),
    );
    let r = router(&private, &public).with_policy(policy);
    let pattern = p("Retry billing.prod.internal with jitter", "resilience");

    let outcome = r.store(&pattern).unwrap();
    assert_eq!(outcome.decision.destination, Destination::Both);
    assert_eq!(Some(outcome.id.clone()), outcome.public_id);

    let published = public.get(outcome.public_id.as_deref().unwrap()).unwrap();
    assert_eq!(published.pattern, "Retry [INTERNAL_HOST] with jitter");
    let kept = private.get(outcome.private_id.as_deref().unwrap()).unwrap();
    assert_eq!(kept, pattern);
}

#[test]
fn store_with_secret_path_stays_private() {
    let (private, public) = auth_stores();
    let pattern = p("deploy steps", "ci").with_file_path(".github/workflows/deploy.yml");
    let outcome = router(&private, &public).store(&pattern).unwrap();
    assert_eq!(outcome.decision.destination, Destination::PrivateOnly);
    assert_eq!(outcome.public_id, None);
    assert_eq!(Some(outcome.id), outcome.private_id);
    assert_eq!(public.add_calls(), 0);
}

#[test]
fn store_generic_pattern_publishes() {
    let (private, public) = auth_stores();
    let outcome = router(&private, &public)
        .store(&p("Prefer composition over inheritance for widgets", "design"))
        .unwrap();
    assert_eq!(outcome.decision.destination, Destination::PublicOnly);
    assert_eq!(private.add_calls(), 0);
    assert_eq!(public.add_calls(), 1);
}

// ── Stats ─────────────────────────────────────────────────────────────────

#[test]
fn stats_aggregate_stores_and_cache() {
    let (private, public) = auth_stores();
    let (cache, _) = cache();
    let r = router(&private, &public).with_cache(cache);
    r.query(&PatternQuery::new("auth JWT"));
    let stats = r.stats();
    assert_eq!(stats.private.unwrap().total_patterns, 2);
    assert_eq!(stats.public.unwrap().total_patterns, 4);
    let cache_stats = stats.cache.unwrap();
    assert_eq!(cache_stats.entries, 1);
    assert_eq!(cache_stats.misses, 1);
}

#[test]
fn outcome_and_stats_serialize_with_wire_names() {
    let (private, public) = auth_stores();
    let r = router(&private, &public);
    let outcome = r
        .store(&p("Prefer composition over inheritance for widgets", "design"))
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["decision"]["destination"], "PUBLIC_ONLY");
    assert_eq!(json["public_id"], serde_json::json!(outcome.id));
    assert!(json["private_id"].is_null());

    let stats = serde_json::to_value(r.stats()).unwrap();
    assert_eq!(stats["private"]["total_patterns"], 2);
    assert_eq!(stats["public"]["total_patterns"], 5);
    assert!(stats["cache"].is_null());
}
