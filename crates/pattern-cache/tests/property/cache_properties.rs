use std::sync::Arc;
use std::time::Duration;

use pattern_cache::{ManualClock, RetrievalCache, Tier};
use pattern_core::config::CacheConfig;
use pattern_core::models::PatternQuery;
use proptest::prelude::*;

fn cache(max: usize) -> (RetrievalCache<u64>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let config = CacheConfig {
        max_cache_size: max,
        ..Default::default()
    };
    (RetrievalCache::with_clock(&config, clock.clone()), clock)
}

proptest! {
    #[test]
    fn set_then_get_returns_value(key in "[a-z0-9]{1,16}", value in any::<u64>()) {
        let (c, _) = cache(16);
        c.set(key.clone(), PatternQuery::new(&key), value, None, "router");
        prop_assert_eq!(c.get(&key, None, None), Some(value));
    }

    #[test]
    fn promotion_is_monotonic(hits in 1usize..40) {
        let (c, clock) = cache(4);
        c.set("k", PatternQuery::new("k"), 0, None, "router");
        let mut last = Tier::Cold;
        for _ in 0..hits {
            clock.advance(Duration::from_secs(1));
            prop_assert!(c.get("k", None, None).is_some());
            let tier = c.entry_snapshot("k").unwrap().tier;
            prop_assert!(tier >= last);
            last = tier;
        }
        if hits >= 10 {
            prop_assert_eq!(last, Tier::Hot);
        }
    }

    #[test]
    fn replacing_a_live_key_never_demotes(hits in 0usize..25, value in any::<u64>()) {
        let (c, clock) = cache(4);
        c.set("k", PatternQuery::new("k"), 0, None, "router");
        for _ in 0..hits {
            clock.advance(Duration::from_secs(1));
            prop_assert!(c.get("k", None, None).is_some());
        }
        let before = c.entry_snapshot("k").unwrap();

        c.set("k", PatternQuery::new("k"), value, None, "router");
        let after = c.entry_snapshot("k").unwrap();
        prop_assert!(after.tier >= before.tier);
        prop_assert_eq!(after.access_count, before.access_count);
        prop_assert_eq!(c.get("k", None, None), Some(value));
    }

    #[test]
    fn eviction_removes_exactly_the_lru_entry(
        n in 2usize..12,
        touched in proptest::collection::vec(any::<prop::sample::Index>(), 0..20),
    ) {
        let (c, clock) = cache(n);
        let keys: Vec<String> = (0..n).map(|i| format!("k{i}")).collect();
        for k in &keys {
            c.set(k.clone(), PatternQuery::new(k), 0, None, "router");
            clock.advance(Duration::from_secs(1));
        }
        for idx in &touched {
            let k = &keys[idx.index(n)];
            prop_assert!(c.get(k, None, None).is_some());
            clock.advance(Duration::from_secs(1));
        }

        let lru = keys
            .iter()
            .min_by_key(|k| c.entry_snapshot(k).unwrap().last_accessed_ms)
            .unwrap()
            .clone();
        c.set("new", PatternQuery::new("new"), 1, None, "router");

        prop_assert_eq!(c.len(), n);
        prop_assert!(!c.contains_key(&lru));
        for k in keys.iter().filter(|k| **k != lru) {
            prop_assert!(c.contains_key(k));
        }
    }
}
