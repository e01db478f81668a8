use pattern_core::models::{Pattern, PatternMatch, Source};
use pattern_router::merge::{dedup_key, merge};
use proptest::prelude::*;

fn matches(max: usize) -> impl Strategy<Value = Vec<PatternMatch>> {
    proptest::collection::vec(
        ("[a-z]{2,8}( [a-z]{2,8}){0,6}", "[a-z]{3,6}", 0.0f64..1.0),
        0..max,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(text, category, score)| {
                PatternMatch::new(Pattern::new(text, "agent", category), score)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn no_public_result_precedes_a_private_one(
        private in matches(8),
        public in matches(8),
        dedup in any::<bool>(),
        max in 1usize..20,
    ) {
        let merged = merge(private, public, dedup, max);
        prop_assert!(merged.len() <= max);
        if let Some(first_public) = merged.iter().position(|r| r.source == Source::Public) {
            prop_assert!(merged[first_public..].iter().all(|r| r.source == Source::Public));
        }
        for w in merged.windows(2) {
            if w[0].source == w[1].source {
                prop_assert!(w[0].relevance_score() >= w[1].relevance_score());
            }
        }
    }

    #[test]
    fn colliding_private_match_always_wins(
        text in "[a-z]{4,8}( [a-z]{4,8}){1,5}",
        category in "[a-z]{4,6}",
        private_score in 0.0f64..1.0,
        public_score in 0.0f64..1.0,
    ) {
        let private = vec![PatternMatch::new(Pattern::new(text.clone(), "a", category.clone()), private_score)];
        let public = vec![PatternMatch::new(Pattern::new(text.to_uppercase(), "b", category), public_score)];
        let merged = merge(private, public, true, 10);
        prop_assert_eq!(merged.len(), 1);
        prop_assert_eq!(merged[0].source, Source::Private);
    }

    #[test]
    fn dedup_leaves_unique_nonempty_keys(private in matches(10), public in matches(10)) {
        let merged = merge(private, public, true, 100);
        let mut keys: Vec<String> = merged
            .iter()
            .map(|r| dedup_key(r.pattern()))
            .filter(|k| !k.is_empty())
            .collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }
}
