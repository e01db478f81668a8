//! Merge of per-store results: dedup, rank, truncate.

use std::collections::HashSet;

use pattern_core::constants::{DEDUP_KEY_WORDS, DEDUP_MIN_WORD_LEN};
use pattern_core::models::{Pattern, PatternMatch, RoutedMatch, Source};

/// Dedup key: the first significant words of `pattern` + `category`,
/// lower-cased. Words of [`DEDUP_MIN_WORD_LEN`] characters or fewer are
/// skipped.
pub fn dedup_key(pattern: &Pattern) -> String {
    format!("{} {}", pattern.pattern, pattern.category)
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > DEDUP_MIN_WORD_LEN)
        .take(DEDUP_KEY_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep the first result per dedup key, in collection order. Results whose
/// key is empty are never treated as duplicates.
pub fn dedup(results: Vec<RoutedMatch>) -> Vec<RoutedMatch> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| {
            let key = dedup_key(r.pattern());
            key.is_empty() || seen.insert(key)
        })
        .collect()
}

/// Priority ascending, then relevance descending. Stable.
pub fn rank(results: &mut [RoutedMatch]) {
    results.sort_by(|a, b| {
        a.priority()
            .cmp(&b.priority())
            .then_with(|| b.relevance_score().total_cmp(&a.relevance_score()))
    });
}

/// Tag, combine (private first), optionally dedup, rank, and truncate.
pub fn merge(
    private: Vec<PatternMatch>,
    public: Vec<PatternMatch>,
    deduplicate: bool,
    max_results: usize,
) -> Vec<RoutedMatch> {
    let mut combined: Vec<RoutedMatch> = private
        .into_iter()
        .map(|m| RoutedMatch::new(m, Source::Private))
        .chain(public.into_iter().map(|m| RoutedMatch::new(m, Source::Public)))
        .collect();
    if deduplicate {
        combined = dedup(combined);
    }
    rank(&mut combined);
    combined.truncate(max_results);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(text: &str, category: &str, score: f64) -> PatternMatch {
        PatternMatch::new(Pattern::new(text, "agent", category), score)
    }

    #[test]
    fn dedup_key_skips_short_words_and_keeps_five() {
        let p = Pattern::new(
            "Use the JWT middleware to validate token expiry early",
            "a",
            "Auth",
        );
        assert_eq!(dedup_key(&p), "middleware validate token expiry early");
    }

    #[test]
    fn dedup_key_includes_category() {
        let p = Pattern::new("Cache JWKS keys", "a", "security");
        assert_eq!(dedup_key(&p), "cache jwks keys security");
    }

    #[test]
    fn private_wins_collision() {
        let merged = merge(
            vec![m("Rotate refresh tokens on every use", "auth", 0.4)],
            vec![m("rotate REFRESH tokens on every use", "auth", 0.99)],
            true,
            10,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::Private);
    }

    #[test]
    fn no_dedup_keeps_both() {
        let merged = merge(
            vec![m("Rotate refresh tokens", "auth", 0.4)],
            vec![m("Rotate refresh tokens", "auth", 0.9)],
            false,
            10,
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn rank_orders_private_first_then_score() {
        let merged = merge(
            vec![m("alpha private low", "c", 0.2), m("bravo private high", "c", 0.8)],
            vec![m("charlie public top", "c", 0.99)],
            true,
            10,
        );
        let order: Vec<_> = merged.iter().map(|r| r.pattern().pattern.as_str()).collect();
        assert_eq!(
            order,
            vec!["bravo private high", "alpha private low", "charlie public top"]
        );
    }

    #[test]
    fn truncates_to_max_results() {
        let public = (0..20).map(|i| m(&format!("pattern number {i}"), "c", 0.5)).collect();
        assert_eq!(merge(Vec::new(), public, false, 7).len(), 7);
    }

    #[test]
    fn empty_keys_are_not_collapsed() {
        let merged = merge(
            vec![m("a b", "c", 0.5)],
            vec![m("x y", "z", 0.5)],
            true,
            10,
        );
        assert_eq!(merged.len(), 2);
    }
}
