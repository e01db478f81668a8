//! Business-sensitivity keyword scan.

/// Phrases that mark text as company-internal logic rather than a reusable pattern.
pub const DEFAULT_BUSINESS_KEYWORDS: &[&str] = &[
    "proprietary",
    "confidential",
    "internal only",
    "trade secret",
    "do not distribute",
    "customer data",
    "pricing",
    "revenue",
    "enterprise discount",
    "under nda",
];

/// Distinct keywords present in `text`, in keyword-list order.
/// Matching is case-insensitive and respects word boundaries.
pub fn find_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| contains_word(&lower, &k.to_lowercase()))
        .cloned()
        .collect()
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
