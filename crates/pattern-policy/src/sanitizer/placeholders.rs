//! Placeholder detection: values that look sensitive but are well-known dummies.

/// Detect if a matched string looks like a well-known placeholder.
pub fn looks_like_placeholder(matched_text: &str) -> bool {
    let lower = matched_text.to_lowercase();

    // Template markers and already-applied placeholders.
    let exact_indicators = ["<", ">", "${", "{{", "[", "]"];
    if exact_indicators.iter().any(|p| lower.contains(p)) {
        return true;
    }

    if lower.contains('@') {
        let email_placeholders = [
            "example.com",
            "example.org",
            "test.com",
            "dummy.com",
            "fake.com",
            "placeholder.com",
        ];
        return email_placeholders.iter().any(|p| lower.contains(p));
    }

    let well_known = ["127.0.0.1", "0.0.0.0", "255.255.255.255", "localhost"];
    if well_known.contains(&lower.as_str()) {
        return true;
    }

    let prefixes = ["your_", "my_", "replace_me", "change_me", "xxx"];
    prefixes.iter().any(|p| lower.starts_with(p))
}
