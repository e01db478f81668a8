use super::{detection_regex, DetectionRule, Severity};

// ── Email ──────────────────────────────────────────────────────────────────
detection_regex!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);

// ── Phone numbers (international + US formats) ────────────────────────────
detection_regex!(
    RE_PHONE,
    r"(?:\+?1[-.\s]?)?\(\d{3}\)\s?\d{3}[-.\s]\d{4}\b|\b\d{3}[-.]\d{3}[-.]\d{4}\b"
);

// ── SSN ────────────────────────────────────────────────────────────────────
detection_regex!(RE_SSN, r"\b\d{3}-\d{2}-\d{4}\b");

// ── Credit card (Visa, MC, Amex, Discover) ─────────────────────────────────
detection_regex!(
    RE_CREDIT_CARD,
    r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b"
);

// ── IPv4 ───────────────────────────────────────────────────────────────────
detection_regex!(
    RE_IPV4,
    r"\b(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\b"
);

// ── Internal hostnames ─────────────────────────────────────────────────────
detection_regex!(
    RE_INTERNAL_HOST,
    r"(?i)\b[a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:internal|corp|intranet|lan)\b"
);

fn redactable(
    name: &'static str,
    regex: &'static std::sync::LazyLock<Option<regex::Regex>>,
    placeholder: &'static str,
    base_confidence: f64,
) -> DetectionRule {
    DetectionRule {
        name,
        category: "pii",
        regex,
        placeholder,
        base_confidence,
        severity: Severity::Redactable,
    }
}

/// All PII rules in detection order.
pub fn all_rules() -> Vec<DetectionRule> {
    vec![
        redactable("email", &RE_EMAIL, "[EMAIL]", 0.95),
        redactable("ssn", &RE_SSN, "[SSN]", 0.95),
        redactable("credit_card", &RE_CREDIT_CARD, "[CREDIT_CARD]", 0.90),
        redactable("phone", &RE_PHONE, "[PHONE]", 0.80),
        redactable("ipv4", &RE_IPV4, "[IP_ADDRESS]", 0.70),
        redactable("internal_host", &RE_INTERNAL_HOST, "[INTERNAL_HOST]", 0.75),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_formats() {
        let re = RE_PHONE.as_ref().unwrap();
        assert!(re.is_match("call (555) 123-4567 now"));
        assert!(re.is_match("call 555-123-4567 now"));
        assert!(!re.is_match("version 1.2.3"));
    }

    #[test]
    fn internal_host_requires_private_tld() {
        let re = RE_INTERNAL_HOST.as_ref().unwrap();
        assert!(re.is_match("billing.prod.internal"));
        assert!(!re.is_match("docs.rs"));
    }
}
