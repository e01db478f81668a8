use super::{detection_regex, DetectionRule, Severity};

// ── Cloud providers ────────────────────────────────────────────────────────
detection_regex!(RE_AWS_ACCESS_KEY, r"\bAKIA[0-9A-Z]{16}\b");
detection_regex!(
    RE_AWS_SECRET_KEY,
    r#"(?i)(?:aws_secret_access_key|aws_secret)\s*[=:]\s*['"]?[A-Za-z0-9/+=]{40}['"]?"#
);
detection_regex!(RE_GCP_API_KEY, r"\bAIza[0-9A-Za-z_-]{35}\b");
detection_regex!(RE_GCP_SERVICE_ACCOUNT, r#""type"\s*:\s*"service_account""#);

// ── Source forges ──────────────────────────────────────────────────────────
detection_regex!(RE_GITHUB_TOKEN, r"\bgh[pousr]_[A-Za-z0-9]{36}\b");
detection_regex!(RE_GITLAB_TOKEN, r"\bglpat-[A-Za-z0-9_-]{20}\b");

// ── SaaS tokens ────────────────────────────────────────────────────────────
detection_regex!(RE_SLACK_TOKEN, r"\bxox[bpas]-[A-Za-z0-9-]{10,}\b");
detection_regex!(RE_STRIPE_SECRET, r"\b[sr]k_live_[A-Za-z0-9]{24,}\b");
detection_regex!(RE_OPENAI_KEY, r"\bsk-[A-Za-z0-9]{32,}\b");

// ── JWT ────────────────────────────────────────────────────────────────────
detection_regex!(
    RE_JWT,
    r"\beyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\b"
);

// ── Private keys (PEM) ────────────────────────────────────────────────────
detection_regex!(
    RE_PRIVATE_KEY,
    r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |ENCRYPTED )?PRIVATE KEY-----"
);

// ── Generic assignments ────────────────────────────────────────────────────
detection_regex!(
    RE_PASSWORD_ASSIGN,
    r#"(?i)(?:password|passwd|pwd)\s*[=:]\s*['"][^'"]{4,}['"]"#
);
detection_regex!(
    RE_GENERIC_API_KEY,
    r#"(?i)(?:api[_-]?key|apikey)\s*[=:]\s*['"][A-Za-z0-9_\-]{16,}['"]"#
);
detection_regex!(
    RE_GENERIC_SECRET,
    r#"(?i)(?:secret|token|auth_token|access_token)\s*[=:]\s*['"][A-Za-z0-9_\-]{16,}['"]"#
);

fn secret(
    name: &'static str,
    regex: &'static std::sync::LazyLock<Option<regex::Regex>>,
    placeholder: &'static str,
    base_confidence: f64,
) -> DetectionRule {
    DetectionRule {
        name,
        category: "secret",
        regex,
        placeholder,
        base_confidence,
        severity: Severity::Credential,
    }
}

/// All secret rules, most specific first.
pub fn all_rules() -> Vec<DetectionRule> {
    vec![
        secret("private_key", &RE_PRIVATE_KEY, "[PRIVATE_KEY]", 0.99),
        secret("aws_access_key", &RE_AWS_ACCESS_KEY, "[AWS_KEY]", 0.95),
        secret("aws_secret_key", &RE_AWS_SECRET_KEY, "[AWS_SECRET]", 0.95),
        secret("gcp_api_key", &RE_GCP_API_KEY, "[GCP_KEY]", 0.95),
        secret(
            "gcp_service_account",
            &RE_GCP_SERVICE_ACCOUNT,
            "[GCP_SERVICE_ACCOUNT]",
            0.90,
        ),
        secret("github_token", &RE_GITHUB_TOKEN, "[GITHUB_TOKEN]", 0.95),
        secret("gitlab_token", &RE_GITLAB_TOKEN, "[GITLAB_TOKEN]", 0.95),
        secret("slack_token", &RE_SLACK_TOKEN, "[SLACK_TOKEN]", 0.95),
        secret("stripe_secret", &RE_STRIPE_SECRET, "[STRIPE_KEY]", 0.95),
        secret("openai_key", &RE_OPENAI_KEY, "[API_KEY]", 0.90),
        secret("jwt", &RE_JWT, "[JWT]", 0.90),
        secret("password_assign", &RE_PASSWORD_ASSIGN, "[PASSWORD]", 0.85),
        secret("generic_api_key", &RE_GENERIC_API_KEY, "[API_KEY]", 0.80),
        secret("generic_secret", &RE_GENERIC_SECRET, "[SECRET]", 0.80),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn github_token_matches_all_prefixes() {
        let re = RE_GITHUB_TOKEN.as_ref().unwrap();
        for prefix in ["ghp", "gho", "ghs", "ghr", "ghu"] {
            let token = format!("{prefix}_{}", "a".repeat(36));
            assert!(re.is_match(&token), "{prefix} not matched");
        }
    }

    #[test]
    fn short_password_literal_ignored() {
        let re = RE_PASSWORD_ASSIGN.as_ref().unwrap();
        assert!(!re.is_match(r#"password = "ab""#));
        assert!(re.is_match(r#"password = "s3cr3t!""#));
    }
}
