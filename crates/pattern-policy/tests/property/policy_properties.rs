use std::sync::Arc;

use pattern_core::config::PolicyConfig;
use pattern_core::models::{Classification, Destination, Pattern, SanitizationLevel};
use pattern_core::traits::SanitizerDecision;
use pattern_policy::PolicyEngine;
use proptest::prelude::*;
use test_fixtures::ScriptedSanitizer;

fn any_decision() -> impl Strategy<Value = SanitizerDecision> {
    prop_oneof![
        Just(SanitizerDecision::AllowAsIs),
        Just(SanitizerDecision::AllowAfterSanitization),
        Just(SanitizerDecision::RejectCredentials),
        Just(SanitizerDecision::RejectBusinessLogic),
        Just(SanitizerDecision::RejectUnsanitizable),
    ]
}

fn any_level() -> impl Strategy<Value = SanitizationLevel> {
    prop_oneof![
        Just(SanitizationLevel::None),
        Just(SanitizationLevel::Light),
        Just(SanitizationLevel::Moderate),
        Just(SanitizationLevel::Heavy),
    ]
}

fn any_secret_path() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|d| format!("{d}/.github/workflows/ci.yml")),
        "[a-z]{1,8}".prop_map(|d| format!("{d}/.env")),
        "[a-z]{1,8}".prop_map(|n| format!("keys/{n}.pem")),
        "[a-z]{1,8}".prop_map(|d| format!("{d}/secrets/app.json")),
    ]
}

proptest! {
    #[test]
    fn secret_path_always_credentials(
        path in any_secret_path(),
        decision in any_decision(),
        level in any_level(),
        confidence in 0u8..=100,
    ) {
        let engine = PolicyEngine::new(
            Arc::new(ScriptedSanitizer::new(decision, level, confidence)),
            PolicyConfig::default(),
        );
        let d = engine.evaluate(&Pattern::new("text", "a", "c").with_file_path(path));
        prop_assert_eq!(d.classification, Classification::Credentials);
        prop_assert_eq!(d.destination, Destination::PrivateOnly);
        prop_assert!(!d.requires_user_confirmation);
    }

    #[test]
    fn destination_invariants_hold(
        decision in any_decision(),
        level in any_level(),
        confidence in 0u8..=100,
        threshold in 0u8..=100,
    ) {
        let engine = PolicyEngine::new(
            Arc::new(ScriptedSanitizer::new(decision, level, confidence)),
            PolicyConfig { confidence_threshold: threshold, ..Default::default() },
        );
        let d = engine.evaluate(&Pattern::new("text", "a", "c"));

        if d.destination == Destination::PublicOnly {
            prop_assert_eq!(d.classification, Classification::PublicSafe);
        }
        if d.destination == Destination::Both {
            prop_assert_eq!(d.classification, Classification::RequiresSanitization);
            prop_assert!(d.confidence >= threshold);
            prop_assert!(d.sanitized.is_some());
        }
        if !d.destination.writes_public() {
            prop_assert!(!d.requires_user_confirmation);
        }
        prop_assert!(d.destination != Destination::None);
    }

    #[test]
    fn rule_sanitizer_never_publishes_raw_github_token(suffix in "[A-Za-z0-9]{36}") {
        let token = format!("ghp_{suffix}");
        let engine = PolicyEngine::with_rule_sanitizer(PolicyConfig::default());
        let d = engine.evaluate(&Pattern::new(format!("auth with {token}"), "a", "c"));
        prop_assert_eq!(d.classification, Classification::Credentials);
        prop_assert!(!d.destination.writes_public());
    }
}
