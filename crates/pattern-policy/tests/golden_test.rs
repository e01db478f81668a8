//! Golden decisions for the default rule-based engine.

use pattern_core::config::PolicyConfig;
use pattern_core::models::{Classification, Destination, Pattern};
use pattern_policy::PolicyEngine;
use serde::Deserialize;
use test_fixtures::load_fixture;

#[derive(Deserialize)]
struct Expected {
    classification: Classification,
    destination: Destination,
    requires_user_confirmation: bool,
}

#[derive(Deserialize)]
struct GoldenCase {
    name: String,
    pattern: Pattern,
    expected: Expected,
}

#[test]
fn golden_decisions() {
    let cases: Vec<GoldenCase> = load_fixture("policy/golden_decisions.json");
    assert!(!cases.is_empty());
    let engine = PolicyEngine::with_rule_sanitizer(PolicyConfig::default());

    for case in &cases {
        let d = engine.evaluate(&case.pattern);
        assert_eq!(
            d.classification, case.expected.classification,
            "case '{}': reasoning {:?}",
            case.name, d.reasoning
        );
        assert_eq!(d.destination, case.expected.destination, "case '{}'", case.name);
        assert_eq!(
            d.requires_user_confirmation, case.expected.requires_user_confirmation,
            "case '{}'",
            case.name
        );
        assert_eq!(
            d.sanitized.is_some(),
            d.destination == Destination::Both,
            "case '{}'",
            case.name
        );
    }
}

#[test]
fn golden_decisions_serialize_with_wire_names() {
    let engine = PolicyEngine::with_rule_sanitizer(PolicyConfig::default());
    let d = engine.evaluate(&Pattern::new("Prefer composition over inheritance.", "a", "design"));
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["classification"], "PUBLIC_SAFE");
    assert_eq!(json["destination"], "PUBLIC_ONLY");
}
