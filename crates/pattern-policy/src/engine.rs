use std::sync::Arc;

use pattern_core::config::PolicyConfig;
use pattern_core::errors::PatternResult;
use pattern_core::models::{
    Classification, Destination, Pattern, PolicyDecision, SanitizationLevel,
};
use pattern_core::traits::{ISanitizer, SanitizationVerdict};
use pattern_observability::policy_span;
use tracing::{info, warn};

use crate::decision;
use crate::denylist::PathDenylist;
use crate::sanitizer::RuleSanitizer;

/// Sanitization policy engine.
///
/// Classifies a candidate pattern and picks its storage destination. Never
/// fails: a sanitizer error produces a private-only decision.
pub struct PolicyEngine {
    sanitizer: Arc<dyn ISanitizer>,
    denylist: PathDenylist,
    config: PolicyConfig,
}

impl PolicyEngine {
    pub fn new(sanitizer: Arc<dyn ISanitizer>, config: PolicyConfig) -> Self {
        let denylist = PathDenylist::with_extra(&config.extra_denied_paths);
        Self {
            sanitizer,
            denylist,
            config,
        }
    }

    /// Engine backed by the built-in [`RuleSanitizer`].
    pub fn with_rule_sanitizer(config: PolicyConfig) -> Self {
        Self::new(Arc::new(RuleSanitizer::new()), config)
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Classify `pattern` and decide where it may be stored.
    pub fn evaluate(&self, pattern: &Pattern) -> PolicyDecision {
        let _span = policy_span!(pattern.agent).entered();

        if let Some(path) = pattern.file_path.as_deref() {
            if let Some(rule) = self.denylist.matching_rule(path) {
                info!(path, rule, "secret path short-circuit");
                return credentials_path_decision(path, rule);
            }
        }

        let text = pattern.analysis_text();
        let verdict = match self.sanitizer.sanitize(&text) {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, "sanitizer failed, failing closed to private-only");
                return fail_closed_decision(&e.to_string());
            }
        };

        let classification = decision::classify(verdict.decision, verdict.level);
        let mut destination = decision::destination(
            classification,
            verdict.confidence,
            self.config.confidence_threshold,
        );

        let sanitized = if destination == Destination::Both {
            match self.sanitize_for_publication(pattern) {
                Ok(copy) => Some(copy),
                Err(e) => {
                    warn!(error = %e, "field sanitization failed, withholding public copy");
                    destination = Destination::PrivateOnly;
                    None
                }
            }
        } else {
            None
        };

        let requires_user_confirmation =
            decision::requires_confirmation(classification, destination, verdict.confidence);
        let (reasoning, recommendations) = explain(
            classification,
            destination,
            &verdict,
            self.config.confidence_threshold,
        );

        info!(
            ?classification,
            ?destination,
            confidence = verdict.confidence,
            confirm = requires_user_confirmation,
            "policy decision"
        );

        PolicyDecision {
            classification,
            destination,
            requires_user_confirmation,
            sanitization_required: classification == Classification::RequiresSanitization,
            confidence: verdict.confidence,
            sanitization_level: verdict.level,
            reasoning,
            recommendations,
            sanitized,
        }
    }

    /// Evaluate each pattern independently.
    pub fn evaluate_batch(&self, patterns: &[Pattern]) -> Vec<PolicyDecision> {
        patterns.iter().map(|p| self.evaluate(p)).collect()
    }

    /// Public copy of `pattern`: each free-text field redacted separately,
    /// provenance dropped. Errors when the sanitizer cannot be reached.
    pub fn sanitize_for_publication(&self, pattern: &Pattern) -> PatternResult<Pattern> {
        let redact = |text: &str| -> PatternResult<String> {
            Ok(self.sanitizer.sanitize(text)?.text)
        };
        Ok(Pattern {
            pattern: redact(&pattern.pattern)?,
            description: pattern.description.as_deref().map(redact).transpose()?,
            code: pattern.code.as_deref().map(redact).transpose()?,
            file_path: None,
            ..pattern.clone()
        })
    }
}

fn credentials_path_decision(path: &str, rule: &str) -> PolicyDecision {
    PolicyDecision {
        classification: Classification::Credentials,
        destination: Destination::PrivateOnly,
        requires_user_confirmation: false,
        sanitization_required: false,
        confidence: 0,
        sanitization_level: SanitizationLevel::None,
        reasoning: vec![
            format!("File path '{path}' matches secret-location rule '{rule}'"),
            "Secret locations cannot be made safe by redaction; content was not analyzed"
                .to_string(),
        ],
        recommendations: vec![
            "Store in the private store only".to_string(),
            "Extract the reusable technique into a pattern without secret-file provenance if it should be shared".to_string(),
        ],
        sanitized: None,
    }
}

fn fail_closed_decision(reason: &str) -> PolicyDecision {
    PolicyDecision {
        classification: Classification::PrivateOnly,
        destination: Destination::PrivateOnly,
        requires_user_confirmation: false,
        sanitization_required: false,
        confidence: 0,
        sanitization_level: SanitizationLevel::None,
        reasoning: vec![format!(
            "Sanitizer unavailable ({reason}); pattern kept private"
        )],
        recommendations: vec!["Re-evaluate once the sanitizer is reachable".to_string()],
        sanitized: None,
    }
}

fn explain(
    classification: Classification,
    destination: Destination,
    verdict: &SanitizationVerdict,
    confidence_threshold: u8,
) -> (Vec<String>, Vec<String>) {
    let mut reasoning = vec![format!(
        "Sanitizer verdict {:?} at {:?} level with {}% confidence",
        verdict.decision, verdict.level, verdict.confidence
    )];
    if verdict.metadata.redaction_count > 0 {
        reasoning.push(format!(
            "{} sensitive value(s) detected",
            verdict.metadata.redaction_count
        ));
    }
    if !verdict.metadata.sensitive_keywords.is_empty() {
        reasoning.push(format!(
            "Sensitive keywords: {}",
            verdict.metadata.sensitive_keywords.join(", ")
        ));
    }

    let mut recommendations = Vec::new();
    match classification {
        Classification::PublicSafe => {
            reasoning.push("No sensitive content found; safe to share publicly".to_string());
            if verdict.confidence < 100 {
                recommendations.push("Review before publishing".to_string());
            }
        }
        Classification::RequiresSanitization if destination == Destination::Both => {
            reasoning.push(format!(
                "Confidence meets the {confidence_threshold}% threshold; full pattern stored privately, sanitized copy published"
            ));
            recommendations.push("Review the sanitized copy before publishing".to_string());
        }
        Classification::RequiresSanitization => {
            reasoning.push(format!(
                "Confidence below the {confidence_threshold}% threshold; not safe to publish"
            ));
            recommendations
                .push("Rewrite the pattern without sensitive values to share it".to_string());
        }
        Classification::PrivateOnly => {
            reasoning.push("Contains business-specific logic".to_string());
            recommendations.push("Keep in the private store".to_string());
        }
        Classification::Credentials => {
            reasoning.push("Contains credential material".to_string());
            recommendations.push("Rotate any exposed credentials".to_string());
            recommendations.push("Keep in the private store".to_string());
        }
        Classification::Unsanitizable => {
            reasoning.push(
                "Too much of the pattern would need removal to be safe to share".to_string(),
            );
            recommendations.push("Keep in the private store".to_string());
        }
    }

    (reasoning, recommendations)
}
