use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use pattern_core::errors::{PatternResult, PolicyError};
use pattern_core::models::SanitizationLevel;
use pattern_core::traits::{ISanitizer, SanitizationVerdict, SanitizerDecision, VerdictMetadata};

/// Sanitizer that returns a fixed verdict and applies literal replacements.
pub struct ScriptedSanitizer {
    decision: SanitizerDecision,
    level: SanitizationLevel,
    confidence: u8,
    replacements: BTreeMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedSanitizer {
    pub fn new(decision: SanitizerDecision, level: SanitizationLevel, confidence: u8) -> Self {
        Self {
            decision,
            level,
            confidence,
            replacements: BTreeMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// ALLOW_AS_IS at full confidence.
    pub fn clean() -> Self {
        Self::new(SanitizerDecision::AllowAsIs, SanitizationLevel::None, 100)
    }

    pub fn replacing(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.insert(from.into(), to.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ISanitizer for ScriptedSanitizer {
    fn sanitize(&self, text: &str) -> PatternResult<SanitizationVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut out = text.to_string();
        let mut redaction_count = 0;
        for (from, to) in &self.replacements {
            redaction_count += out.matches(from.as_str()).count();
            out = out.replace(from.as_str(), to);
        }
        Ok(SanitizationVerdict {
            decision: self.decision,
            level: self.level,
            confidence: self.confidence,
            text: out,
            redactions: Vec::new(),
            metadata: VerdictMetadata {
                redaction_count,
                sensitive_keywords: Vec::new(),
            },
        })
    }
}

/// Sanitizer that is always unreachable.
#[derive(Debug, Default)]
pub struct FailingSanitizer;

impl ISanitizer for FailingSanitizer {
    fn sanitize(&self, _text: &str) -> PatternResult<SanitizationVerdict> {
        Err(PolicyError::SanitizerUnavailable {
            reason: "sanitizer offline".to_string(),
        }
        .into())
    }
}
