use serde::{Deserialize, Serialize};

use crate::errors::PatternResult;
use crate::models::SanitizationLevel;

/// Verdict category produced by a sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanitizerDecision {
    AllowAsIs,
    AllowAfterSanitization,
    RejectCredentials,
    RejectBusinessLogic,
    RejectUnsanitizable,
}

/// A single redaction applied during sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redaction {
    pub category: String,
    pub placeholder: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerdictMetadata {
    pub redaction_count: usize,
    pub sensitive_keywords: Vec<String>,
}

/// Structured result of sanitizing one analysis string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizationVerdict {
    pub decision: SanitizerDecision,
    pub level: SanitizationLevel,
    /// 0–100.
    pub confidence: u8,
    /// The input with every redaction replaced by its placeholder.
    pub text: String,
    pub redactions: Vec<Redaction>,
    pub metadata: VerdictMetadata,
}

/// Redaction and classification primitive consumed by the policy engine.
pub trait ISanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> PatternResult<SanitizationVerdict>;
}
