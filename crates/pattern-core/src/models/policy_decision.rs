use serde::{Deserialize, Serialize};

use crate::models::Pattern;

/// Classification of a candidate pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    PublicSafe,
    RequiresSanitization,
    PrivateOnly,
    Credentials,
    Unsanitizable,
}

/// Where a pattern gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Destination {
    PublicOnly,
    PrivateOnly,
    Both,
    None,
}

impl Destination {
    pub fn writes_public(self) -> bool {
        matches!(self, Destination::PublicOnly | Destination::Both)
    }

    pub fn writes_private(self) -> bool {
        matches!(self, Destination::PrivateOnly | Destination::Both)
    }
}

/// Degree of redaction needed before a pattern could be published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanitizationLevel {
    None,
    Light,
    Moderate,
    Heavy,
}

/// Outcome of classifying one pattern. Lives only for a single storage request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub classification: Classification,
    pub destination: Destination,
    pub requires_user_confirmation: bool,
    pub sanitization_required: bool,
    /// Sanitizer confidence (0–100). Zero when the sanitizer was skipped or failed.
    pub confidence: u8,
    pub sanitization_level: SanitizationLevel,
    pub reasoning: Vec<String>,
    pub recommendations: Vec<String>,
    /// Redacted copy to publish, present when the decision publishes
    /// a sanitized variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<Pattern>,
}
