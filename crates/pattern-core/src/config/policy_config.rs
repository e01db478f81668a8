use serde::{Deserialize, Serialize};

use super::defaults;

/// Sanitization policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Minimum sanitizer confidence for publishing a sanitized copy (BOTH).
    pub confidence_threshold: u8,
    /// Additional path fragments treated as secret locations, matched
    /// case-insensitively as literal substrings.
    pub extra_denied_paths: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::DEFAULT_CONFIDENCE_THRESHOLD,
            extra_denied_paths: Vec::new(),
        }
    }
}
