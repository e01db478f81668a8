use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A unit of reusable knowledge submitted for classification and storage.
///
/// Immutable from the routing layer's perspective once submitted.
/// `effectiveness` and `time_saved` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    /// Primary free-text body.
    pub pattern: String,
    pub description: Option<String>,
    pub code: Option<String>,
    /// Originating role id.
    pub agent: String,
    pub category: String,
    /// 0.0–1.0.
    pub effectiveness: Option<f64>,
    pub time_saved: Option<f64>,
    pub tags: BTreeSet<String>,
    /// Provenance. Drives the secret-path short-circuit.
    pub file_path: Option<String>,
}

impl Pattern {
    pub fn new(
        pattern: impl Into<String>,
        agent: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            agent: agent.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Concatenate the free-text fields into a single analysis string.
    /// Missing fields are skipped.
    pub fn analysis_text(&self) -> String {
        [
            Some(self.pattern.as_str()),
            self.description.as_deref(),
            self.code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}
