use serde::{Deserialize, Serialize};

use crate::constants::{PRIVATE_PRIORITY, PUBLIC_PRIORITY};
use crate::models::Pattern;

/// A ranked match returned by a pattern store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: Pattern,
    pub relevance_score: f64,
    #[serde(default)]
    pub explanation: String,
}

impl PatternMatch {
    pub fn new(pattern: Pattern, relevance_score: f64) -> Self {
        Self {
            pattern,
            relevance_score,
            explanation: String::new(),
        }
    }
}

/// Which store a routed result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Private,
    Public,
}

impl Source {
    /// Merge priority: lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            Source::Private => PRIVATE_PRIORITY,
            Source::Public => PUBLIC_PRIORITY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Private => "private",
            Source::Public => "public",
        }
    }
}

/// A store match annotated with its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedMatch {
    #[serde(flatten)]
    pub inner: PatternMatch,
    pub source: Source,
}

impl RoutedMatch {
    pub fn new(inner: PatternMatch, source: Source) -> Self {
        Self { inner, source }
    }

    pub fn priority(&self) -> u8 {
        self.source.priority()
    }

    pub fn relevance_score(&self) -> f64 {
        self.inner.relevance_score
    }

    pub fn pattern(&self) -> &Pattern {
        &self.inner.pattern
    }
}
