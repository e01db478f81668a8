use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// A read query, passed through to both stores and used to derive cache keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternQuery {
    pub text: String,
    /// Caller-defined query type ("search", "similar", ...).
    pub query_type: Option<String>,
    pub limit: usize,
    pub min_relevance: f64,
    pub requester_id: Option<String>,
    pub tags: Vec<String>,
    pub file_types: Vec<String>,
}

impl Default for PatternQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            query_type: None,
            limit: defaults::DEFAULT_MAX_RESULTS,
            min_relevance: 0.0,
            requester_id: None,
            tags: Vec::new(),
            file_types: Vec::new(),
        }
    }
}

impl PatternQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_requester(mut self, requester_id: impl Into<String>) -> Self {
        self.requester_id = Some(requester_id.into());
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

    pub fn with_file_types<I, S>(mut self, file_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = file_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_query_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }
}
