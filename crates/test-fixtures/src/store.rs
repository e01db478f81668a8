use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use pattern_core::errors::{PatternResult, StoreError};
use pattern_core::models::{Pattern, PatternMatch, PatternQuery, StoreStats};
use pattern_core::traits::IPatternStore;

/// In-memory [`IPatternStore`] with keyword-overlap relevance.
///
/// Counts calls and can be told to fail reads or writes.
pub struct InMemoryPatternStore {
    name: String,
    patterns: RwLock<Vec<(String, Pattern)>>,
    query_calls: AtomicUsize,
    add_calls: AtomicUsize,
    fail_queries: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryPatternStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patterns: RwLock::new(Vec::new()),
            query_calls: AtomicUsize::new(0),
            add_calls: AtomicUsize::new(0),
            fail_queries: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Store pre-seeded with `patterns`. Seeding does not count as a write.
    pub fn with_patterns<I>(name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = Pattern>,
    {
        let store = Self::new(name);
        {
            let mut guard = store.patterns.write().unwrap();
            for p in patterns {
                guard.push((uuid::Uuid::new_v4().to_string(), p));
            }
        }
        store
    }

    pub fn set_fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.patterns.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored pattern, in insertion order.
    pub fn patterns(&self) -> Vec<Pattern> {
        self.patterns
            .read()
            .unwrap()
            .iter()
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Pattern> {
        self.patterns
            .read()
            .unwrap()
            .iter()
            .find(|(pid, _)| pid == id)
            .map(|(_, p)| p.clone())
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() >= 2)
        .map(|s| s.to_lowercase())
        .collect()
}

/// Fraction of query terms present in the pattern's text or tags.
fn relevance(query_terms: &HashSet<String>, pattern: &Pattern) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let mut haystack = tokenize(&pattern.analysis_text());
    haystack.extend(pattern.tags.iter().map(|t| t.to_lowercase()));
    let hits = query_terms.iter().filter(|t| haystack.contains(*t)).count();
    hits as f64 / query_terms.len() as f64
}

impl IPatternStore for InMemoryPatternStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, query: &PatternQuery) -> PatternResult<Vec<PatternMatch>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed {
                store: self.name.clone(),
                reason: "injected failure".to_string(),
            }
            .into());
        }

        let terms = tokenize(&query.text);
        let guard = self.patterns.read().unwrap();
        let mut matches: Vec<PatternMatch> = guard
            .iter()
            .filter(|(_, p)| query.tags.is_empty() || query.tags.iter().any(|t| p.tags.contains(t)))
            .filter_map(|(_, p)| {
                let score = relevance(&terms, p);
                (score > 0.0 && score >= query.min_relevance)
                    .then(|| PatternMatch::new(p.clone(), score))
            })
            .collect();
        matches.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        matches.truncate(query.limit);
        Ok(matches)
    }

    fn add_pattern(&self, pattern: &Pattern) -> PatternResult<String> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed {
                store: self.name.clone(),
                reason: "injected failure".to_string(),
            }
            .into());
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.patterns
            .write()
            .unwrap()
            .push((id.clone(), pattern.clone()));
        Ok(id)
    }

    fn stats(&self) -> PatternResult<StoreStats> {
        let mut extra = BTreeMap::new();
        extra.insert("store".to_string(), serde_json::json!(self.name));
        Ok(StoreStats {
            total_patterns: self.len(),
            extra,
        })
    }
}
