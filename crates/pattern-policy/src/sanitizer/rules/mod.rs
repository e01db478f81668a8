//! Detection rule tables.
//!
//! Each rule is a lazily compiled regex. A rule whose regex fails to compile
//! is skipped and never matches.

pub mod connection_strings;
pub mod pii;
pub mod secrets;

use regex::Regex;
use std::sync::LazyLock;

/// Whether a match can be redacted away or makes the text unpublishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Live credential material. Rejects the whole text.
    Credential,
    /// Personal or infrastructure data that a placeholder can replace.
    Redactable,
}

/// A compiled detection rule.
pub struct DetectionRule {
    pub name: &'static str,
    pub category: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
    pub placeholder: &'static str,
    pub base_confidence: f64,
    pub severity: Severity,
}

macro_rules! detection_regex {
    ($name:ident, $regex_str:expr) => {
        pub static $name: std::sync::LazyLock<Option<regex::Regex>> =
            std::sync::LazyLock::new(|| regex::Regex::new($regex_str).ok());
    };
}
pub(crate) use detection_regex;

/// A rule hit before placeholder filtering.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub category: &'static str,
    pub rule_name: &'static str,
    pub placeholder: &'static str,
    pub start: usize,
    pub end: usize,
    pub base_confidence: f64,
    pub severity: Severity,
}

impl RawMatch {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Every rule in scan order: connection strings, then secrets, then PII.
/// Connection strings come first because `user:pass@host` also looks like an email.
pub fn all_rules() -> Vec<DetectionRule> {
    let mut rules = connection_strings::all_rules();
    rules.extend(secrets::all_rules());
    rules.extend(pii::all_rules());
    rules
}

/// Run every rule against `text`, returning non-overlapping matches sorted
/// by start position descending so replacements can run back to front.
pub fn scan_all(text: &str) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    for rule in all_rules() {
        let Some(re) = rule.regex.as_ref() else {
            continue;
        };
        for m in re.find_iter(text) {
            matches.push(RawMatch {
                category: rule.category,
                rule_name: rule.name,
                placeholder: rule.placeholder,
                start: m.start(),
                end: m.end(),
                base_confidence: rule.base_confidence,
                severity: rule.severity,
            });
        }
    }

    matches.sort_by(|a, b| b.start.cmp(&a.start).then(b.len().cmp(&a.len())));
    dedup_overlapping(&mut matches);
    matches
}

/// Remove overlapping matches, keeping the longer one, or the
/// higher-confidence one when lengths are equal.
fn dedup_overlapping(matches: &mut Vec<RawMatch>) {
    let mut i = 0;
    while i + 1 < matches.len() {
        let (current, next) = (&matches[i], &matches[i + 1]);
        // Sorted desc by start, so next.start <= current.start.
        if next.end > current.start {
            let next_wins = next.len() > current.len()
                || (next.len() == current.len() && next.base_confidence > current.base_confidence);
            if next_wins {
                matches.remove(i);
                i = i.saturating_sub(1);
            } else {
                matches.remove(i + 1);
            }
        } else {
            i += 1;
        }
    }
}
