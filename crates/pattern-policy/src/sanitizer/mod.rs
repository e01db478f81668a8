//! Default rule-based sanitizer.
//!
//! Scans text with the regex rule tables, drops placeholder-looking hits,
//! replaces the rest with placeholders, and derives a verdict from what it
//! found plus a business-sensitivity keyword scan.

pub mod keywords;
pub mod placeholders;
pub mod rules;

use pattern_core::errors::PatternResult;
use pattern_core::models::SanitizationLevel;
use pattern_core::traits::{
    ISanitizer, Redaction, SanitizationVerdict, SanitizerDecision, VerdictMetadata,
};
use tracing::debug;

use rules::{RawMatch, Severity};

/// Redacted share of the text above which it cannot be published at all.
const UNSANITIZABLE_FRACTION: f64 = 0.50;
/// LIGHT sanitization: at most this many redactions...
const LIGHT_MAX_REDACTIONS: usize = 2;
/// ...covering less than this share of the text.
const LIGHT_MAX_FRACTION: f64 = 0.10;
/// MODERATE sanitization covers less than this share; anything above is HEAVY.
const MODERATE_MAX_FRACTION: f64 = 0.30;
/// Distinct business keywords at which a text is treated as business logic.
const BUSINESS_KEYWORD_LIMIT: usize = 2;

const REDACTION_PENALTY: u8 = 5;
const KEYWORD_PENALTY_AFTER_SANITIZATION: u8 = 5;
const KEYWORD_PENALTY_AS_IS: u8 = 10;
const REJECT_CONFIDENCE: u8 = 90;

/// Regex and keyword driven [`ISanitizer`].
#[derive(Debug, Clone)]
pub struct RuleSanitizer {
    keywords: Vec<String>,
}

impl RuleSanitizer {
    pub fn new() -> Self {
        Self {
            keywords: keywords::DEFAULT_BUSINESS_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Replace the business keyword list. Keywords match case-insensitively.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(|k| k.into().to_lowercase()).collect(),
        }
    }
}

impl Default for RuleSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ISanitizer for RuleSanitizer {
    fn sanitize(&self, text: &str) -> PatternResult<SanitizationVerdict> {
        let kept: Vec<RawMatch> = rules::scan_all(text)
            .into_iter()
            .filter(|m| !placeholders::looks_like_placeholder(&text[m.start..m.end]))
            .collect();

        let sensitive_keywords = keywords::find_keywords(text, &self.keywords);
        let redactions: Vec<Redaction> = kept
            .iter()
            .map(|m| Redaction {
                category: format!("{}:{}", m.category, m.rule_name),
                placeholder: m.placeholder.to_string(),
                start: m.start,
                end: m.end,
                confidence: m.base_confidence,
            })
            .collect();
        let sanitized = apply_replacements(text, &kept);

        let redacted_chars: usize = kept.iter().map(RawMatch::len).sum();
        let fraction = if text.is_empty() {
            0.0
        } else {
            redacted_chars as f64 / text.len() as f64
        };
        let has_credential = kept.iter().any(|m| m.severity == Severity::Credential);
        let keyword_count = sensitive_keywords.len();

        let (decision, level, confidence) = if has_credential {
            let top = kept
                .iter()
                .filter(|m| m.severity == Severity::Credential)
                .map(|m| m.base_confidence)
                .fold(0.0_f64, f64::max);
            (
                SanitizerDecision::RejectCredentials,
                SanitizationLevel::Heavy,
                (top * 100.0).round() as u8,
            )
        } else if keyword_count >= BUSINESS_KEYWORD_LIMIT {
            (
                SanitizerDecision::RejectBusinessLogic,
                level_for(kept.len(), fraction),
                REJECT_CONFIDENCE,
            )
        } else if !kept.is_empty() && fraction > UNSANITIZABLE_FRACTION {
            (
                SanitizerDecision::RejectUnsanitizable,
                SanitizationLevel::Heavy,
                REJECT_CONFIDENCE,
            )
        } else if !kept.is_empty() {
            let penalty = penalty(kept.len(), REDACTION_PENALTY)
                .saturating_add(penalty(keyword_count, KEYWORD_PENALTY_AFTER_SANITIZATION));
            (
                SanitizerDecision::AllowAfterSanitization,
                level_for(kept.len(), fraction),
                100u8.saturating_sub(penalty),
            )
        } else {
            (
                SanitizerDecision::AllowAsIs,
                SanitizationLevel::None,
                100u8.saturating_sub(penalty(keyword_count, KEYWORD_PENALTY_AS_IS)),
            )
        };

        debug!(
            ?decision,
            ?level,
            confidence,
            redactions = redactions.len(),
            keywords = keyword_count,
            "rule sanitizer verdict"
        );

        Ok(SanitizationVerdict {
            decision,
            level,
            confidence,
            text: sanitized,
            metadata: VerdictMetadata {
                redaction_count: redactions.len(),
                sensitive_keywords,
            },
            redactions,
        })
    }
}

fn penalty(count: usize, per_item: u8) -> u8 {
    u8::try_from(count)
        .unwrap_or(u8::MAX)
        .saturating_mul(per_item)
}

fn level_for(redactions: usize, fraction: f64) -> SanitizationLevel {
    if redactions == 0 {
        SanitizationLevel::None
    } else if redactions <= LIGHT_MAX_REDACTIONS && fraction < LIGHT_MAX_FRACTION {
        SanitizationLevel::Light
    } else if fraction < MODERATE_MAX_FRACTION {
        SanitizationLevel::Moderate
    } else {
        SanitizationLevel::Heavy
    }
}

/// Apply placeholder replacements back to front so earlier offsets stay valid.
fn apply_replacements(text: &str, matches: &[RawMatch]) -> String {
    let mut sorted: Vec<&RawMatch> = matches.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = text.to_string();
    for m in sorted {
        if m.end <= result.len() {
            result.replace_range(m.start..m.end, m.placeholder);
        }
    }
    result
}
