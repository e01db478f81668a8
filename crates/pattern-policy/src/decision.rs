//! Pure decision tables: sanitizer verdict → classification → destination.

use pattern_core::constants::MAX_CONFIDENCE;
use pattern_core::models::{Classification, Destination, SanitizationLevel};
use pattern_core::traits::SanitizerDecision;

/// Map a sanitizer verdict to a classification.
pub fn classify(decision: SanitizerDecision, level: SanitizationLevel) -> Classification {
    match decision {
        SanitizerDecision::AllowAsIs => Classification::PublicSafe,
        SanitizerDecision::AllowAfterSanitization => match level {
            // Sanitizing this much would destroy the pattern's usefulness.
            SanitizationLevel::Heavy => Classification::Unsanitizable,
            _ => Classification::RequiresSanitization,
        },
        SanitizerDecision::RejectCredentials => Classification::Credentials,
        SanitizerDecision::RejectBusinessLogic => Classification::PrivateOnly,
        SanitizerDecision::RejectUnsanitizable => Classification::Unsanitizable,
    }
}

/// Choose where a classified pattern is written.
pub fn destination(
    classification: Classification,
    confidence: u8,
    confidence_threshold: u8,
) -> Destination {
    match classification {
        Classification::PublicSafe => Destination::PublicOnly,
        Classification::RequiresSanitization if confidence >= confidence_threshold => {
            Destination::Both
        }
        Classification::RequiresSanitization
        | Classification::PrivateOnly
        | Classification::Credentials
        | Classification::Unsanitizable => Destination::PrivateOnly,
    }
}

/// Confirmation is needed only when something is published: a sanitized
/// copy, or an as-is pattern the sanitizer was not fully sure about.
///
/// REQUIRES_SANITIZATION below the confidence threshold lands in PRIVATE_ONLY
/// and gets no confirmation. Two rules collide there ("confirm whenever the
/// classification is REQUIRES_SANITIZATION" against "no confirmation for any
/// private-only outcome"); the private-only rule wins since nothing is exposed.
pub fn requires_confirmation(
    classification: Classification,
    destination: Destination,
    confidence: u8,
) -> bool {
    if !destination.writes_public() {
        return false;
    }
    match classification {
        Classification::RequiresSanitization => true,
        Classification::PublicSafe => confidence < MAX_CONFIDENCE,
        _ => false,
    }
}
