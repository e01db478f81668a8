/// Sanitizer collaborator errors. The policy engine never surfaces these to
/// callers; it fails closed to a private-only decision instead.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("sanitizer unavailable: {reason}")]
    SanitizerUnavailable { reason: String },

    #[error("sanitizer failed: {reason}")]
    SanitizerFailed { reason: String },
}
