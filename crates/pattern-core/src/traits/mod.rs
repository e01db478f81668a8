mod embedding;
mod pattern_store;
mod sanitizer;

pub use embedding::IEmbeddingProvider;
pub use pattern_store::IPatternStore;
pub use sanitizer::{ISanitizer, Redaction, SanitizationVerdict, SanitizerDecision, VerdictMetadata};
