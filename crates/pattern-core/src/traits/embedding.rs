use crate::errors::PatternResult;

/// Embedding generation provider. Used only for cache similarity lookups.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a fixed-length vector.
    fn embed(&self, text: &str) -> PatternResult<Vec<f32>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool {
        true
    }
}
