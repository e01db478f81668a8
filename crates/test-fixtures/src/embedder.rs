use pattern_core::errors::PatternResult;
use pattern_core::traits::IEmbeddingProvider;

/// Hashed bag-of-words embedder.
///
/// Identical texts embed identically; texts sharing most words land close
/// together. Output is L2-normalized.
pub struct BagOfWordsEmbedder {
    dimensions: usize,
}

impl BagOfWordsEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// FNV-1a bucket for a term.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }
}

impl Default for BagOfWordsEmbedder {
    fn default() -> Self {
        Self::new(64)
    }
}

impl IEmbeddingProvider for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> PatternResult<Vec<f32>> {
        let mut vec = vec![0.0f32; self.dimensions];
        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
        {
            vec[Self::bucket(&term.to_lowercase(), self.dimensions)] += 1.0;
        }
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        Ok(vec)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "bag-of-words"
    }
}
