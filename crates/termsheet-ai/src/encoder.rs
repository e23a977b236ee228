//! Sentence encoders behind a common trait.
//!
//! The default encoder hashes token n-grams into a fixed-dimension vector, so
//! analysis works with no model files on disk. The ONNX encoder (feature
//! `onnx`) swaps in sentence-transformer embeddings for real semantic
//! similarity.

use crate::AnalysisError;

/// Dimensionality of the hashed lexical encoder.
pub const DEFAULT_DIM: usize = 256;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Turns clause text into fixed-dimension vectors for similarity scoring.
///
/// Implementations return unit-length vectors so dot products are cosine
/// similarities.
pub trait ClauseEncoder: Send + Sync {
    /// Vector dimensionality.
    fn dim(&self) -> usize;

    /// Encode a batch of texts, one normalized vector per input.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalysisError>;
}

/// Hashed bag-of-ngrams encoder.
///
/// Unigrams and bigrams are FNV-hashed into sign-carrying buckets, then the
/// vector is L2-normalized. Identical texts map to identical vectors, which
/// is what duplicate detection needs; texts sharing no tokens land far apart.
pub struct LexicalEncoder {
    dim: usize,
}

impl LexicalEncoder {
    pub fn new() -> Self {
        Self { dim: DEFAULT_DIM }
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        for token in &tokens {
            bump(&mut v, fnv1a(FNV_OFFSET, token.as_bytes()));
        }
        for pair in tokens.windows(2) {
            let hash = fnv1a(FNV_OFFSET, pair[0].as_bytes());
            let hash = fnv1a(hash, b" ");
            let hash = fnv1a(hash, pair[1].as_bytes());
            bump(&mut v, hash);
        }

        normalize(&mut v);
        v
    }
}

impl Default for LexicalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseEncoder for LexicalEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AnalysisError> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}

fn bump(v: &mut [f32], hash: u64) {
    let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
    v[hash as usize % v.len()] += sign;
}

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// L2-normalize a vector in place.
pub(crate) fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
