//! Deterministic feature-hashing embedder.
//!
//! Serves two roles: a zero-dependency provider for environments without a
//! real embedding model, and the mandatory fallback when a provider reports
//! itself unavailable. SipHash13 with fixed seeds keeps vectors stable across
//! processes and Rust versions.

use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

use super::TextEmbedder;
use crate::normalize::tokens;

/// Fixed seeds for deterministic hashing.
/// Changing either value changes every embedding; bump `version()` with it.
const HASH_SEED_K0: u64 = 0x7f4a_7c15_9e37_79b9;
const HASH_SEED_K1: u64 = 0x4f6c_dd1d_2545_f491;

pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        hasher.finish()
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokens(text) {
            let idx = (self.hash_token(&token) as usize) % self.dimension;
            // Sign hashing keeps the expected dot product of unrelated
            // texts near zero.
            let sign = if self.hash_token(&format!("{token}_sign")) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::cosine_similarity;

    #[test]
    fn vectors_are_unit_length() {
        let embedder = HashEmbedder::new(384);
        let vector = embedder.encode("network administration seminar");
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn encoding_is_deterministic() {
        let embedder = HashEmbedder::new(128);
        assert_eq!(
            embedder.encode("records management"),
            embedder.encode("records management")
        );
    }

    #[test]
    fn similar_texts_score_higher_than_unrelated() {
        let embedder = HashEmbedder::new(384);
        let job = embedder.encode("information technology officer network database");
        let similar = embedder.encode("information technology network administrator");
        let unrelated = embedder.encode("livestock farming irrigation harvest");

        assert!(
            cosine_similarity(&job, &similar) > cosine_similarity(&job, &unrelated),
            "similar text should out-score unrelated text"
        );
    }

    #[test]
    fn empty_text_encodes_to_zero_vector() {
        let embedder = HashEmbedder::new(16);
        let vector = embedder.encode("");
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn dimension_floor_is_one() {
        let embedder = HashEmbedder::new(0);
        assert_eq!(embedder.dimension(), 1);
    }
}
