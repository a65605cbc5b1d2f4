//! Embedding-based semantic relevance.
//!
//! The provider boundary is the `TextEmbedder` trait: anything that can turn
//! text into a fixed-dimension vector. A provider may report itself
//! unavailable at any time; callers then substitute the deterministic
//! hash-derived vector of the same dimension, so the scoring pipeline is
//! never blocked by provider absence.

pub mod cache;
pub mod config;
pub mod hash;
pub mod profile;
pub mod scorer;
pub mod similarity;

pub use cache::EmbeddingCache;
pub use config::SemanticConfig;
pub use hash::HashEmbedder;
pub use scorer::{AppliedPenalty, JobEmbedding, SemanticScoreSet, SemanticScorer};
pub use similarity::cosine_similarity;

/// Text embedding provider contract.
///
/// `name()` and `version()` are recorded in assessment results so scores stay
/// attributable to the model generation that produced them.
pub trait TextEmbedder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Model generation; bump when vectors change meaning.
    fn version(&self) -> &str;

    fn dimension(&self) -> usize;

    /// Whether the provider can currently serve `encode` calls. Callers
    /// treat `false` exactly like a timeout: fall back, never wait.
    fn is_available(&self) -> bool {
        true
    }

    /// Encodes text into a vector of `dimension()` components.
    fn encode(&self, text: &str) -> Vec<f32>;
}

/// Provider factory. Unknown names fall back to the hash embedder so a
/// misconfigured deployment still produces deterministic scores.
pub fn create_embedder(name: &str, config: &SemanticConfig) -> Box<dyn TextEmbedder> {
    match name {
        "hash" => Box::new(HashEmbedder::new(config.dimension)),
        other => {
            tracing::warn!(embedder = other, "unknown embedder name; using hash embedder");
            Box::new(HashEmbedder::new(config.dimension))
        }
    }
}

/// Deterministic unit vector derived from the text alone. The substitute for
/// an unavailable provider.
pub fn fallback_vector(text: &str, dimension: usize) -> Vec<f32> {
    HashEmbedder::new(dimension).encode(text)
}

/// Encodes through the provider when it is available and well-behaved;
/// otherwise substitutes the hash fallback of the provider's dimension.
pub fn encode_or_fallback(embedder: &dyn TextEmbedder, text: &str) -> Vec<f32> {
    if embedder.is_available() {
        let vector = embedder.encode(text);
        if vector.len() == embedder.dimension() {
            return vector;
        }
        tracing::warn!(
            expected = embedder.dimension(),
            got = vector.len(),
            "provider returned wrong dimension; substituting fallback vector"
        );
    } else {
        tracing::warn!(
            provider = embedder.name(),
            "embedding provider unavailable; substituting fallback vector"
        );
    }
    fallback_vector(text, embedder.dimension())
}
