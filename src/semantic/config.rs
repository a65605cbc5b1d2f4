use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SemanticConfig {
    /// Embedding dimension; must match whatever model the provider serves.
    pub dimension: usize,
    /// Provider implementation name ("hash" is the deterministic built-in).
    pub embedder: String,
    /// On-disk cache location; `None` keeps the cache in memory only.
    pub cache_path: Option<PathBuf>,
    /// Cosine threshold for the subject-field compliance check.
    pub subject_similarity_threshold: f64,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            dimension: 384,
            embedder: "hash".into(),
            cache_path: None,
            subject_similarity_threshold: 0.7,
        }
    }
}

impl SemanticConfig {
    /// Reads overrides from `PM_SEMANTIC_DIMENSION`, `PM_SEMANTIC_EMBEDDER`,
    /// `PM_SEMANTIC_CACHE_PATH` and `PM_SUBJECT_SIM_THRESHOLD`.
    pub fn load_from_env() -> Self {
        let defaults = Self::default();
        Self {
            dimension: std::env::var("PM_SEMANTIC_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.dimension),
            embedder: std::env::var("PM_SEMANTIC_EMBEDDER").unwrap_or(defaults.embedder),
            cache_path: std::env::var_os("PM_SEMANTIC_CACHE_PATH").map(PathBuf::from),
            subject_similarity_threshold: std::env::var("PM_SUBJECT_SIM_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.subject_similarity_threshold),
        }
    }
}
