//! Semantic similarity scoring between a candidate profile and a posting.
//!
//! Owns the embedder and cache; constructed explicitly by the caller rather
//! than living in a process-wide singleton, so tests and batch jobs control
//! exactly what they share.

use super::{
    cache::EmbeddingCache,
    config::SemanticConfig,
    create_embedder, encode_or_fallback,
    profile::{candidate_profile, education_block, experience_block, job_text, training_block},
    similarity::cosine_similarity,
    TextEmbedder,
};
use crate::requirements::PositionLevel;
use crate::{CandidateRecord, JobPosting};

/// One penalty multiplication applied to a semantic score, kept for
/// transparency in the final result.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedPenalty {
    pub target: String,
    pub factor: f64,
    pub reason: String,
}

/// Overall and per-category similarities plus compliance/penalty metadata.
/// Values stay in [0, 1]; penalties only ever shrink them.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticScoreSet {
    pub overall: f64,
    pub education_relevance: f64,
    pub experience_relevance: f64,
    pub training_relevance: f64,
    pub education_compliant: bool,
    pub experience_compliant: bool,
    pub penalties: Vec<AppliedPenalty>,
}

impl Default for SemanticScoreSet {
    fn default() -> Self {
        Self {
            overall: 0.0,
            education_relevance: 0.0,
            experience_relevance: 0.0,
            training_relevance: 0.0,
            education_compliant: true,
            experience_compliant: true,
            penalties: Vec::new(),
        }
    }
}

/// Job-side embedding, computed once per posting and shared across a batch.
#[derive(Debug, Clone)]
pub struct JobEmbedding {
    pub text: String,
    pub vector: Vec<f32>,
}

pub struct SemanticScorer {
    embedder: Box<dyn TextEmbedder>,
    cache: EmbeddingCache,
    model_id: String,
}

impl SemanticScorer {
    pub fn new(embedder: Box<dyn TextEmbedder>, cache: EmbeddingCache) -> Self {
        let model_id = format!("{}-{}", embedder.name(), embedder.version());
        Self {
            embedder,
            cache,
            model_id,
        }
    }

    /// Builds a scorer from configuration: factory embedder plus a
    /// disk-backed cache when a path is configured.
    pub fn from_config(config: &SemanticConfig) -> Self {
        let embedder = create_embedder(&config.embedder, config);
        let cache = match &config.cache_path {
            Some(path) => EmbeddingCache::open(path),
            None => EmbeddingCache::in_memory(),
        };
        Self::new(embedder, cache)
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Cache-aware encode. Misses under concurrent access just recompute;
    /// the content-hash key makes racing writes idempotent.
    fn embed(&self, text: &str, context: &str) -> Vec<f32> {
        let key = EmbeddingCache::key(text, context, &self.model_id);
        if let Some(vector) = self.cache.get(&key) {
            return vector;
        }
        let vector = encode_or_fallback(self.embedder.as_ref(), text);
        self.cache.put(key, vector.clone());
        vector
    }

    /// Job-side embedding, done once per posting so batch assessment does not
    /// repeat provider calls per candidate.
    pub fn embed_job(&self, posting: &JobPosting, level: PositionLevel) -> JobEmbedding {
        let text = job_text(posting, level);
        let vector = self.embed(&text, "job");
        JobEmbedding { text, vector }
    }

    /// Raw similarities for one candidate against a pre-embedded job.
    /// Compliance flags default to compliant; the blending engine overwrites
    /// them from the compliance report and applies penalties there.
    pub fn score_against(
        &self,
        candidate: &CandidateRecord,
        job: &JobEmbedding,
    ) -> SemanticScoreSet {
        SemanticScoreSet {
            overall: self.block_similarity(&candidate_profile(candidate), "profile", job),
            education_relevance: self.block_similarity(
                &education_block(candidate),
                "education",
                job,
            ),
            experience_relevance: self.block_similarity(
                &experience_block(candidate),
                "experience",
                job,
            ),
            training_relevance: self.block_similarity(&training_block(candidate), "training", job),
            ..SemanticScoreSet::default()
        }
    }

    fn block_similarity(&self, block: &str, context: &str, job: &JobEmbedding) -> f64 {
        if block.is_empty() {
            return 0.0;
        }
        cosine_similarity(&self.embed(block, context), &job.vector)
    }

    /// Plain text-to-text similarity, used by the subject-field compliance
    /// check.
    pub fn text_similarity(&self, a: &str, b: &str) -> f64 {
        if a.trim().is_empty() || b.trim().is_empty() {
            return 0.0;
        }
        cosine_similarity(&self.embed(a, "text"), &self.embed(b, "text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EducationEntry, TrainingEntry, WorkEntry};

    fn scorer() -> SemanticScorer {
        SemanticScorer::from_config(&SemanticConfig::default())
    }

    fn it_candidate() -> CandidateRecord {
        CandidateRecord {
            education: vec![EducationEntry {
                degree: Some("BS Information Technology".into()),
                ..EducationEntry::default()
            }],
            experience: vec![WorkEntry {
                position: Some("Network Administrator".into()),
                company: Some("Provincial ICT Office".into()),
                ..WorkEntry::default()
            }],
            training: vec![TrainingEntry {
                title: Some("Database Management Training".into()),
                ..TrainingEntry::default()
            }],
            ..CandidateRecord::default()
        }
    }

    fn it_posting() -> JobPosting {
        JobPosting {
            position_title: Some("Information Technology Officer".into()),
            education_requirements: Some(
                "Bachelor's degree in Information Technology".into(),
            ),
            job_description: Some("network administration and database management".into()),
            ..JobPosting::default()
        }
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let scorer = scorer();
        let job = scorer.embed_job(&it_posting(), PositionLevel::Entry);
        let set = scorer.score_against(&it_candidate(), &job);

        for value in [
            set.overall,
            set.education_relevance,
            set.experience_relevance,
            set.training_relevance,
        ] {
            assert!((0.0..=1.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn empty_candidate_scores_zero_relevance() {
        let scorer = scorer();
        let job = scorer.embed_job(&it_posting(), PositionLevel::Entry);
        let set = scorer.score_against(&CandidateRecord::default(), &job);
        assert_eq!(set.overall, 0.0);
        assert_eq!(set.education_relevance, 0.0);
    }

    #[test]
    fn scoring_is_idempotent_through_the_cache() {
        let scorer = scorer();
        let job = scorer.embed_job(&it_posting(), PositionLevel::Entry);
        let first = scorer.score_against(&it_candidate(), &job);
        let second = scorer.score_against(&it_candidate(), &job);
        assert_eq!(first, second);
        assert!(!scorer.cache().is_empty());
    }

    #[test]
    fn matching_profile_beats_unrelated_profile() {
        let scorer = scorer();
        let job = scorer.embed_job(&it_posting(), PositionLevel::Entry);

        let unrelated = CandidateRecord {
            education: vec![EducationEntry {
                degree: Some("BS Agriculture".into()),
                ..EducationEntry::default()
            }],
            experience: vec![WorkEntry {
                position: Some("Farm Supervisor".into()),
                company: Some("Plantation Estate".into()),
                ..WorkEntry::default()
            }],
            ..CandidateRecord::default()
        };

        let matching = scorer.score_against(&it_candidate(), &job);
        let other = scorer.score_against(&unrelated, &job);
        assert!(matching.overall > other.overall);
    }

    #[test]
    fn subject_similarity_recognizes_matching_fields() {
        let scorer = scorer();
        let same = scorer.text_similarity("information technology", "information technology");
        let different = scorer.text_similarity("information technology", "animal husbandry");
        assert!(same > 0.99);
        assert!(different < same);
        assert_eq!(scorer.text_similarity("", "anything"), 0.0);
    }
}
