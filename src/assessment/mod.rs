//! Blending and recommendation.
//!
//! Merges the five rule categories with the semantic score set, applies
//! compliance penalties and the Master's-degree hard override, and produces
//! the final percentage, recommendation, and manual-review flag. The engine
//! is an explicitly constructed service object owning its parser, embedder
//! and cache; there is no ambient global state.

use std::cmp::Ordering;
use std::panic::{catch_unwind, AssertUnwindSafe};

use strum::Display;

use crate::compliance::{self, ComplianceReport};
use crate::date;
use crate::fields;
use crate::requirements::{ParsedRequirements, RequirementParser};
use crate::run_id;
use crate::scoring::{self, education, weights::AUTOMATED_MAX, CategoryScore, RuleScores};
use crate::semantic::{
    AppliedPenalty, JobEmbedding, SemanticConfig, SemanticScoreSet, SemanticScorer,
};
use crate::{api, CandidateRecord, EducationLevel, JobPosting};

pub const ENGINE_VERSION: &str = "engine_v1";
pub const RULE_VERSION: &str = "rules_v1";

// Semantic penalty factors applied in strict mode on non-compliance.
const EDU_RELEVANCE_PENALTY_STRICT: f64 = 0.2;
const EDU_RELEVANCE_PENALTY: f64 = 0.5;
const EDU_OVERALL_PENALTY_STRICT: f64 = 0.4;
const EDU_OVERALL_PENALTY: f64 = 0.7;
const EXP_RELEVANCE_PENALTY: f64 = 0.6;
const EXP_OVERALL_PENALTY: f64 = 0.8;

// Whole-total penalty factors for strict-mode non-compliance.
const EDU_TOTAL_PENALTY: f64 = 0.3;
const EXP_TOTAL_PENALTY: f64 = 0.7;

/// Final recommendation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Recommendation {
    HighlyRecommended,
    Recommended,
    Conditional,
    NotRecommended,
    Error,
}

/// Manually entered panel scores filling the 15 points the automated rules
/// reserve. Clamped to their ceilings on read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualScores {
    pub interview: f64,
    pub aptitude: f64,
}

impl ManualScores {
    pub const INTERVIEW_MAX: f64 = 10.0;
    pub const APTITUDE_MAX: f64 = 5.0;

    pub fn total(&self) -> f64 {
        self.interview.clamp(0.0, Self::INTERVIEW_MAX)
            + self.aptitude.clamp(0.0, Self::APTITUDE_MAX)
    }
}

/// Record of the Master's-degree hard override, with before/after values.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideRecord {
    pub original_score: f64,
    pub adjusted_score: f64,
    pub reason: String,
}

/// Complete outcome of one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentResult {
    pub run_id: String,
    pub engine_version: String,
    pub rule_version: String,
    pub rules: RuleScores,
    pub semantic: SemanticScoreSet,
    pub compliance: ComplianceReport,
    pub masters_override: Option<OverrideRecord>,
    /// Whole-total multiplier applied for strict-mode non-compliance (1.0
    /// when none applied).
    pub total_penalty_factor: f64,
    pub automated_score: f64,
    /// Automated score plus clamped manual scores.
    pub total_score: f64,
    pub percentage: f64,
    pub recommendation: Recommendation,
    pub needs_manual_review: bool,
    pub error: Option<String>,
}

impl AssessmentResult {
    /// Degraded result for unrecoverable failures: zero scores, `error`
    /// recommendation, flagged for manual review.
    pub fn degraded(message: impl Into<String>) -> Self {
        let unscored = |max: f64| CategoryScore::zero(max, "not scored");
        Self {
            run_id: run_id::get().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            rule_version: RULE_VERSION.to_string(),
            rules: RuleScores {
                education: unscored(scoring::weights::CATEGORY_MAXIMA.education),
                experience: unscored(scoring::weights::CATEGORY_MAXIMA.experience),
                training: unscored(scoring::weights::CATEGORY_MAXIMA.training),
                eligibility: unscored(scoring::weights::CATEGORY_MAXIMA.eligibility),
                accomplishments: unscored(scoring::weights::CATEGORY_MAXIMA.accomplishments),
            },
            semantic: SemanticScoreSet::default(),
            compliance: ComplianceReport {
                education_compliant: true,
                experience_compliant: true,
                education_checked: false,
                experience_checked: false,
                education_detail: "not checked".into(),
                experience_detail: "not checked".into(),
                compliance_score: 1.0,
            },
            masters_override: None,
            total_penalty_factor: 1.0,
            automated_score: 0.0,
            total_score: 0.0,
            percentage: 0.0,
            recommendation: Recommendation::Error,
            needs_manual_review: true,
            error: Some(message.into()),
        }
    }
}

/// Recommendation thresholds and review tails; defaults follow the standard
/// rating sheet.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub highly_recommended_min: f64,
    pub recommended_min: f64,
    pub conditional_min: f64,
    /// Percentages below this need a second look.
    pub manual_review_low: f64,
    /// Percentages above this need verification before release.
    pub manual_review_high: f64,
    pub subject_similarity_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highly_recommended_min: 90.0,
            recommended_min: 75.0,
            conditional_min: 60.0,
            manual_review_low: 70.0,
            manual_review_high: 95.0,
            subject_similarity_threshold: 0.7,
        }
    }
}

pub struct AssessmentEngine {
    parser: RequirementParser,
    semantic: SemanticScorer,
    config: EngineConfig,
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new(
            RequirementParser::default(),
            SemanticScorer::from_config(&SemanticConfig::default()),
            EngineConfig::default(),
        )
    }
}

impl AssessmentEngine {
    pub fn new(
        parser: RequirementParser,
        semantic: SemanticScorer,
        config: EngineConfig,
    ) -> Self {
        Self {
            parser,
            semantic,
            config,
        }
    }

    /// Builds an engine from environment configuration (embedder, cache
    /// path, strictness keyword overrides).
    pub fn from_env() -> Self {
        let semantic_config = SemanticConfig::load_from_env();
        let config = EngineConfig {
            subject_similarity_threshold: semantic_config.subject_similarity_threshold,
            ..EngineConfig::default()
        };
        Self::new(
            RequirementParser::new(crate::requirements::ParserConfig::load_from_env()),
            SemanticScorer::from_config(&semantic_config),
            config,
        )
    }

    /// The owned semantic scorer; callers reach the embedding cache through
    /// it for periodic `cleanup()`.
    pub fn semantic(&self) -> &SemanticScorer {
        &self.semantic
    }

    /// Assesses one candidate against one posting. Never panics and never
    /// errors: any unexpected internal failure is converted into a degraded
    /// error result at this boundary.
    pub fn assess(
        &self,
        candidate: &CandidateRecord,
        posting: &JobPosting,
        manual: Option<ManualScores>,
    ) -> AssessmentResult {
        match catch_unwind(AssertUnwindSafe(|| {
            self.run_assessment(candidate, posting, manual)
        })) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    run_id = run_id::get(),
                    "assessment panicked; returning degraded error result"
                );
                AssessmentResult::degraded("unexpected internal failure during assessment")
            }
        }
    }

    /// JSON boundary: resolves synonym-heavy payloads, then assesses.
    /// Payload rejection degrades to the error response instead of failing.
    pub fn assess_json(
        &self,
        candidate: &serde_json::Value,
        posting: &serde_json::Value,
        manual: Option<ManualScores>,
    ) -> api::AssessmentResponse {
        let candidate = match fields::candidate_from_value(candidate) {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::error!(error = %err, "candidate payload rejected");
                return api::AssessmentResponse::degraded(err.to_string());
            }
        };
        let posting = match fields::posting_from_value(posting) {
            Ok(posting) => posting,
            Err(err) => {
                tracing::error!(error = %err, "posting payload rejected");
                return api::AssessmentResponse::degraded(err.to_string());
            }
        };
        api::AssessmentResponse::from(&self.assess(&candidate, &posting, manual))
    }

    /// Assesses many candidates against one posting, parsing requirements
    /// and embedding the job text once, and returns results ranked by
    /// automated score descending.
    pub fn assess_batch(
        &self,
        candidates: &[CandidateRecord],
        posting: &JobPosting,
    ) -> Vec<AssessmentResult> {
        let requirements = self.parser.parse(posting);
        let job = self
            .semantic
            .embed_job(posting, requirements.position_level);

        let mut results: Vec<AssessmentResult> = candidates
            .iter()
            .map(|candidate| self.assess_prepared(candidate, &requirements, &job, None))
            .collect();

        results.sort_by(|a, b| {
            b.automated_score
                .partial_cmp(&a.automated_score)
                .unwrap_or(Ordering::Equal)
        });
        results
    }

    fn run_assessment(
        &self,
        candidate: &CandidateRecord,
        posting: &JobPosting,
        manual: Option<ManualScores>,
    ) -> AssessmentResult {
        let requirements = self.parser.parse(posting);
        let job = self
            .semantic
            .embed_job(posting, requirements.position_level);
        self.assess_prepared(candidate, &requirements, &job, manual)
    }

    fn assess_prepared(
        &self,
        candidate: &CandidateRecord,
        requirements: &ParsedRequirements,
        job: &JobEmbedding,
        manual: Option<ManualScores>,
    ) -> AssessmentResult {
        let today = date::today();

        let mut rules = scoring::score_all(candidate, requirements, today);
        let report = compliance::check(
            candidate,
            requirements,
            Some(&self.semantic),
            self.config.subject_similarity_threshold,
            today,
        );

        let mut semantic = self.semantic.score_against(candidate, job);
        semantic.education_compliant = report.education_compliant;
        semantic.experience_compliant = report.experience_compliant;
        if requirements.strict {
            apply_semantic_penalties(&mut semantic, requirements);
        }

        let masters_override = apply_masters_override(&mut rules, candidate, requirements);

        // Hard override and whole-total penalty are independent mechanisms;
        // both may apply to the same candidate.
        let raw_total = rules.automated_total();
        let total_penalty_factor = if requirements.strict && !report.education_compliant {
            EDU_TOTAL_PENALTY
        } else if requirements.strict && !report.experience_compliant {
            EXP_TOTAL_PENALTY
        } else {
            1.0
        };

        let automated_score = raw_total * total_penalty_factor;
        let percentage = automated_score / AUTOMATED_MAX * 100.0;
        let total_score = automated_score + manual.map(|m| m.total()).unwrap_or(0.0);

        AssessmentResult {
            run_id: run_id::get().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            rule_version: RULE_VERSION.to_string(),
            rules,
            semantic,
            compliance: report,
            masters_override,
            total_penalty_factor,
            automated_score,
            total_score,
            percentage,
            recommendation: self.recommend(percentage),
            needs_manual_review: self.needs_review(percentage),
            error: None,
        }
    }

    fn recommend(&self, percentage: f64) -> Recommendation {
        if percentage >= self.config.highly_recommended_min {
            Recommendation::HighlyRecommended
        } else if percentage >= self.config.recommended_min {
            Recommendation::Recommended
        } else if percentage >= self.config.conditional_min {
            Recommendation::Conditional
        } else {
            Recommendation::NotRecommended
        }
    }

    /// Both tails are flagged: unusually low scores need scrutiny, unusually
    /// high scores need verification.
    fn needs_review(&self, percentage: f64) -> bool {
        percentage < self.config.manual_review_low
            || percentage > self.config.manual_review_high
    }
}

/// Strict-mode semantic penalties. Education non-compliance penalizes harder
/// when the education requirement itself carried obligation language.
fn apply_semantic_penalties(semantic: &mut SemanticScoreSet, requirements: &ParsedRequirements) {
    if !semantic.education_compliant {
        let (relevance_factor, overall_factor) = if requirements.education.is_strict {
            (EDU_RELEVANCE_PENALTY_STRICT, EDU_OVERALL_PENALTY_STRICT)
        } else {
            (EDU_RELEVANCE_PENALTY, EDU_OVERALL_PENALTY)
        };
        semantic.education_relevance *= relevance_factor;
        semantic.overall *= overall_factor;
        semantic.penalties.push(AppliedPenalty {
            target: "education_relevance".into(),
            factor: relevance_factor,
            reason: "education requirement not met".into(),
        });
        semantic.penalties.push(AppliedPenalty {
            target: "overall".into(),
            factor: overall_factor,
            reason: "education requirement not met".into(),
        });
    }

    if !semantic.experience_compliant {
        semantic.experience_relevance *= EXP_RELEVANCE_PENALTY;
        semantic.overall *= EXP_OVERALL_PENALTY;
        semantic.penalties.push(AppliedPenalty {
            target: "experience_relevance".into(),
            factor: EXP_RELEVANCE_PENALTY,
            reason: "experience requirement not met".into(),
        });
        semantic.penalties.push(AppliedPenalty {
            target: "overall".into(),
            factor: EXP_OVERALL_PENALTY,
            reason: "experience requirement not met".into(),
        });
    }
}

/// Hard zero-score override for Master's-required special categories. Only
/// the two instructor categories flagged by the parser qualify.
fn apply_masters_override(
    rules: &mut RuleScores,
    candidate: &CandidateRecord,
    requirements: &ParsedRequirements,
) -> Option<OverrideRecord> {
    let category = requirements.special_category?;
    let meets_masters = education::highest_level(candidate)
        .map(|level| level >= EducationLevel::Master)
        .unwrap_or(false);
    if meets_masters {
        return None;
    }

    let original = rules.education.score;
    rules.education = CategoryScore::new(
        0.0,
        rules.education.max_possible,
        format!("{category} posting requires a master's degree; score overridden from {original:.0}"),
    );
    Some(OverrideRecord {
        original_score: original,
        adjusted_score: 0.0,
        reason: format!("{category} requires a master's degree"),
    })
}
