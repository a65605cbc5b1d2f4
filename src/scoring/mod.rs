//! Rule-based category scoring over structured PDS records.
//!
//! Five independent scorers, one per category. Each returns a
//! `CategoryScore` with a human-readable explanation and degrades to a
//! zero/minimum score on missing or malformed data; none of them can fail.

pub mod accomplishments;
pub mod education;
pub mod eligibility;
pub mod experience;
pub mod training;
pub mod weights;

use chrono::NaiveDate;

use crate::requirements::ParsedRequirements;
use crate::CandidateRecord;

/// One category's points with its explanation.
/// Invariant: `0 <= score <= max_possible`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub score: f64,
    pub max_possible: f64,
    pub details: String,
}

impl CategoryScore {
    /// Constructor that enforces the score range invariant.
    pub fn new(score: f64, max_possible: f64, details: impl Into<String>) -> Self {
        Self {
            score: score.clamp(0.0, max_possible),
            max_possible,
            details: details.into(),
        }
    }

    pub fn zero(max_possible: f64, details: impl Into<String>) -> Self {
        Self::new(0.0, max_possible, details)
    }
}

/// All five rule categories for one candidate/posting pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScores {
    pub education: CategoryScore,
    pub experience: CategoryScore,
    pub training: CategoryScore,
    pub eligibility: CategoryScore,
    pub accomplishments: CategoryScore,
}

impl RuleScores {
    /// Raw automated total (max 85) before any penalty or override.
    pub fn automated_total(&self) -> f64 {
        self.education.score
            + self.experience.score
            + self.training.score
            + self.eligibility.score
            + self.accomplishments.score
    }
}

/// Runs all five category scorers. `today` anchors experience durations so
/// results stay reproducible in tests.
pub fn score_all(
    candidate: &CandidateRecord,
    requirements: &ParsedRequirements,
    today: NaiveDate,
) -> RuleScores {
    RuleScores {
        education: education::score(candidate),
        experience: experience::score(candidate, requirements, today),
        training: training::score(candidate),
        eligibility: eligibility::score(candidate),
        accomplishments: accomplishments::score(candidate),
    }
}
