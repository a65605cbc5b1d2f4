//! Serializable result DTOs for callers at the crate boundary.
//!
//! The core result types stay plain; this layer owns the wire shape. On
//! unrecoverable failure the response degrades to `{error, automated_score:
//! 0, recommendation: "error"}` instead of surfacing a failure to the
//! caller.

use serde::{Deserialize, Serialize};

use crate::assessment::AssessmentResult;
use crate::scoring::CategoryScore;
use crate::semantic::AppliedPenalty;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScoreDto {
    pub score: f64,
    pub max_possible: f64,
    pub details: String,
}

impl From<&CategoryScore> for CategoryScoreDto {
    fn from(value: &CategoryScore) -> Self {
        Self {
            score: value.score,
            max_possible: value.max_possible,
            details: value.details.clone(),
        }
    }
}

/// Per-category rule score breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResultsDto {
    pub education: CategoryScoreDto,
    pub experience: CategoryScoreDto,
    pub training: CategoryScoreDto,
    pub eligibility: CategoryScoreDto,
    pub accomplishments: CategoryScoreDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticPenaltyDto {
    pub target: String,
    pub factor: f64,
    pub reason: String,
}

impl From<&AppliedPenalty> for SemanticPenaltyDto {
    fn from(value: &AppliedPenalty) -> Self {
        Self {
            target: value.target.clone(),
            factor: value.factor,
            reason: value.reason.clone(),
        }
    }
}

/// Semantic analysis block: similarities after any penalty adjustment, plus
/// the applied penalties for transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticAnalysisDto {
    pub overall_similarity: f64,
    pub education_relevance: f64,
    pub experience_relevance: f64,
    pub training_relevance: f64,
    pub education_compliant: bool,
    pub experience_compliant: bool,
    pub penalties: Vec<SemanticPenaltyDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceDto {
    pub education_compliant: bool,
    pub experience_compliant: bool,
    pub education_detail: String,
    pub experience_detail: String,
    pub compliance_score: f64,
}

/// Penalty/override metadata for the final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltiesAppliedDto {
    /// True when the Master's-degree hard override zeroed the education
    /// category.
    pub masters_degree_requirement_applied: bool,
    /// Education score before the override, when it applied.
    pub masters_original_score: Option<f64>,
    /// Whole-total multiplier from strict-mode non-compliance (1.0 = none).
    pub total_penalty_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub assessment_run_id: String,
    pub engine_version: String,
    pub rule_version: String,
    pub automated_score: f64,
    pub percentage_score: f64,
    pub total_score: f64,
    pub recommendation: String,
    pub needs_manual_review: bool,
    pub assessment_results: AssessmentResultsDto,
    pub semantic_analysis: SemanticAnalysisDto,
    pub compliance: ComplianceDto,
    pub penalties_applied: PenaltiesAppliedDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&AssessmentResult> for AssessmentResponse {
    fn from(result: &AssessmentResult) -> Self {
        Self {
            assessment_run_id: result.run_id.clone(),
            engine_version: result.engine_version.clone(),
            rule_version: result.rule_version.clone(),
            automated_score: result.automated_score,
            percentage_score: result.percentage,
            total_score: result.total_score,
            recommendation: result.recommendation.to_string(),
            needs_manual_review: result.needs_manual_review,
            assessment_results: AssessmentResultsDto {
                education: (&result.rules.education).into(),
                experience: (&result.rules.experience).into(),
                training: (&result.rules.training).into(),
                eligibility: (&result.rules.eligibility).into(),
                accomplishments: (&result.rules.accomplishments).into(),
            },
            semantic_analysis: SemanticAnalysisDto {
                overall_similarity: result.semantic.overall,
                education_relevance: result.semantic.education_relevance,
                experience_relevance: result.semantic.experience_relevance,
                training_relevance: result.semantic.training_relevance,
                education_compliant: result.semantic.education_compliant,
                experience_compliant: result.semantic.experience_compliant,
                penalties: result.semantic.penalties.iter().map(Into::into).collect(),
            },
            compliance: ComplianceDto {
                education_compliant: result.compliance.education_compliant,
                experience_compliant: result.compliance.experience_compliant,
                education_detail: result.compliance.education_detail.clone(),
                experience_detail: result.compliance.experience_detail.clone(),
                compliance_score: result.compliance.compliance_score,
            },
            penalties_applied: PenaltiesAppliedDto {
                masters_degree_requirement_applied: result.masters_override.is_some(),
                masters_original_score: result
                    .masters_override
                    .as_ref()
                    .map(|o| o.original_score),
                total_penalty_factor: result.total_penalty_factor,
            },
            error: result.error.clone(),
        }
    }
}

impl AssessmentResponse {
    /// Degraded error response for payloads or assessments that could not be
    /// processed at all.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self::from(&AssessmentResult::degraded(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AssessmentEngine, ManualScores};
    use crate::{CandidateRecord, EducationEntry, JobPosting};

    fn sample_response() -> AssessmentResponse {
        let engine = AssessmentEngine::default();
        let candidate = CandidateRecord {
            education: vec![EducationEntry {
                degree: Some("BS Accountancy".into()),
                ..EducationEntry::default()
            }],
            ..CandidateRecord::default()
        };
        let posting = JobPosting {
            position_title: Some("Instructor 1".into()),
            education_requirements: Some("Master's degree required".into()),
            ..JobPosting::default()
        };
        let result = engine.assess(
            &candidate,
            &posting,
            Some(ManualScores {
                interview: 8.0,
                aptitude: 4.0,
            }),
        );
        AssessmentResponse::from(&result)
    }

    #[test]
    fn wire_shape_exposes_the_documented_paths() {
        let value = serde_json::to_value(sample_response()).unwrap();

        assert!(value.pointer("/assessment_results/education/score").is_some());
        assert!(value
            .pointer("/penalties_applied/masters_degree_requirement_applied")
            .is_some());
        assert!(value.pointer("/semantic_analysis/overall_similarity").is_some());
        assert!(value.pointer("/compliance/compliance_score").is_some());
        assert!(value.pointer("/automated_score").is_some());
        assert!(value.pointer("/percentage_score").is_some());
        assert!(value.pointer("/recommendation").is_some());
        assert!(value.pointer("/needs_manual_review").is_some());
    }

    #[test]
    fn masters_override_surfaces_in_the_response() {
        let response = sample_response();
        assert!(response
            .penalties_applied
            .masters_degree_requirement_applied);
        assert_eq!(response.assessment_results.education.score, 0.0);
        assert_eq!(
            response.penalties_applied.masters_original_score,
            Some(30.0)
        );
    }

    #[test]
    fn degraded_response_matches_the_error_contract() {
        let response = AssessmentResponse::degraded("candidate payload is not a JSON object");
        assert_eq!(response.automated_score, 0.0);
        assert_eq!(response.recommendation, "error");
        assert!(response.needs_manual_review);
        assert!(response.error.is_some());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value.pointer("/recommendation").unwrap(), "error");
    }

    #[test]
    fn error_field_is_omitted_on_success() {
        let value = serde_json::to_value(sample_response()).unwrap();
        assert!(value.get("error").is_none());
    }
}
