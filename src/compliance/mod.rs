//! Requirement compliance checks.
//!
//! Two dimensions: education level (with optional subject field) and
//! experience years. A dimension with no stated requirement is always
//! satisfied; absence of a requirement is never non-compliance.

use chrono::NaiveDate;

use crate::requirements::ParsedRequirements;
use crate::scoring::{education, experience};
use crate::semantic::SemanticScorer;
use crate::normalize::fold;
use crate::CandidateRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceReport {
    pub education_compliant: bool,
    pub experience_compliant: bool,
    /// Whether each dimension had a stated requirement to check.
    pub education_checked: bool,
    pub experience_checked: bool,
    pub education_detail: String,
    pub experience_detail: String,
    /// Fraction of checked dimensions satisfied; 1.0 when nothing was
    /// checked.
    pub compliance_score: f64,
}

/// Subject-field test: direct containment first, then embedding similarity
/// against the required field when a scorer is supplied.
fn subject_field_matches(
    candidate: &CandidateRecord,
    subject: &str,
    semantic: Option<&SemanticScorer>,
    threshold: f64,
) -> bool {
    let folded_subject = fold(subject);
    let direct = candidate.education.iter().any(|e| {
        e.degree
            .as_deref()
            .map(|d| fold(d).contains(&folded_subject))
            .unwrap_or(false)
    });
    if direct {
        return true;
    }

    let Some(scorer) = semantic else {
        return false;
    };
    candidate
        .education
        .iter()
        .filter_map(|e| e.degree.as_deref())
        .any(|degree| scorer.text_similarity(degree, subject) >= threshold)
}

/// Checks one candidate against the parsed requirements. `today` anchors the
/// experience-years calculation.
pub fn check(
    candidate: &CandidateRecord,
    requirements: &ParsedRequirements,
    semantic: Option<&SemanticScorer>,
    subject_similarity_threshold: f64,
    today: NaiveDate,
) -> ComplianceReport {
    let education_checked = requirements.education.stated;
    let (education_compliant, education_detail) = if !education_checked {
        (true, "no stated education requirement".to_string())
    } else {
        let required = requirements.education.min_level;
        match education::highest_level(candidate) {
            None => (
                false,
                format!("no classifiable education; {required} required"),
            ),
            Some(level) if level < required => (
                false,
                format!("highest level {level} below required {required}"),
            ),
            Some(level) => match requirements.education.subject_area.as_deref() {
                None => (true, format!("{level} meets required {required}")),
                Some(subject) => {
                    if subject_field_matches(
                        candidate,
                        subject,
                        semantic,
                        subject_similarity_threshold,
                    ) {
                        (
                            true,
                            format!("{level} meets required {required} in {subject}"),
                        )
                    } else {
                        (
                            false,
                            format!("{level} meets level but field does not match {subject}"),
                        )
                    }
                }
            },
        }
    };

    let required_years = requirements.required_experience_years;
    let experience_checked = required_years > 0;
    let (experience_compliant, experience_detail) = if !experience_checked {
        (true, "no experience requirement".to_string())
    } else {
        let years = experience::total_years(candidate, today);
        if years >= required_years as f64 {
            (
                true,
                format!("{years:.1} years meets required {required_years}"),
            )
        } else {
            (
                false,
                format!("{years:.1} years below required {required_years}"),
            )
        }
    };

    let checked = [education_checked, experience_checked]
        .iter()
        .filter(|c| **c)
        .count();
    let satisfied = [
        education_checked && education_compliant,
        experience_checked && experience_compliant,
    ]
    .iter()
    .filter(|s| **s)
    .count();
    let compliance_score = if checked == 0 {
        1.0
    } else {
        satisfied as f64 / checked as f64
    };

    ComplianceReport {
        education_compliant,
        experience_compliant,
        education_checked,
        experience_checked,
        education_detail,
        experience_detail,
        compliance_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::RequirementParser;
    use crate::semantic::{SemanticConfig, SemanticScorer};
    use crate::{EducationEntry, JobPosting, WorkEntry};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn requirements_for(education: &str, experience: &str) -> ParsedRequirements {
        RequirementParser::default().parse(&JobPosting {
            position_title: Some("Officer".into()),
            education_requirements: Some(education.to_string())
                .filter(|s| !s.is_empty()),
            experience_requirements: Some(experience.to_string())
                .filter(|s| !s.is_empty()),
            ..JobPosting::default()
        })
    }

    fn bachelor_candidate(degree: &str) -> CandidateRecord {
        CandidateRecord {
            education: vec![EducationEntry {
                level: Some("College".into()),
                degree: Some(degree.into()),
                ..EducationEntry::default()
            }],
            experience: vec![WorkEntry {
                position: Some("Clerk".into()),
                company: Some("Provincial Government".into()),
                date_from: Some("2018-01".into()),
                date_to: Some("2024-01".into()),
            }],
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn meeting_both_requirements_is_fully_compliant() {
        let requirements =
            requirements_for("Bachelor's degree", "3 years of experience");
        let report = check(
            &bachelor_candidate("BS Office Administration"),
            &requirements,
            None,
            0.7,
            fixed_today(),
        );
        assert!(report.education_compliant);
        assert!(report.experience_compliant);
        assert_eq!(report.compliance_score, 1.0);
    }

    #[test]
    fn level_below_requirement_is_non_compliant() {
        let requirements = requirements_for("Master's degree", "");
        let report = check(
            &bachelor_candidate("BS Office Administration"),
            &requirements,
            None,
            0.7,
            fixed_today(),
        );
        assert!(!report.education_compliant);
        assert!(report.experience_compliant);
        assert_eq!(report.compliance_score, 0.0);
    }

    #[test]
    fn missing_requirements_default_to_compliant() {
        let requirements = requirements_for("", "");
        let report = check(
            &CandidateRecord::default(),
            &requirements,
            None,
            0.7,
            fixed_today(),
        );
        assert!(report.education_compliant);
        assert!(report.experience_compliant);
        assert!(!report.education_checked);
        assert!(!report.experience_checked);
        assert_eq!(report.compliance_score, 1.0);
    }

    #[test]
    fn subject_field_containment_passes() {
        let requirements = requirements_for(
            "Bachelor's degree in Information Technology",
            "",
        );
        let report = check(
            &bachelor_candidate("BS Information Technology"),
            &requirements,
            None,
            0.7,
            fixed_today(),
        );
        assert!(report.education_compliant);

        let report = check(
            &bachelor_candidate("BS Agriculture"),
            &requirements,
            None,
            0.7,
            fixed_today(),
        );
        assert!(!report.education_compliant);
        assert_eq!(report.compliance_score, 0.0);
    }

    #[test]
    fn semantic_similarity_rescues_near_matching_fields() {
        let scorer = SemanticScorer::from_config(&SemanticConfig::default());
        let requirements = requirements_for(
            "Bachelor's degree in Information Technology",
            "",
        );
        // The degree text never literally contains the subject, but shares
        // most of its tokens; a generous threshold lets similarity decide.
        let candidate =
            bachelor_candidate("Bachelor of Science major in Information Tech");
        let strict = check(&candidate, &requirements, Some(&scorer), 0.99, fixed_today());
        let loose = check(&candidate, &requirements, Some(&scorer), 0.3, fixed_today());
        assert!(!strict.education_compliant);
        assert!(loose.education_compliant);
    }

    #[test]
    fn experience_shortfall_is_non_compliant() {
        let requirements = requirements_for("", "10 years of experience");
        let report = check(
            &bachelor_candidate("BS Office Administration"),
            &requirements,
            None,
            0.7,
            fixed_today(),
        );
        assert!(!report.experience_compliant);
        assert!(report.experience_detail.contains("below required"));
    }
}
