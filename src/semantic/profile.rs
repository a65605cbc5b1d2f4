//! Text-block builders for embedding input.
//!
//! Entry counts are bounded so embedding input stays a predictable size even
//! for candidates with decades of history; the most recent entries appear
//! first in PDS exports, so truncation keeps the freshest signal.

use crate::requirements::PositionLevel;
use crate::{CandidateRecord, JobPosting};

pub const MAX_EDUCATION_ENTRIES: usize = 4;
pub const MAX_EXPERIENCE_ENTRIES: usize = 4;
pub const MAX_TRAINING_ENTRIES: usize = 5;
pub const MAX_ELIGIBILITY_ENTRIES: usize = 2;

const BLOCK_DELIMITER: &str = " | ";

fn join_present(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Education sub-block, at most `MAX_EDUCATION_ENTRIES` entries.
pub fn education_block(candidate: &CandidateRecord) -> String {
    candidate
        .education
        .iter()
        .take(MAX_EDUCATION_ENTRIES)
        .map(|e| {
            join_present(
                &[
                    e.degree.as_deref(),
                    e.level.as_deref(),
                    e.institution.as_deref(),
                    e.honors.as_deref(),
                ],
                ", ",
            )
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Experience sub-block, at most `MAX_EXPERIENCE_ENTRIES` entries.
pub fn experience_block(candidate: &CandidateRecord) -> String {
    candidate
        .experience
        .iter()
        .take(MAX_EXPERIENCE_ENTRIES)
        .map(|e| {
            join_present(
                &[e.position.as_deref(), e.company.as_deref()],
                " at ",
            )
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Training sub-block, at most `MAX_TRAINING_ENTRIES` entries.
pub fn training_block(candidate: &CandidateRecord) -> String {
    candidate
        .training
        .iter()
        .take(MAX_TRAINING_ENTRIES)
        .map(|t| {
            join_present(
                &[t.title.as_deref(), t.training_type.as_deref()],
                ", ",
            )
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn eligibility_block(candidate: &CandidateRecord) -> String {
    candidate
        .eligibility
        .iter()
        .take(MAX_ELIGIBILITY_ENTRIES)
        .filter_map(|e| e.name.as_deref())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Whole-candidate profile text for the overall similarity.
pub fn candidate_profile(candidate: &CandidateRecord) -> String {
    let sections = [
        ("Education", education_block(candidate)),
        ("Experience", experience_block(candidate)),
        ("Training", training_block(candidate)),
        ("Eligibility", eligibility_block(candidate)),
    ];

    sections
        .iter()
        .filter(|(_, body)| !body.is_empty())
        .map(|(label, body)| format!("{label}: {body}"))
        .collect::<Vec<_>>()
        .join(BLOCK_DELIMITER)
}

/// Whole-posting text for the job-side embedding.
pub fn job_text(posting: &JobPosting, level: PositionLevel) -> String {
    let mut parts: Vec<String> = Vec::new();
    for field in [
        posting.position_title.as_deref(),
        posting.department.as_deref(),
    ]
    .iter()
    .flatten()
    {
        parts.push(field.trim().to_string());
    }
    parts.push(format!("{level} level"));
    for field in [
        posting.job_description.as_deref(),
        posting.education_requirements.as_deref(),
        posting.experience_requirements.as_deref(),
        posting.training_requirements.as_deref(),
        posting.eligibility_requirements.as_deref(),
        posting.special_requirements.as_deref(),
    ]
    .iter()
    .flatten()
    {
        let trimmed = field.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }

    parts.join(BLOCK_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EducationEntry, TrainingEntry, WorkEntry};

    fn numbered_education(count: usize) -> Vec<EducationEntry> {
        (0..count)
            .map(|i| EducationEntry {
                degree: Some(format!("Degree {i}")),
                ..EducationEntry::default()
            })
            .collect()
    }

    #[test]
    fn entry_counts_are_bounded() {
        let candidate = CandidateRecord {
            education: numbered_education(10),
            ..CandidateRecord::default()
        };
        let block = education_block(&candidate);
        assert!(block.contains("Degree 3"));
        assert!(!block.contains("Degree 4"));
    }

    #[test]
    fn empty_candidate_builds_empty_profile() {
        assert_eq!(candidate_profile(&CandidateRecord::default()), "");
    }

    #[test]
    fn profile_labels_each_section() {
        let candidate = CandidateRecord {
            education: vec![EducationEntry {
                degree: Some("BS Accountancy".into()),
                ..EducationEntry::default()
            }],
            experience: vec![WorkEntry {
                position: Some("Accountant".into()),
                company: Some("Provincial Treasury".into()),
                ..WorkEntry::default()
            }],
            training: vec![TrainingEntry {
                title: Some("Government Accounting Seminar".into()),
                ..TrainingEntry::default()
            }],
            ..CandidateRecord::default()
        };
        let profile = candidate_profile(&candidate);
        assert!(profile.contains("Education: BS Accountancy"));
        assert!(profile.contains("Experience: Accountant at Provincial Treasury"));
        assert!(profile.contains("Training: Government Accounting Seminar"));
        assert!(!profile.contains("Eligibility:"));
    }

    #[test]
    fn job_text_includes_level_and_requirements() {
        let posting = JobPosting {
            position_title: Some("Budget Officer".into()),
            education_requirements: Some("Bachelor's degree in Accounting".into()),
            ..JobPosting::default()
        };
        let text = job_text(&posting, PositionLevel::Mid);
        assert!(text.contains("Budget Officer"));
        assert!(text.contains("mid level"));
        assert!(text.contains("Bachelor's degree in Accounting"));
    }
}
