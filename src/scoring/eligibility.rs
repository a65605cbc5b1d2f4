//! Eligibility category (max 10 points, binary).
//!
//! Any recognized civil-service, bar, or board eligibility earns full
//! credit; the rule is a gate, not a ladder.

use crate::keywords::match_certifications;
use crate::scoring::weights::CATEGORY_MAXIMA;
use crate::scoring::CategoryScore;
use crate::CandidateRecord;

/// Eligibility strings from every field that can carry one: the eligibility
/// entries themselves plus the free-form other-information lines.
fn eligibility_texts(candidate: &CandidateRecord) -> Vec<&str> {
    candidate
        .eligibility
        .iter()
        .filter_map(|e| e.name.as_deref())
        .chain(candidate.other_information.iter().map(String::as_str))
        .collect()
}

pub fn score(candidate: &CandidateRecord) -> CategoryScore {
    let max = CATEGORY_MAXIMA.eligibility;

    let mut matched: Vec<&'static str> = Vec::new();
    for text in eligibility_texts(candidate) {
        for category in match_certifications(text) {
            if !matched.contains(&category) {
                matched.push(category);
            }
        }
    }

    if matched.is_empty() {
        CategoryScore::zero(max, "no recognized eligibility")
    } else {
        CategoryScore::new(max, max, format!("recognized: {}", matched.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EligibilityEntry;

    fn candidate_with_eligibility(name: &str) -> CandidateRecord {
        CandidateRecord {
            eligibility: vec![EligibilityEntry {
                name: Some(name.into()),
                ..EligibilityEntry::default()
            }],
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn csc_professional_earns_full_credit() {
        let candidate =
            candidate_with_eligibility("Civil Service Eligibility - Professional");
        let result = score(&candidate);
        assert_eq!(result.score, 10.0);
        assert!(result.details.contains("CSC Professional"));
    }

    #[test]
    fn rule_is_binary_not_cumulative() {
        let candidate = CandidateRecord {
            eligibility: vec![
                EligibilityEntry {
                    name: Some("Career Service Professional".into()),
                    ..EligibilityEntry::default()
                },
                EligibilityEntry {
                    name: Some("CPA Board Exam".into()),
                    ..EligibilityEntry::default()
                },
            ],
            ..CandidateRecord::default()
        };
        assert_eq!(score(&candidate).score, 10.0);
    }

    #[test]
    fn other_information_is_also_scanned() {
        let candidate = CandidateRecord {
            other_information: vec!["Passed the RA 1080 board examination".into()],
            ..CandidateRecord::default()
        };
        assert_eq!(score(&candidate).score, 10.0);
    }

    #[test]
    fn unrecognized_text_scores_zero() {
        let candidate = candidate_with_eligibility("Barangay Clearance");
        assert_eq!(score(&candidate).score, 0.0);
    }

    #[test]
    fn empty_candidate_scores_zero() {
        assert_eq!(score(&CandidateRecord::default()).score, 0.0);
    }
}
