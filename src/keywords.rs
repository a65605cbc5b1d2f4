//! Declarative keyword tables for classification.
//!
//! Every table is an ordered list of (pattern set, category) pairs evaluated
//! through `normalize::keyword_hit`, kept separate from the control flow that
//! consumes it. Extending a category means editing data here, not logic.

use std::sync::LazyLock;

use strsim::damerau_levenshtein;

use crate::normalize::{fold, keyword_hit, tokens};
use crate::EducationLevel;

/// Degree keyword → level map, highest level first. Classification takes the
/// first row whose pattern set hits, so "Doctor of Philosophy, MA units
/// earned" resolves to Doctorate, not Master.
pub static DEGREE_LEVEL_TABLE: LazyLock<Vec<(EducationLevel, &'static [&'static str])>> =
    LazyLock::new(|| {
        vec![
            (
                EducationLevel::Doctorate,
                &[
                    "doctorate",
                    "doctoral",
                    "doctor of",
                    "ph.d",
                    "phd",
                    "ed.d",
                    "edd",
                    "dba",
                    "d.sc",
                ][..],
            ),
            (
                EducationLevel::Master,
                &[
                    "master",
                    "masteral",
                    "m.a.",
                    "m.s.",
                    "msc",
                    "mba",
                    "mpa",
                    "llm",
                    "graduate studies",
                ][..],
            ),
            (
                EducationLevel::Bachelor,
                &[
                    "bachelor",
                    "baccalaureate",
                    "college graduate",
                    "college",
                    "bs",
                    "ab",
                    "bsc",
                    "b.s.",
                    "a.b.",
                ][..],
            ),
            (
                EducationLevel::Associate,
                &["associate", "2-year course", "two-year course"][..],
            ),
            (
                EducationLevel::Diploma,
                &["diploma", "vocational", "trade course"][..],
            ),
            (
                EducationLevel::Certificate,
                &["certificate", "certification course", "short course"][..],
            ),
            (
                EducationLevel::Secondary,
                &["high school", "secondary", "junior high", "senior high"][..],
            ),
        ]
    });

/// Classifies a degree/level text through `DEGREE_LEVEL_TABLE`.
pub fn classify_degree_level(text: &str) -> Option<EducationLevel> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    DEGREE_LEVEL_TABLE
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| keyword_hit(trimmed, p)))
        .map(|(level, _)| *level)
}

/// Recognized professional certification / eligibility categories.
pub static CERTIFICATION_TABLE: LazyLock<Vec<(&'static str, &'static [&'static str])>> =
    LazyLock::new(|| {
        vec![
            (
                "RA 1080",
                &["ra 1080", "ra1080", "republic act 1080", "r.a. 1080"][..],
            ),
            (
                "CSC Professional",
                &[
                    "civil service professional",
                    "csc professional",
                    "career service professional",
                    "civil service eligibility",
                    "csc eligibility",
                ][..],
            ),
            (
                "CSC Sub-Professional",
                &[
                    "civil service sub-professional",
                    "civil service subprofessional",
                    "csc sub-professional",
                    "career service sub-professional",
                ][..],
            ),
            (
                "BAR Exam",
                &["bar exam", "bar passer", "bar examination", "attorney", "lawyer"][..],
            ),
            (
                "Board Exam",
                &[
                    "board exam",
                    "board passer",
                    "board examination",
                    "licensure exam",
                    "licensure examination",
                    "prc license",
                    "professional license",
                    "licensed professional",
                ][..],
            ),
        ]
    });

/// Accomplishment categories credited by the accomplishment scorer.
pub static ACCOMPLISHMENT_TABLE: LazyLock<Vec<(&'static str, &'static [&'static str])>> =
    LazyLock::new(|| {
        vec![
            ("Citations", &["citation", "cited"][..]),
            (
                "Recognitions",
                &["recognition", "awardee", "outstanding", "excellence award"][..],
            ),
            (
                "Honor Graduate",
                &[
                    "cum laude",
                    "magna cum laude",
                    "summa cum laude",
                    "honor graduate",
                    "with honors",
                    "with high honors",
                    "valedictorian",
                    "salutatorian",
                ][..],
            ),
            (
                "Board/Bar Topnotcher",
                &["board topnotcher", "bar topnotcher", "topnotcher", "top notcher"][..],
            ),
            (
                "CSC Topnotcher",
                &["csc topnotcher", "civil service topnotcher"][..],
            ),
        ]
    });

/// Fixed subject-area vocabulary used for subject detection and experience
/// relevance. First match in list order wins.
pub static SUBJECT_AREAS: &[&str] = &[
    "information technology",
    "computer science",
    "information systems",
    "education",
    "engineering",
    "accountancy",
    "accounting",
    "business administration",
    "public administration",
    "nursing",
    "agriculture",
    "mathematics",
    "english",
    "psychology",
    "criminology",
    "hospitality management",
    "economics",
    "biology",
];

/// Obligation language that marks a requirement as strict.
pub static OBLIGATION_KEYWORDS: &[&str] =
    &["required", "must have", "mandatory", "essential", "prerequisite"];

/// Title keywords identifying academic teaching roles.
pub static ACADEMIC_TITLE_KEYWORDS: &[&str] =
    &["instructor", "professor", "lecturer", "faculty", "teacher"];

/// Advanced-degree phrases that, combined with a teaching title, also mark a
/// posting as strict.
pub static ADVANCED_DEGREE_KEYWORDS: &[&str] = &[
    "master",
    "masteral",
    "doctorate",
    "doctoral",
    "ph.d",
    "phd",
    "graduate degree",
    "postgraduate",
    "post-graduate",
];

/// Fuzzy membership test against a category's pattern set: exact
/// `keyword_hit` first, then a damerau-levenshtein distance of 1 on tokens of
/// 6+ characters to absorb the typos common in hand-encoded PDS fields.
pub fn fuzzy_category_hit(text: &str, patterns: &[&str]) -> bool {
    if patterns.iter().any(|p| keyword_hit(text, p)) {
        return true;
    }
    let text_tokens = tokens(text);
    patterns.iter().any(|pattern| {
        tokens(pattern).iter().all(|pt| {
            text_tokens
                .iter()
                .any(|tt| tt == pt || (pt.len() >= 6 && damerau_levenshtein(tt, pt) <= 1))
        })
    })
}

/// All certification categories matched by a text, in table order.
pub fn match_certifications(text: &str) -> Vec<&'static str> {
    CERTIFICATION_TABLE
        .iter()
        .filter(|(_, patterns)| fuzzy_category_hit(text, patterns))
        .map(|(name, _)| *name)
        .collect()
}

/// First accomplishment category matched by a text, if any.
pub fn match_accomplishment(text: &str) -> Option<&'static str> {
    ACCOMPLISHMENT_TABLE
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| keyword_hit(text, p)))
        .map(|(name, _)| *name)
}

/// First subject area found in a text, in vocabulary order.
pub fn match_subject_area(text: &str) -> Option<&'static str> {
    let folded = fold(text);
    SUBJECT_AREAS.iter().find(|s| folded.contains(*s)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_table_prefers_highest_level() {
        assert_eq!(
            classify_degree_level("Doctor of Philosophy (units earned toward MA)"),
            Some(EducationLevel::Doctorate)
        );
        assert_eq!(
            classify_degree_level("Master of Public Administration"),
            Some(EducationLevel::Master)
        );
        assert_eq!(
            classify_degree_level("BS Accountancy"),
            Some(EducationLevel::Bachelor)
        );
        assert_eq!(classify_degree_level(""), None);
        assert_eq!(classify_degree_level("no formal schooling"), None);
    }

    #[test]
    fn certification_table_collects_all_matches() {
        let matches =
            match_certifications("Civil Service Professional; CPA Board Exam passer");
        assert!(matches.contains(&"CSC Professional"));
        assert!(matches.contains(&"Board Exam"));
    }

    #[test]
    fn fuzzy_hit_tolerates_single_typo() {
        assert!(fuzzy_category_hit(
            "civil service proffesional",
            &["civil service professional"]
        ));
        assert!(!fuzzy_category_hit("completely unrelated", &["board exam"]));
    }

    #[test]
    fn accomplishment_matching_covers_honors() {
        assert_eq!(
            match_accomplishment("Graduated Magna Cum Laude"),
            Some("Honor Graduate")
        );
        assert_eq!(
            match_accomplishment("CPA board topnotcher 2018"),
            Some("Board/Bar Topnotcher")
        );
        assert_eq!(match_accomplishment("attended a seminar"), None);
    }

    #[test]
    fn subject_area_uses_list_order() {
        assert_eq!(
            match_subject_area("BS in Information Technology"),
            Some("information technology")
        );
        assert_eq!(match_subject_area("totally unrelated text"), None);
    }
}
