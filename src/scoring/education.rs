//! Education category (max 40 points).
//!
//! Base points come from the candidate's highest classified degree level;
//! candidates with doctoral work in progress earn a completion-based bonus on
//! top, capped so the category never exceeds its ceiling.

use crate::keywords::classify_degree_level;
use crate::normalize::fold;
use crate::scoring::weights::CATEGORY_MAXIMA;
use crate::scoring::CategoryScore;
use crate::{CandidateRecord, EducationEntry, EducationLevel};

const BASE_MASTER: f64 = 35.0;
const BASE_BACHELOR: f64 = 30.0;

/// Text of one education entry as seen by the level classifier.
fn entry_text(entry: &EducationEntry) -> String {
    [entry.level.as_deref(), entry.degree.as_deref()]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Highest classified degree level across all education entries.
pub fn highest_level(candidate: &CandidateRecord) -> Option<EducationLevel> {
    candidate
        .education
        .iter()
        .filter_map(|e| classify_degree_level(&entry_text(e)))
        .max()
}

/// Doctoral completion percentage inferred from free-text cues. Entries that
/// mention doctoral study but carry no completion signal report `None` and
/// earn the minimum progress bonus. The PDS level field ("Graduate Studies")
/// is excluded from the scan so its wording cannot read as a completion cue.
fn doctoral_completion_percent(entry: &EducationEntry) -> Option<u32> {
    let text = fold(
        &[
            entry.degree.as_deref(),
            entry.honors.as_deref(),
            entry.year_graduated.as_deref(),
        ]
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" "),
    );
    if text.contains("completed") || text.contains("graduate") {
        return Some(100);
    }
    if text.contains("75%") || text.contains("dissertation") {
        return Some(75);
    }
    if text.contains("50%") || text.contains("comprehensive") {
        return Some(50);
    }
    if text.contains("25%") {
        return Some(25);
    }
    if text.contains("units") {
        return Some(25);
    }
    None
}

fn doctoral_bonus(candidate: &CandidateRecord) -> Option<(f64, String)> {
    let doctoral_entry = candidate
        .education
        .iter()
        .find(|e| classify_degree_level(&entry_text(e)) == Some(EducationLevel::Doctorate))?;

    let (bonus, label) = match doctoral_completion_percent(doctoral_entry) {
        Some(100) => (5.0, "doctoral work complete"),
        Some(p) if p >= 75 => (4.0, "doctoral work >=75% complete"),
        Some(p) if p >= 50 => (3.0, "doctoral work >=50% complete"),
        Some(p) if p >= 25 => (2.0, "doctoral work >=25% complete"),
        _ => (1.0, "doctoral work started"),
    };
    Some((bonus, label.to_string()))
}

pub fn score(candidate: &CandidateRecord) -> CategoryScore {
    let max = CATEGORY_MAXIMA.education;

    let Some(level) = highest_level(candidate) else {
        return CategoryScore::zero(max, "no classifiable education entries");
    };

    let base = if level >= EducationLevel::Master {
        BASE_MASTER
    } else if level >= EducationLevel::Bachelor {
        BASE_BACHELOR
    } else {
        0.0
    };

    if base == 0.0 {
        return CategoryScore::zero(
            max,
            format!("highest level {level} (rank {}) is below bachelor", level.rank()),
        );
    }

    match doctoral_bonus(candidate) {
        Some((bonus, label)) => CategoryScore::new(
            base + bonus,
            max,
            format!("base {base:.0} for {level}, +{bonus:.0} {label}"),
        ),
        None => CategoryScore::new(base, max, format!("base {base:.0} for highest level {level}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: &str, degree: &str) -> EducationEntry {
        EducationEntry {
            level: Some(level.into()),
            degree: Some(degree.into()),
            ..EducationEntry::default()
        }
    }

    fn candidate_with(entries: Vec<EducationEntry>) -> CandidateRecord {
        CandidateRecord {
            education: entries,
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn no_entries_scores_zero() {
        let score = score(&CandidateRecord::default());
        assert_eq!(score.score, 0.0);
        assert_eq!(score.max_possible, 40.0);
    }

    #[test]
    fn bachelor_scores_base_thirty() {
        let candidate = candidate_with(vec![entry("College", "BS Accountancy")]);
        assert_eq!(score(&candidate).score, 30.0);
    }

    #[test]
    fn master_scores_base_thirty_five() {
        let candidate = candidate_with(vec![
            entry("College", "BS Accountancy"),
            entry("Graduate Studies", "Master in Public Administration"),
        ]);
        assert_eq!(score(&candidate).score, 35.0);
    }

    #[test]
    fn sub_bachelor_levels_score_zero() {
        let candidate = candidate_with(vec![entry("Vocational", "Diploma in Welding")]);
        let result = score(&candidate);
        assert_eq!(result.score, 0.0);
        assert!(result.details.contains("below bachelor"));
    }

    #[test]
    fn completed_doctorate_hits_the_cap() {
        let candidate = candidate_with(vec![entry(
            "Graduate Studies",
            "Doctor of Philosophy in Education, completed",
        )]);
        // 35 base (doctorate >= master) + 5 completion = 40.
        assert_eq!(score(&candidate).score, 40.0);
    }

    #[test]
    fn doctoral_progress_bonus_tiers() {
        let cases = [
            ("PhD in Education, dissertation stage", 39.0),
            ("PhD in Education, comprehensive exams passed", 38.0),
            ("PhD in Education, 25% of coursework", 37.0),
            ("PhD units earned", 37.0),
            ("Doctor of Education, enrolled", 36.0),
        ];
        for (degree, expected) in cases {
            let candidate = candidate_with(vec![entry("Graduate Studies", degree)]);
            assert_eq!(score(&candidate).score, expected, "degree: {degree}");
        }
    }

    #[test]
    fn bonus_never_exceeds_category_max() {
        let candidate = candidate_with(vec![
            entry("Graduate Studies", "Doctor of Philosophy, completed"),
            entry("Graduate Studies", "Master of Arts"),
        ]);
        let result = score(&candidate);
        assert!(result.score <= result.max_possible);
    }
}
