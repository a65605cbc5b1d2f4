//! Accomplishments category (max 5 points, binary).

use crate::keywords::match_accomplishment;
use crate::scoring::weights::CATEGORY_MAXIMA;
use crate::scoring::CategoryScore;
use crate::CandidateRecord;

/// Accomplishment evidence comes from awards, voluntary work, the
/// other-information lines, and education honors.
fn accomplishment_texts(candidate: &CandidateRecord) -> Vec<&str> {
    candidate
        .awards
        .iter()
        .map(String::as_str)
        .chain(candidate.voluntary_work.iter().map(String::as_str))
        .chain(candidate.other_information.iter().map(String::as_str))
        .chain(
            candidate
                .education
                .iter()
                .filter_map(|e| e.honors.as_deref()),
        )
        .collect()
}

pub fn score(candidate: &CandidateRecord) -> CategoryScore {
    let max = CATEGORY_MAXIMA.accomplishments;

    let mut matched: Vec<&'static str> = Vec::new();
    for text in accomplishment_texts(candidate) {
        if let Some(category) = match_accomplishment(text) {
            if !matched.contains(&category) {
                matched.push(category);
            }
        }
    }

    if matched.is_empty() {
        CategoryScore::zero(max, "no recognized accomplishments")
    } else {
        CategoryScore::new(max, max, format!("recognized: {}", matched.join(", ")))
    }
}
