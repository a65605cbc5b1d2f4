//! Experience category (max 20 points).
//!
//! Durations come from resolvable start dates only; entries whose start date
//! cannot be parsed contribute zero months. When the posting names a subject
//! area, the tier is computed over the relevant subset first and falls back
//! to total service when nothing matches.

use chrono::NaiveDate;

use crate::date::span_months;
use crate::normalize::fold;
use crate::requirements::ParsedRequirements;
use crate::scoring::weights::CATEGORY_MAXIMA;
use crate::scoring::CategoryScore;
use crate::{CandidateRecord, WorkEntry};

/// Relevance test: subject-area keyword containment over position and
/// company text. No subject area means every entry is relevant.
fn is_relevant(entry: &WorkEntry, subject_area: Option<&str>) -> bool {
    let Some(subject) = subject_area else {
        return true;
    };
    let subject = fold(subject);
    let text = fold(&format!(
        "{} {}",
        entry.position.as_deref().unwrap_or(""),
        entry.company.as_deref().unwrap_or("")
    ));
    // Any token of the subject counts; "information technology" should hit
    // an "IT Officer / Information Systems Analyst" entry.
    subject
        .split_whitespace()
        .any(|token| token.len() >= 4 && text.contains(token))
        || text.contains(&subject)
}

fn months(entries: &[&WorkEntry], today: NaiveDate) -> i64 {
    entries
        .iter()
        .filter_map(|e| span_months(e.date_from.as_deref(), e.date_to.as_deref(), today))
        .sum()
}

/// Total service years across all entries with a resolvable start date.
pub fn total_years(candidate: &CandidateRecord, today: NaiveDate) -> f64 {
    let all: Vec<&WorkEntry> = candidate.experience.iter().collect();
    months(&all, today) as f64 / 12.0
}

fn tier(years: f64) -> (f64, &'static str) {
    if years >= 10.0 {
        // 15 base plus one point per full year beyond ten; the category
        // ceiling clamps the net result at 20.
        (15.0 + (years - 10.0).floor(), ">=10 years")
    } else if years >= 5.0 {
        (15.0, ">=5 years")
    } else if years >= 3.0 {
        (10.0, ">=3 years")
    } else if years >= 1.0 {
        (5.0, ">=1 year")
    } else {
        (0.0, "<1 year")
    }
}

pub fn score(
    candidate: &CandidateRecord,
    requirements: &ParsedRequirements,
    today: NaiveDate,
) -> CategoryScore {
    let max = CATEGORY_MAXIMA.experience;

    if candidate.experience.is_empty() {
        return CategoryScore::zero(max, "no work experience entries");
    }

    let subject = requirements.education.subject_area.as_deref();
    let relevant: Vec<&WorkEntry> = candidate
        .experience
        .iter()
        .filter(|e| is_relevant(e, subject))
        .collect();

    let total_months = {
        let all: Vec<&WorkEntry> = candidate.experience.iter().collect();
        months(&all, today)
    };
    let relevant_months = months(&relevant, today);

    let relevant_years = relevant_months as f64 / 12.0;
    let total_years = total_months as f64 / 12.0;
    let (years, basis) = if relevant_years > 0.0 {
        (relevant_years, "relevant")
    } else {
        (total_years, "total")
    };

    let (points, label) = tier(years);
    CategoryScore::new(
        points,
        max,
        format!("{years:.1} {basis} years ({label}); total service {total_years:.1} years"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::RequirementParser;
    use crate::JobPosting;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn requirements_with_subject(subject_text: &str) -> ParsedRequirements {
        RequirementParser::default().parse(&JobPosting {
            position_title: Some("Officer".into()),
            education_requirements: Some(subject_text.into()),
            experience_requirements: Some("5 years experience".into()),
            ..JobPosting::default()
        })
    }

    fn entry(position: &str, from: &str, to: &str) -> WorkEntry {
        WorkEntry {
            position: Some(position.into()),
            company: Some("Provincial Government".into()),
            date_from: Some(from.into()),
            date_to: Some(to.into()),
        }
    }

    fn candidate_with(entries: Vec<WorkEntry>) -> CandidateRecord {
        CandidateRecord {
            experience: entries,
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn twelve_relevant_years_score_seventeen() {
        let candidate = candidate_with(vec![entry(
            "Information Technology Officer",
            "2012-01",
            "2024-01",
        )]);
        let requirements =
            requirements_with_subject("Bachelor's degree in Information Technology");
        let result = score(&candidate, &requirements, fixed_today());
        assert_eq!(result.score, 17.0);
    }

    #[test]
    fn tiers_match_the_point_table() {
        let cases = [
            (("2018-01", "2024-01"), 15.0), // 6 years
            (("2020-06", "2024-01"), 10.0), // 3.6 years
            (("2022-06", "2024-01"), 5.0),  // 1.6 years
            (("2023-10", "2024-01"), 0.0),  // 3 months
        ];
        let requirements = requirements_with_subject("any degree");
        for ((from, to), expected) in cases {
            let candidate = candidate_with(vec![entry("Clerk", from, to)]);
            let result = score(&candidate, &requirements, fixed_today());
            assert_eq!(result.score, expected, "{from}..{to}");
        }
    }

    #[test]
    fn long_tenure_is_capped_at_twenty() {
        let candidate = candidate_with(vec![entry("Clerk", "1995-01", "2024-01")]);
        let requirements = requirements_with_subject("any degree");
        let result = score(&candidate, &requirements, fixed_today());
        assert_eq!(result.score, 20.0);
    }

    #[test]
    fn more_experience_never_scores_less() {
        let requirements = requirements_with_subject("any degree");
        let two_years = score(
            &candidate_with(vec![entry("Clerk", "2022-01", "2024-01")]),
            &requirements,
            fixed_today(),
        );
        let six_years = score(
            &candidate_with(vec![entry("Clerk", "2018-01", "2024-01")]),
            &requirements,
            fixed_today(),
        );
        assert!(six_years.score >= two_years.score);
    }

    #[test]
    fn irrelevant_experience_falls_back_to_total() {
        let candidate = candidate_with(vec![entry("Farm Supervisor", "2018-01", "2024-01")]);
        let requirements = requirements_with_subject("BS in Information Technology");
        let result = score(&candidate, &requirements, fixed_today());
        // Nothing relevant; six total years still earn the >=5y tier.
        assert_eq!(result.score, 15.0);
        assert!(result.details.contains("total"));
    }

    #[test]
    fn unresolvable_dates_contribute_nothing() {
        let candidate = candidate_with(vec![
            WorkEntry {
                position: Some("Clerk".into()),
                company: None,
                date_from: Some("unknown".into()),
                date_to: Some("also unknown".into()),
            },
            entry("Clerk", "2023-01", "2024-01"),
        ]);
        let requirements = requirements_with_subject("any degree");
        let result = score(&candidate, &requirements, fixed_today());
        assert_eq!(result.score, 5.0);
    }

    #[test]
    fn empty_experience_scores_zero() {
        let requirements = requirements_with_subject("any degree");
        let result = score(&CandidateRecord::default(), &requirements, fixed_today());
        assert_eq!(result.score, 0.0);
    }
}
