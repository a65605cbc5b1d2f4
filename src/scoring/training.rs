//! Training category (max 10 points).
//!
//! Hours are parsed from free text ("40 hrs", "24 hours", "16"); a training
//! entry with a title but no parsable hours is credited a default 8-hour
//! session rather than dropped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::scoring::weights::CATEGORY_MAXIMA;
use crate::scoring::CategoryScore;
use crate::{CandidateRecord, TrainingEntry};

lazy_static! {
    static ref HOURS_RE: Regex = Regex::new(r"(\d+)").unwrap();
}

/// Default credit for a titled training with unparsable hours.
const DEFAULT_SESSION_HOURS: i64 = 8;

fn entry_hours(entry: &TrainingEntry) -> i64 {
    let has_title = entry
        .title
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);

    let parsed = entry
        .hours
        .as_deref()
        .and_then(|h| HOURS_RE.captures(h))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok());

    match parsed {
        Some(hours) => hours,
        None if has_title => DEFAULT_SESSION_HOURS,
        None => 0,
    }
}

pub fn score(candidate: &CandidateRecord) -> CategoryScore {
    let max = CATEGORY_MAXIMA.training;

    if candidate.training.is_empty() {
        return CategoryScore::zero(max, "no training entries");
    }

    let total_hours: i64 = candidate.training.iter().map(entry_hours).sum();

    let (points, label) = if total_hours >= 40 {
        let bonus = (((total_hours - 40) / 8) as f64).min(5.0);
        (5.0 + bonus, ">=40 hours")
    } else if total_hours >= 20 {
        (3.0, ">=20 hours")
    } else if total_hours >= 8 {
        (1.0, ">=8 hours")
    } else {
        (0.0, "<8 hours")
    };

    CategoryScore::new(
        points,
        max,
        format!(
            "{total_hours} training hours across {} entries ({label})",
            candidate.training.len()
        ),
    )
}
