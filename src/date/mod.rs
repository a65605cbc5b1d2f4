//! Flexible parsing for the date strings found in PDS work-history fields.
//!
//! Encoders type dates in whatever format the source document used, so the
//! parser accepts a cascade of layouts and falls back to a bare-year search
//! before giving up. An unresolvable date never errors; the caller treats it
//! as "no duration evidence".

use chrono::{Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 2020-05 / 2020/05
    static ref YEAR_MONTH_RE: Regex = Regex::new(r"^(\d{4})[-/](\d{1,2})$").unwrap();
    // 05/2020
    static ref MONTH_YEAR_RE: Regex = Regex::new(r"^(\d{1,2})[-/](\d{4})$").unwrap();
    // January 2020 / Jan. 2020 / Jan 2020
    static ref MONTH_NAME_RE: Regex =
        Regex::new(r"(?i)^([a-z]+)\.?,?\s+(\d{4})$").unwrap();
    // bare 4-digit year anywhere in the text (last-resort)
    static ref ANY_YEAR_RE: Regex = Regex::new(r"\b((?:19|20)\d{2})\b").unwrap();
    static ref PRESENT_RE: Regex = Regex::new(r"(?i)^(present|current|to date|ongoing)$").unwrap();
}

const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
];

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(full, _)| *full == lower || full.starts_with(&lower) && lower.len() >= 3)
        .map(|(_, n)| *n)
}

/// Parses a raw date string through the accepted layout cascade:
/// `YYYY-MM-DD[ HH:MM:SS]`, `MM/DD/YYYY`, `DD/MM/YYYY`, `YYYY-MM`,
/// `MM/YYYY`, `Month YYYY` (full or 3+-letter abbreviation), bare `YYYY`,
/// and finally any embedded 4-digit year. Returns `None` only when no year
/// can be recovered at all.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(dt) =
            chrono::NaiveDateTime::parse_from_str(trimmed, format).map(|dt| dt.date())
        {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d);
        }
    }

    // Slash dates: US order first, then day-first as typed in older forms.
    for format in ["%m/%d/%Y", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d);
        }
    }

    if let Some(caps) = YEAR_MONTH_RE.captures(trimmed) {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    if let Some(caps) = MONTH_YEAR_RE.captures(trimmed) {
        let month: u32 = caps.get(1)?.as_str().parse().ok()?;
        let year: i32 = caps.get(2)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    if let Some(caps) = MONTH_NAME_RE.captures(trimmed) {
        let month = month_from_name(caps.get(1)?.as_str())?;
        let year: i32 = caps.get(2)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    if let Ok(year) = trimmed.parse::<i32>() {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }

    // Last resort: any embedded 4-digit year.
    if let Some(caps) = ANY_YEAR_RE.captures(trimmed) {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}

/// Resolves an end-date string. "present" (and friends), an absent value, or
/// an unparsable value all resolve to `today`, matching the lenient handling
/// of open-ended employment rows.
pub fn resolve_end_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    match raw {
        None => today,
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() || PRESENT_RE.is_match(trimmed) {
                today
            } else {
                parse_date(trimmed).unwrap_or(today)
            }
        }
    }
}

/// Whole months between two dates, clamped at zero for inverted ranges.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let span = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    span.max(0)
}

/// Month span of one work entry. `None` when the start date cannot be
/// resolved; such entries contribute zero months by construction.
pub fn span_months(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> Option<i64> {
    let start = parse_date(from?.trim())?;
    let end = resolve_end_date(to, today);
    Some(months_between(start, end))
}

/// Today per the system clock; isolated so duration logic stays testable
/// against fixed dates.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
