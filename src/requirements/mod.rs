//! Parses free-text job posting fields into structured requirements.
//!
//! Everything here is deterministic text classification over the declarative
//! tables in `keywords`; the same posting always parses to the same
//! `ParsedRequirements`. The strictness keyword lists are configuration data
//! (`ParserConfig`) so they can be tuned without code changes.

use lazy_static::lazy_static;
use regex::Regex;
use strum::Display;

use crate::keywords::{
    self, classify_degree_level, ACADEMIC_TITLE_KEYWORDS, ADVANCED_DEGREE_KEYWORDS,
    OBLIGATION_KEYWORDS,
};
use crate::normalize::{fold, tokens};
use crate::{EducationLevel, JobPosting};

lazy_static! {
    // "3 years", "5+ yrs", "10 year"
    static ref EXPERIENCE_YEARS_RE: Regex =
        Regex::new(r"(?i)(\d+)\s*\+?\s*(?:years?|yrs?)").unwrap();
    static ref NO_EXPERIENCE_RE: Regex =
        Regex::new(r"(?i)(no experience|fresh graduate|none required|not required)").unwrap();
    static ref SALARY_GRADE_RE: Regex = Regex::new(r"(\d{1,2})").unwrap();
}

/// Position seniority bucket derived from the salary grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PositionLevel {
    Entry,
    Mid,
    Senior,
}

/// The two posting categories subject to the hard Master's-degree override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SpecialCategory {
    Instructor1,
    PartTimeInstructor,
}

/// Parsed education requirement. `is_strict` gates the heaviest semantic
/// penalty in strict mode.
#[derive(Debug, Clone, PartialEq)]
pub struct EducationRequirement {
    pub min_level: EducationLevel,
    pub subject_area: Option<String>,
    pub is_strict: bool,
    /// Whether the posting actually stated an education requirement; an
    /// unstated requirement is never counted against compliance.
    pub stated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequirements {
    pub education: EducationRequirement,
    pub required_experience_years: u32,
    pub required_certifications: Vec<String>,
    pub position_level: PositionLevel,
    /// Strict mode flag: compliance penalties apply only when set.
    pub strict: bool,
    /// Set only when the posting is one of the special categories AND
    /// requires a Master's-level degree.
    pub special_category: Option<SpecialCategory>,
}

/// Strictness keyword lists, overridable via environment so tuning the
/// heuristic needs no code change.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub obligation_keywords: Vec<String>,
    pub academic_title_keywords: Vec<String>,
    pub advanced_degree_keywords: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            obligation_keywords: OBLIGATION_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            academic_title_keywords: ACADEMIC_TITLE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            advanced_degree_keywords: ADVANCED_DEGREE_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ParserConfig {
    /// Loads the default lists, replacing any that have a comma-separated
    /// env override (`PM_OBLIGATION_KEYWORDS`, `PM_ACADEMIC_TITLE_KEYWORDS`,
    /// `PM_ADVANCED_DEGREE_KEYWORDS`).
    pub fn load_from_env() -> Self {
        let mut config = Self::default();
        if let Some(list) = env_keyword_list("PM_OBLIGATION_KEYWORDS") {
            config.obligation_keywords = list;
        }
        if let Some(list) = env_keyword_list("PM_ACADEMIC_TITLE_KEYWORDS") {
            config.academic_title_keywords = list;
        }
        if let Some(list) = env_keyword_list("PM_ADVANCED_DEGREE_KEYWORDS") {
            config.advanced_degree_keywords = list;
        }
        config
    }
}

fn env_keyword_list(name: &str) -> Option<Vec<String>> {
    let raw = std::env::var(name).ok()?;
    let list: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    (!list.is_empty()).then_some(list)
}

pub struct RequirementParser {
    config: ParserConfig,
}

impl Default for RequirementParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl RequirementParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parses one posting into structured requirements.
    pub fn parse(&self, posting: &JobPosting) -> ParsedRequirements {
        let title = posting.position_title.as_deref().unwrap_or("");
        let education_text = posting.education_requirements.as_deref().unwrap_or("");

        let education_stated = !education_text.trim().is_empty();
        let min_level = classify_education_requirement(education_text);
        let subject_area = detect_subject_area(education_text, title);

        let academic_advanced = self.is_academic_with_advanced_degree(title, education_text);
        let education_is_strict =
            self.has_obligation_language(education_text) || academic_advanced;
        let strict = self.has_obligation_language(&posting_requirement_text(posting))
            || academic_advanced;

        let special_category = detect_special_category(title, min_level);

        ParsedRequirements {
            education: EducationRequirement {
                min_level,
                subject_area,
                is_strict: education_is_strict,
                stated: education_stated,
            },
            required_experience_years: parse_experience_years(
                posting.experience_requirements.as_deref(),
            ),
            required_certifications: keywords::match_certifications(
                posting.eligibility_requirements.as_deref().unwrap_or(""),
            )
            .into_iter()
            .map(|s| s.to_string())
            .collect(),
            position_level: position_level_from_salary_grade(posting.salary_grade.as_deref()),
            strict,
            special_category,
        }
    }

    fn has_obligation_language(&self, text: &str) -> bool {
        let folded = fold(text);
        self.config
            .obligation_keywords
            .iter()
            .any(|k| folded.contains(k.as_str()))
    }

    fn is_academic_with_advanced_degree(&self, title: &str, education_text: &str) -> bool {
        let folded_title = fold(title);
        let folded_education = fold(education_text);
        self.config
            .academic_title_keywords
            .iter()
            .any(|k| folded_title.contains(k.as_str()))
            && self
                .config
                .advanced_degree_keywords
                .iter()
                .any(|k| folded_education.contains(k.as_str()))
    }
}

/// Education level classification: table scan in priority order, defaulting
/// to Bachelor whether or not the text matched anything.
fn classify_education_requirement(text: &str) -> EducationLevel {
    classify_degree_level(text).unwrap_or(EducationLevel::Bachelor)
}

/// Years of experience from free text: first `N years`/`N yrs` number wins;
/// explicit no-experience phrasing wins over nothing; text without a number
/// still implies one year.
fn parse_experience_years(text: Option<&str>) -> u32 {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return 0;
    };
    if let Some(caps) = EXPERIENCE_YEARS_RE.captures(text) {
        return caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1);
    }
    if NO_EXPERIENCE_RE.is_match(text) {
        return 0;
    }
    1
}

/// Salary grade thresholds: >=24 senior, >=15 mid, else entry.
fn position_level_from_salary_grade(text: Option<&str>) -> PositionLevel {
    let grade = text
        .and_then(|t| SALARY_GRADE_RE.captures(t))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    if grade >= 24 {
        PositionLevel::Senior
    } else if grade >= 15 {
        PositionLevel::Mid
    } else {
        PositionLevel::Entry
    }
}

/// Subject area: education text first, position title as fallback.
fn detect_subject_area(education_text: &str, title: &str) -> Option<String> {
    keywords::match_subject_area(education_text)
        .or_else(|| keywords::match_subject_area(title))
        .map(|s| s.to_string())
}

/// Special-category detection. Only postings that also require a Master's
/// degree are flagged; these are the sole targets of the hard education
/// override downstream.
fn detect_special_category(
    title: &str,
    min_level: EducationLevel,
) -> Option<SpecialCategory> {
    if min_level < EducationLevel::Master {
        return None;
    }
    let folded = fold(title);
    let title_tokens = tokens(title);
    let has_instructor = title_tokens.iter().any(|t| t == "instructor");

    let part_time = has_instructor
        && (folded.contains("part-time")
            || folded.contains("part time")
            || folded.contains("adjunct")
            || folded.contains("visiting"));
    if part_time {
        return Some(SpecialCategory::PartTimeInstructor);
    }

    let instructor_1 = has_instructor
        && title_tokens.iter().any(|t| t == "1" || t == "i");
    if instructor_1 {
        return Some(SpecialCategory::Instructor1);
    }

    None
}

fn posting_requirement_text(posting: &JobPosting) -> String {
    [
        posting.education_requirements.as_deref(),
        posting.experience_requirements.as_deref(),
        posting.training_requirements.as_deref(),
        posting.eligibility_requirements.as_deref(),
        posting.special_requirements.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" ")
}
