pub mod api;
pub mod assessment;
pub mod compliance;
pub mod date;
pub mod error;
pub mod fields;
pub mod keywords;
pub mod logging;
pub mod normalize;
pub mod requirements;
pub mod run_id;
pub mod scoring;
pub mod semantic;

use strum::{Display, EnumString};

/// Degree-level hierarchy shared by the requirement parser, the rule scorers
/// and the compliance checker. Ordering follows the numeric rank, so
/// `level >= EducationLevel::Master` reads as "Master's or better".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum EducationLevel {
    Secondary,
    Certificate,
    Diploma,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    /// Numeric rank (secondary=1 .. doctorate=7) used in detail strings.
    pub fn rank(self) -> u8 {
        match self {
            EducationLevel::Secondary => 1,
            EducationLevel::Certificate => 2,
            EducationLevel::Diploma => 3,
            EducationLevel::Associate => 4,
            EducationLevel::Bachelor => 5,
            EducationLevel::Master => 6,
            EducationLevel::Doctorate => 7,
        }
    }
}

// Commonly used data models for assessment functions.

/// One education line of a PDS. Every field is optional; an empty entry
/// simply contributes nothing to any score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationEntry {
    /// PDS level text, e.g. "College", "Graduate Studies".
    pub level: Option<String>,
    /// Degree or course text, e.g. "Bachelor of Science in Accountancy".
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub honors: Option<String>,
    pub year_graduated: Option<String>,
}

/// One work-experience line of a PDS. Date fields stay raw strings; the
/// `date` module resolves them when durations are needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkEntry {
    pub position: Option<String>,
    pub company: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingEntry {
    pub title: Option<String>,
    pub training_type: Option<String>,
    /// Raw hours text, e.g. "40 hrs" or "24".
    pub hours: Option<String>,
    pub conducted_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityEntry {
    pub name: Option<String>,
    pub rating: Option<String>,
    pub license_number: Option<String>,
}

/// Structured candidate record assembled from a PDS payload.
///
/// Collections default to empty; absence of data is "no data", never an
/// error anywhere downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<WorkEntry>,
    pub training: Vec<TrainingEntry>,
    pub eligibility: Vec<EligibilityEntry>,
    pub awards: Vec<String>,
    pub voluntary_work: Vec<String>,
    pub other_information: Vec<String>,
}

/// Free-text job posting as published. Parsed once per assessment into
/// `requirements::ParsedRequirements`; never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPosting {
    pub position_title: Option<String>,
    pub department: Option<String>,
    pub education_requirements: Option<String>,
    pub experience_requirements: Option<String>,
    pub training_requirements: Option<String>,
    pub eligibility_requirements: Option<String>,
    pub special_requirements: Option<String>,
    pub job_description: Option<String>,
    /// Salary grade text, e.g. "SG 16"; drives the position-level bucket.
    pub salary_grade: Option<String>,
}
