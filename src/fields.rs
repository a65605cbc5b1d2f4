//! Ordered-fallback field resolution for JSON-like intake payloads.
//!
//! PDS exports and job-posting feeds disagree on field names
//! (`educational_background` vs `education_data` vs `education`). All synonym
//! handling lives in this adapter: each logical field has one ordered
//! fallback list, tried first-to-last, and the rest of the crate only ever
//! sees the normalized `CandidateRecord` / `JobPosting` structs.

use serde_json::{Map, Value};

use crate::error::AssessmentError;
use crate::{
    CandidateRecord, EducationEntry, EligibilityEntry, JobPosting, TrainingEntry, WorkEntry,
};

const EDUCATION_KEYS: &[&str] = &["educational_background", "education_data", "education"];
const EXPERIENCE_KEYS: &[&str] = &[
    "work_experience",
    "experience_data",
    "experience",
    "employment_history",
];
const TRAINING_KEYS: &[&str] = &[
    "learning_development",
    "training_data",
    "trainings",
    "training",
];
const ELIGIBILITY_KEYS: &[&str] = &[
    "civil_service_eligibility",
    "eligibility_data",
    "eligibilities",
    "eligibility",
];
const AWARD_KEYS: &[&str] = &["awards", "accomplishments", "recognitions"];
const VOLUNTARY_KEYS: &[&str] = &["voluntary_work", "volunteer_work"];
const OTHER_INFO_KEYS: &[&str] = &["other_information", "other_info", "special_skills"];
const NAME_KEYS: &[&str] = &["full_name", "name", "candidate_name"];

const TITLE_KEYS: &[&str] = &["position_title", "title", "position"];
const DEPARTMENT_KEYS: &[&str] = &["department", "office", "agency"];
const EDUCATION_REQ_KEYS: &[&str] = &[
    "education_requirements",
    "educational_requirements",
    "education",
];
const EXPERIENCE_REQ_KEYS: &[&str] = &["experience_requirements", "experience"];
const TRAINING_REQ_KEYS: &[&str] = &["training_requirements", "training"];
const ELIGIBILITY_REQ_KEYS: &[&str] = &["eligibility_requirements", "eligibility"];
const SPECIAL_REQ_KEYS: &[&str] = &["special_requirements", "other_requirements"];
const DESCRIPTION_KEYS: &[&str] = &["job_description", "description", "duties"];
const SALARY_GRADE_KEYS: &[&str] = &["salary_grade", "sg", "grade"];

/// First present value among the fallback keys, in list order.
fn resolve<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

/// Resolves a field to owned text. Numbers are stringified so payloads that
/// encode `salary_grade: 16` still resolve.
fn resolve_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match resolve(map, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolves a field to a list of values. A scalar resolves as a one-element
/// list so `"awards": "Employee of the Year"` is tolerated.
fn resolve_list<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Vec<&'a Value> {
    match resolve(map, keys) {
        Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).collect(),
        Some(other) => vec![other],
        None => Vec::new(),
    }
}

fn entry_text(value: &Value, keys: &[&str]) -> Option<String> {
    value.as_object().and_then(|map| resolve_text(map, keys))
}

/// A collection item is either an object or a bare string; bare strings map
/// onto the entry's primary text field.
fn string_items(values: &[&Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Object(map) => resolve_text(map, &["title", "name", "description", "text"]),
            _ => None,
        })
        .collect()
}

fn education_entry(value: &Value) -> EducationEntry {
    match value {
        Value::String(s) => EducationEntry {
            degree: Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            ..EducationEntry::default()
        },
        _ => EducationEntry {
            level: entry_text(value, &["level", "education_level"]),
            degree: entry_text(value, &["degree", "course", "degree_course", "basic_education"]),
            institution: entry_text(value, &["institution", "school", "school_name"]),
            honors: entry_text(value, &["honors", "honours", "scholarship", "academic_honors"]),
            year_graduated: entry_text(value, &["year_graduated", "graduated", "to"]),
        },
    }
}

fn work_entry(value: &Value) -> WorkEntry {
    match value {
        Value::String(s) => WorkEntry {
            position: Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            ..WorkEntry::default()
        },
        _ => WorkEntry {
            position: entry_text(value, &["position", "position_title", "title"]),
            company: entry_text(value, &["company", "agency", "employer", "office"]),
            date_from: entry_text(value, &["date_from", "from", "start_date", "started"]),
            date_to: entry_text(value, &["date_to", "to", "end_date", "ended"]),
        },
    }
}

fn training_entry(value: &Value) -> TrainingEntry {
    match value {
        Value::String(s) => TrainingEntry {
            title: Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            ..TrainingEntry::default()
        },
        _ => TrainingEntry {
            title: entry_text(value, &["title", "training_title", "name"]),
            training_type: entry_text(value, &["type", "training_type"]),
            hours: entry_text(value, &["hours", "number_of_hours", "duration"]),
            conducted_by: entry_text(value, &["conducted_by", "conductor", "sponsor"]),
        },
    }
}

fn eligibility_entry(value: &Value) -> EligibilityEntry {
    match value {
        Value::String(s) => EligibilityEntry {
            name: Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            ..EligibilityEntry::default()
        },
        _ => EligibilityEntry {
            name: entry_text(value, &["name", "eligibility", "title"]),
            rating: entry_text(value, &["rating", "score"]),
            license_number: entry_text(value, &["license_number", "license_no", "license"]),
        },
    }
}

/// Builds a `CandidateRecord` from a JSON payload. Fails only when the
/// payload is not an object at all; every missing or oddly-shaped field
/// inside degrades to empty.
pub fn candidate_from_value(value: &Value) -> Result<CandidateRecord, AssessmentError> {
    let map = value.as_object().ok_or_else(|| {
        AssessmentError::InvalidCandidate("candidate payload is not a JSON object".into())
    })?;

    Ok(CandidateRecord {
        name: resolve_text(map, NAME_KEYS),
        education: resolve_list(map, EDUCATION_KEYS)
            .into_iter()
            .map(education_entry)
            .collect(),
        experience: resolve_list(map, EXPERIENCE_KEYS)
            .into_iter()
            .map(work_entry)
            .collect(),
        training: resolve_list(map, TRAINING_KEYS)
            .into_iter()
            .map(training_entry)
            .collect(),
        eligibility: resolve_list(map, ELIGIBILITY_KEYS)
            .into_iter()
            .map(eligibility_entry)
            .collect(),
        awards: string_items(&resolve_list(map, AWARD_KEYS)),
        voluntary_work: string_items(&resolve_list(map, VOLUNTARY_KEYS)),
        other_information: string_items(&resolve_list(map, OTHER_INFO_KEYS)),
    })
}

/// Builds a `JobPosting` from a JSON payload, same contract as
/// `candidate_from_value`.
pub fn posting_from_value(value: &Value) -> Result<JobPosting, AssessmentError> {
    let map = value.as_object().ok_or_else(|| {
        AssessmentError::InvalidPosting("posting payload is not a JSON object".into())
    })?;

    Ok(JobPosting {
        position_title: resolve_text(map, TITLE_KEYS),
        department: resolve_text(map, DEPARTMENT_KEYS),
        education_requirements: resolve_text(map, EDUCATION_REQ_KEYS),
        experience_requirements: resolve_text(map, EXPERIENCE_REQ_KEYS),
        training_requirements: resolve_text(map, TRAINING_REQ_KEYS),
        eligibility_requirements: resolve_text(map, ELIGIBILITY_REQ_KEYS),
        special_requirements: resolve_text(map, SPECIAL_REQ_KEYS),
        job_description: resolve_text(map, DESCRIPTION_KEYS),
        salary_grade: resolve_text(map, SALARY_GRADE_KEYS),
    })
}
