//! Boundary errors for the assessment engine.
//!
//! Interior scoring code never errors for data-shape issues; it substitutes
//! defaults. This enum exists for the top-level boundary only, where an
//! `assess` call converts any failure into a degraded error result instead
//! of propagating.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("invalid candidate payload: {0}")]
    InvalidCandidate(String),
    #[error("invalid posting payload: {0}")]
    InvalidPosting(String),
    #[error("embedding cache I/O: {0}")]
    Cache(#[from] std::io::Error),
    #[error("internal assessment failure: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_identify_the_failing_side() {
        let err = AssessmentError::InvalidCandidate("not an object".into());
        assert!(err.to_string().contains("candidate"));

        let err = AssessmentError::InvalidPosting("not an object".into());
        assert!(err.to_string().contains("posting"));
    }

    #[test]
    fn io_errors_convert_into_cache_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AssessmentError = io.into();
        assert!(matches!(err, AssessmentError::Cache(_)));
    }
}
