//! Process-level run ID for tracking assessment batches.
//!
//! Each process gets a unique ULID at startup. Every assessment produced by
//! the same process carries this ID, so a ranking run can be traced end to
//! end and re-runs on the same day stay distinguishable.

use once_cell::sync::Lazy;
use ulid::Ulid;

/// Process-level run ID, generated once at first access.
static RUN_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// Returns the process-level run ID (26-character, time-ordered, URL-safe).
#[inline]
pub fn get() -> &'static str {
    &RUN_ID
}

/// Generates a fresh ULID for sub-operations (e.g. one per batch).
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
