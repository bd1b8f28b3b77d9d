//! Validation errors raised while constructing or mutating records.
//!
//! These cover malformed input only. Expected outcomes such as a duplicate id
//! or borrowing an item that is already out are reported as `bool` by the
//! stores and never show up here.

use thiserror::Error;

/// Reasons a record could not be built from user-supplied values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field was empty or contained only whitespace.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A component score fell outside the accepted `0..=100` range.
    #[error("{field} must be between 0 and 100 (got {value})")]
    ScoreOutOfRange { field: &'static str, value: f64 },
}

/// Trim `value` and reject it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Accept a score only when it is a finite number in `0..=100`.
pub(crate) fn require_score(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::ScoreOutOfRange { field, value })
    }
}
