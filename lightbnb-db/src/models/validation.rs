//! Validation error types

use std::fmt;

/// Validation error for caller-supplied input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Integer that must be strictly positive (limits, ids)
    NotPositive { field: &'static str, value: i64 },

    /// Number outside its accepted range
    OutOfRange { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be a positive integer (got {})", field, value)
            }
            Self::OutOfRange { field, reason } => {
                write!(f, "{} out of range: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject blank strings and strings longer than `max` characters.
pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Reject ids and counts that must be strictly positive.
pub(crate) fn require_positive(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

/// Reject negative amounts.
pub(crate) fn require_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}
