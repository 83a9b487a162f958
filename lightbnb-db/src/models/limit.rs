//! Row-count limit for list queries

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Default number of rows returned by list queries
const DEFAULT_LIMIT: i64 = 10;

/// Validated row-count limit (strictly positive).
///
/// Unlike page sizes elsewhere, out-of-range values are rejected rather than
/// clamped: a caller asking for zero rows has a bug worth surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Limit(i64);

impl Limit {
    pub const DEFAULT: Limit = Limit(DEFAULT_LIMIT);

    /// Create a limit, rejecting zero and negative values.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::Limit;
    ///
    /// assert_eq!(Limit::new(5).unwrap().get(), 5);
    /// assert!(Limit::new(0).is_err());
    /// assert!(Limit::new(-3).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive {
                field: "limit",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Get the LIMIT value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Limit {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        limit.0
    }
}
