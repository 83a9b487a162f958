//! User records and sign-up validation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::require_text;
use super::ValidationError;

/// Maximum length for name/email/password columns
const MAX_USER_FIELD_LEN: usize = 255;

/// Loose `local@domain.tld` shape; deliverability is not our concern.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// User record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// User as submitted at sign-up.
///
/// `password` is stored as given; hashing happens in the route layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, MAX_USER_FIELD_LEN)?;
        validate_email(&self.email)?;
        require_text("password", &self.password, MAX_USER_FIELD_LEN)?;
        Ok(())
    }
}

/// Check that an email address is present and shaped like one.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require_text("email", email, MAX_USER_FIELD_LEN)?;
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "must look like name@example.com",
        });
    }
    Ok(())
}
