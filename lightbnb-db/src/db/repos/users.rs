//! User repository
//!
//! - get_with_email / get_with_id: single-row lookups, `None` when absent
//! - add: INSERT ... RETURNING; the unique email index rejects duplicates

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::user::validate_email;
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user by email, ignoring case.
    #[instrument(skip(self, email))]
    pub async fn get_with_email(&self, email: &str) -> Result<Option<User>> {
        validate_email(email)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email.trim())
        .fetch_optional(self.pool)
        .await?;

        debug!(found = user.is_some(), "user lookup by email");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_with_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        debug!(found = user.is_some(), "user lookup by id");
        Ok(user)
    }

    /// Insert a user and return the stored record.
    #[instrument(skip(self, user))]
    pub async fn add(&self, user: NewUser) -> Result<User> {
        user.validate()?;

        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.name.trim())
        .bind(user.email.trim())
        .bind(&user.password)
        .fetch_one(self.pool)
        .await?;

        debug!(user_id = row.id, "user added");
        Ok(row)
    }
}
