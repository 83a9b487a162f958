//! Database layer - connection pool, statement builder and repositories
//!
//! - Connection pool owned by [`Database`]; no module-level globals
//! - Every value travels as a bound parameter, never in statement text
//! - Store failures come back as `DbError::QueryFailed`; nothing is swallowed

pub mod pool;
pub mod query;
pub mod repos;

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::Result;

pub use pool::{create_pool, create_pool_lazy};
pub use repos::{PropertyRepo, ReservationRepo, UserRepo};

/// Embedded schema migrations from `migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Handle to the LightBnB store.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool and wait for the first connection.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        info!(url = %config.redacted_url(), max_connections = config.max_connections, "connecting to database");
        let pool = create_pool(config).await?;
        Ok(Self { pool })
    }

    /// Build a pool that connects on first use.
    pub fn connect_lazy(config: &DbConfig) -> Result<Self> {
        debug!(url = %config.redacted_url(), "creating lazy database pool");
        let pool = create_pool_lazy(config)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply any pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        info!("database migrations applied");
        Ok(())
    }

    pub fn properties(&self) -> PropertyRepo<'_> {
        PropertyRepo::new(&self.pool)
    }

    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(&self.pool)
    }

    pub fn reservations(&self) -> ReservationRepo<'_> {
        ReservationRepo::new(&self.pool)
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(self) {
        self.pool.close().await;
        debug!("database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrator_embeds_schema() {
        assert!(MIGRATOR.iter().count() >= 1);
    }

    #[tokio::test]
    async fn lazy_handle_closes_cleanly() {
        let db = Database::connect_lazy(&DbConfig {
            url: "postgres://nobody@127.0.0.1:1/lightbnb".to_string(),
            ..DbConfig::default()
        })
        .unwrap();
        let clone = db.clone();
        db.close().await;
        assert!(clone.pool().is_closed());
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn migrate_is_idempotent(pool: PgPool) {
        let db = Database::from_pool(pool);
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
    }
}
