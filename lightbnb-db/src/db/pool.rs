//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits, an acquire timeout,
//! and a server-side `statement_timeout` on every connection.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DbConfig;

const SCHEMES: [&str; 2] = ["postgres", "postgresql"];

fn connect_options(config: &DbConfig) -> Result<PgConnectOptions, sqlx::Error> {
    let scheme = config.url.split_once("://").map(|(scheme, _)| scheme);
    if !scheme.is_some_and(|scheme| SCHEMES.contains(&scheme)) {
        return Err(sqlx::Error::Configuration(
            format!(
                "database url must start with postgres:// or postgresql:// (got {})",
                config.redacted_url()
            )
            .into(),
        ));
    }

    let options = PgConnectOptions::from_str(&config.url)?;
    Ok(options.options([(
        "statement_timeout",
        format!("{}ms", config.statement_timeout_ms),
    )]))
}

fn pool_options(config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
}

/// Create a PostgreSQL connection pool and open the first connection.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::load_or_default()?).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config)
        .connect_with(connect_options(config)?)
        .await
}

/// Create a pool that connects on first use.
///
/// Fails only on a URL that is not a well-formed `postgres://` URL.
/// Must be called inside a Tokio runtime.
pub fn create_pool_lazy(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    Ok(pool_options(config).connect_lazy_with(connect_options(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DbConfig {
        DbConfig {
            url: url.to_string(),
            ..DbConfig::default()
        }
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        // Nothing listens here; building the pool must still succeed.
        let pool = create_pool_lazy(&config("postgres://nobody@127.0.0.1:1/lightbnb")).unwrap();
        assert_eq!(pool.size(), 0);
        pool.close().await;
    }

    #[tokio::test]
    async fn rejects_foreign_scheme() {
        for url in ["mysql://localhost/lightbnb", "localhost/lightbnb", ""] {
            let err = create_pool_lazy(&config(url)).unwrap_err();
            assert!(
                matches!(err, sqlx::Error::Configuration(_)),
                "{url:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn rejects_unparseable_port() {
        assert!(create_pool_lazy(&config("postgres://localhost:notaport/lightbnb")).is_err());
    }

    #[tokio::test]
    async fn accepts_postgresql_scheme() {
        let pool = create_pool_lazy(&config("postgresql://nobody@127.0.0.1:1/lightbnb")).unwrap();
        pool.close().await;
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&config(&url)).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn statement_timeout_is_applied() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&DbConfig {
            statement_timeout_ms: 50,
            ..config(&url)
        })
        .await
        .expect("pool creation failed");

        let result = sqlx::query("SELECT pg_sleep(1)").execute(&pool).await;
        assert!(result.is_err(), "pg_sleep should be cancelled");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&config(&url)).await.expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
