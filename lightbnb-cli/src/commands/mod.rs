//! Subcommand implementations
//!
//! Each command borrows the shared [`Database`] and prints JSON to stdout.

mod property;
mod reservations;
mod search;
mod user;

use anyhow::{Context, Result};
use lightbnb_db::Database;
use serde::Serialize;
use serde_json::Value;

pub use property::{run_property, PropertyArgs};
pub use reservations::{run_reservations, ReservationsArgs};
pub use search::{run_search, SearchArgs};
pub use user::{run_user, UserArgs};

/// Print any serializable value as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

pub async fn run_migrate(db: &Database) -> Result<()> {
    db.migrate().await?;
    print_json(&serde_json::json!({ "migrated": true }))
}

/// `null` for missing single-row lookups, so scripts can test with jq.
pub(crate) fn print_optional<T: Serialize>(value: Option<T>) -> Result<()> {
    match value {
        Some(value) => print_json(&value),
        None => print_json(&Value::Null),
    }
}
