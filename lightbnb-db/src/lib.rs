//! lightbnb-db: data-access layer for the LightBnB booking application
//!
//! Route handlers hold a [`Database`] and call into its repositories.
//! Every operation issues one parameterized statement and maps the rows
//! to plain records; failures come back as [`DbError`].

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::DbConfig;
pub use db::{Database, MIGRATOR};
pub use error::{DbError, Result};
pub use models::{FilterSet, Limit, PropertyRow, ValidationError};
