//! Repository implementations for database access
//!
//! Each repository borrows the pool from [`Database`](super::Database):
//! - Validates input first; bad arguments never reach the store
//! - One statement per call, values bound as parameters
//! - Aggregates come from JOINs in the same statement (no N+1)

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;
