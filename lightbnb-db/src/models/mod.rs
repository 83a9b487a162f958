//! Domain models with validation before they reach the store
//!
//! Invalid input returns ValidationError, not panic.

pub mod filter;
pub mod limit;
pub mod property;
pub mod reservation;
pub mod user;
pub mod validation;

pub use filter::FilterSet;
pub use limit::Limit;
pub use property::{NewProperty, Property, PropertyRow};
pub use reservation::GuestReservation;
pub use user::{NewUser, User};
pub use validation::ValidationError;
