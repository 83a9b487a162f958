//! Reservation repository

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::db::query::{Param, Predicate, SelectStatement};
use crate::error::Result;
use crate::models::validation::require_positive;
use crate::models::{GuestReservation, Limit};

// Reviews are left-joined so unreviewed properties still show up.
const GUEST_SELECT: &str = "SELECT reservations.id, reservations.property_id, \
     reservations.guest_id, reservations.start_date, reservations.end_date, \
     properties.title, properties.city, properties.cost_per_night, \
     properties.thumbnail_photo_url, \
     avg(property_reviews.rating)::float8 AS average_rating \
     FROM reservations \
     JOIN properties ON reservations.property_id = properties.id \
     LEFT JOIN property_reviews ON property_reviews.property_id = properties.id";

pub fn guest_statement(guest_id: i32, limit: Limit) -> SelectStatement {
    SelectStatement::new(GUEST_SELECT)
        .filter(Predicate::Equals {
            column: "reservations.guest_id",
            value: Param::Int(guest_id),
        })
        .group_by("reservations.id, properties.id")
        .order_by("reservations.start_date ASC, reservations.id ASC")
        .limit(limit)
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// A guest's reservations, earliest first. Unknown guests get an empty list.
    #[instrument(skip(self))]
    pub async fn list_for_guest(&self, guest_id: i32, limit: i64) -> Result<Vec<GuestReservation>> {
        let limit = Limit::new(limit)?;
        require_positive("guest_id", guest_id.into())?;

        let stmt = guest_statement(guest_id, limit);
        let mut builder = stmt.build();
        debug!(sql = builder.sql(), "guest reservations");

        let rows = builder
            .build_query_as::<GuestReservation>()
            .fetch_all(self.pool)
            .await?;

        debug!(rows = rows.len(), "guest reservations complete");
        Ok(rows)
    }
}
