//! Reservation records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A guest's reservation with a summary of the reserved property
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GuestReservation {
    pub id: i32,
    pub property_id: i32,
    pub guest_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub title: String,
    pub city: String,
    pub cost_per_night: i32,
    pub thumbnail_photo_url: String,
    /// `None` when the property has no reviews yet
    pub average_rating: Option<f64>,
}

impl GuestReservation {
    /// Number of nights covered by the stay.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nights_between_dates() {
        let rsvp = GuestReservation {
            id: 1,
            property_id: 1,
            guest_id: 1,
            start_date: NaiveDate::from_ymd_opt(2018, 9, 11).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2018, 9, 26).unwrap(),
            title: "Speed lamp".to_string(),
            city: "Sotboske".to_string(),
            cost_per_night: 930,
            thumbnail_photo_url: "t".to_string(),
            average_rating: None,
        };
        assert_eq!(rsvp.nights(), 15);
    }
}
