//! Property search filters

use serde::{Deserialize, Serialize};

use super::validation::{require_non_negative, require_positive};
use super::ValidationError;

/// Optional search criteria for properties.
///
/// Every field is independent; an absent field never constrains the query.
/// Prices are in the store's native unit for `cost_per_night`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Substring of the property's city
    #[serde(default)]
    pub city: Option<String>,
    /// Only properties listed by this owner
    #[serde(default)]
    pub owner_id: Option<i32>,
    /// Exclusive lower bound on cost per night
    #[serde(default)]
    pub minimum_price_per_night: Option<i32>,
    /// Exclusive upper bound on cost per night
    #[serde(default)]
    pub maximum_price_per_night: Option<i32>,
    /// Inclusive lower bound on the average review rating
    #[serde(default)]
    pub minimum_rating: Option<f64>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn minimum_price_per_night(mut self, price: i32) -> Self {
        self.minimum_price_per_night = Some(price);
        self
    }

    pub fn maximum_price_per_night(mut self, price: i32) -> Self {
        self.maximum_price_per_night = Some(price);
        self
    }

    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// City to match as given; blank input counts as absent.
    pub fn city_needle(&self) -> Option<&str> {
        self.city
            .as_deref()
            .filter(|city| !city.trim().is_empty())
    }

    /// True when no field constrains the search.
    pub fn is_empty(&self) -> bool {
        self.city_needle().is_none()
            && self.owner_id.is_none()
            && self.minimum_price_per_night.is_none()
            && self.maximum_price_per_night.is_none()
            && self.minimum_rating.is_none()
    }

    /// Check every present value before it reaches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(owner_id) = self.owner_id {
            require_positive("owner_id", owner_id.into())?;
        }
        if let Some(price) = self.minimum_price_per_night {
            require_non_negative("minimum_price_per_night", price.into())?;
        }
        if let Some(price) = self.maximum_price_per_night {
            require_non_negative("maximum_price_per_night", price.into())?;
        }
        if let Some(rating) = self.minimum_rating {
            if !rating.is_finite() {
                return Err(ValidationError::OutOfRange {
                    field: "minimum_rating",
                    reason: "must be a finite number",
                });
            }
            if rating < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: "minimum_rating",
                    reason: "must not be negative",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        let filters = FilterSet::default();
        assert!(filters.is_empty());
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn blank_city_is_absent() {
        assert!(FilterSet::new().city("").is_empty());
        assert!(FilterSet::new().city("   ").is_empty());
        assert_eq!(FilterSet::new().city("Vancouver").city_needle(), Some("Vancouver"));
    }

    #[test]
    fn city_needle_keeps_surrounding_whitespace() {
        assert_eq!(FilterSet::new().city("New ").city_needle(), Some("New "));
        assert_eq!(FilterSet::new().city(" York").city_needle(), Some(" York"));
    }

    #[test]
    fn zero_price_still_constrains() {
        let filters = FilterSet::new().minimum_price_per_night(0);
        assert!(!filters.is_empty());
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn rejects_negative_prices() {
        let err = FilterSet::new()
            .minimum_price_per_night(-5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "minimum_price_per_night",
                ..
            }
        ));

        let err = FilterSet::new()
            .maximum_price_per_night(-1)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: "maximum_price_per_night",
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_ratings() {
        assert!(FilterSet::new().minimum_rating(f64::NAN).validate().is_err());
        assert!(FilterSet::new()
            .minimum_rating(f64::INFINITY)
            .validate()
            .is_err());
        assert!(FilterSet::new().minimum_rating(-0.5).validate().is_err());
        assert!(FilterSet::new().minimum_rating(4.0).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_owner() {
        let err = FilterSet::new().owner_id(0).validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotPositive {
                field: "owner_id",
                value: 0
            }
        );
    }

    #[test]
    fn min_above_max_is_allowed() {
        // Contradictory bounds just match nothing.
        let filters = FilterSet::new()
            .minimum_price_per_night(500)
            .maximum_price_per_night(100);
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn deserializes_sparse_json() {
        let filters: FilterSet =
            serde_json::from_str(r#"{"city":"Vancouver","minimum_rating":4}"#).unwrap();
        assert_eq!(filters.city.as_deref(), Some("Vancouver"));
        assert_eq!(filters.minimum_rating, Some(4.0));
        assert!(filters.minimum_price_per_night.is_none());
    }
}
