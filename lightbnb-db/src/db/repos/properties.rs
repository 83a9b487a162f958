//! Property repository
//!
//! - search: filtered listing with per-property average rating
//! - add: INSERT ... RETURNING

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::db::query::{AtLeast, Param, Predicate, SelectStatement};
use crate::error::Result;
use crate::models::{FilterSet, Limit, NewProperty, Property, PropertyRow};

const SEARCH_SELECT: &str = "SELECT properties.*, \
     avg(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     JOIN property_reviews ON property_reviews.property_id = properties.id";

const AVERAGE_RATING: &str = "avg(property_reviews.rating)";

/// Build the search statement for an already validated filter set.
///
/// Row filters land in `WHERE` in a fixed order (city, owner, minimum
/// price, maximum price); the rating threshold lands in `HAVING`.
pub fn search_statement(filters: &FilterSet, limit: Limit) -> SelectStatement {
    let mut stmt = SelectStatement::new(SEARCH_SELECT);

    if let Some(city) = filters.city_needle() {
        stmt = stmt.filter(Predicate::Contains {
            column: "properties.city",
            needle: city.to_owned(),
        });
    }
    if let Some(owner_id) = filters.owner_id {
        stmt = stmt.filter(Predicate::Equals {
            column: "properties.owner_id",
            value: Param::Int(owner_id),
        });
    }
    if let Some(min) = filters.minimum_price_per_night {
        stmt = stmt.filter(Predicate::GreaterThan {
            column: "properties.cost_per_night",
            value: Param::Int(min),
        });
    }
    if let Some(max) = filters.maximum_price_per_night {
        stmt = stmt.filter(Predicate::LessThan {
            column: "properties.cost_per_night",
            value: Param::Int(max),
        });
    }

    stmt = stmt.group_by("properties.id");

    if let Some(rating) = filters.minimum_rating {
        stmt = stmt.having(AtLeast::new(AVERAGE_RATING, Param::Float(rating)));
    }

    stmt.order_by("properties.cost_per_night ASC, properties.id ASC")
        .limit(limit)
}

/// Bound values in placeholder order, for debug logs.
fn render_params(stmt: &SelectStatement) -> String {
    stmt.params()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Properties matching `filters`, cheapest first, at most `limit` rows.
    ///
    /// Properties without reviews never match (the reviews join is inner).
    /// No match is an empty vector, not an error.
    #[instrument(skip(self, filters), fields(filtered = !filters.is_empty()))]
    pub async fn search(&self, filters: &FilterSet, limit: i64) -> Result<Vec<PropertyRow>> {
        let limit = Limit::new(limit)?;
        filters.validate()?;

        let stmt = search_statement(filters, limit);
        let mut builder = stmt.build();
        debug!(sql = builder.sql(), params = %render_params(&stmt), "property search");

        let rows = builder
            .build_query_as::<PropertyRow>()
            .fetch_all(self.pool)
            .await?;

        debug!(rows = rows.len(), "property search complete");
        Ok(rows)
    }

    /// Insert a property and return the stored record.
    #[instrument(skip(self, property), fields(owner_id = property.owner_id))]
    pub async fn add(&self, property: NewProperty) -> Result<Property> {
        property.validate()?;

        let row = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(property.title)
        .bind(property.description)
        .bind(property.thumbnail_photo_url)
        .bind(property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(property.country)
        .bind(property.street)
        .bind(property.city)
        .bind(property.province)
        .bind(property.post_code)
        .fetch_one(self.pool)
        .await?;

        debug!(property_id = row.id, "property added");
        Ok(row)
    }
}
