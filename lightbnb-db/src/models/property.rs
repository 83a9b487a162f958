//! Property records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{require_non_negative, require_positive, require_text};
use super::ValidationError;

/// Maximum length for VARCHAR(255) columns
const MAX_TEXT_LEN: usize = 255;

/// Property record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// Search result: a property plus the mean rating of its reviews
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PropertyRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// Property as submitted by an owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl NewProperty {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive("owner_id", self.owner_id.into())?;
        require_text("title", &self.title, MAX_TEXT_LEN)?;
        require_text("thumbnail_photo_url", &self.thumbnail_photo_url, MAX_TEXT_LEN)?;
        require_text("cover_photo_url", &self.cover_photo_url, MAX_TEXT_LEN)?;
        require_non_negative("cost_per_night", self.cost_per_night.into())?;
        require_non_negative("parking_spaces", self.parking_spaces.into())?;
        require_non_negative("number_of_bathrooms", self.number_of_bathrooms.into())?;
        require_non_negative("number_of_bedrooms", self.number_of_bedrooms.into())?;
        require_text("country", &self.country, MAX_TEXT_LEN)?;
        require_text("street", &self.street, MAX_TEXT_LEN)?;
        require_text("city", &self.city, MAX_TEXT_LEN)?;
        require_text("province", &self.province, MAX_TEXT_LEN)?;
        require_text("post_code", &self.post_code, MAX_TEXT_LEN)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_new_property() -> NewProperty {
    NewProperty {
        owner_id: 1,
        title: "Speed lamp".to_string(),
        description: Some("description".to_string()),
        thumbnail_photo_url: "https://images.example.com/thumb.jpg".to_string(),
        cover_photo_url: "https://images.example.com/cover.jpg".to_string(),
        cost_per_night: 93061,
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
        country: "Canada".to_string(),
        street: "536 Namsub Highway".to_string(),
        city: "Sotboske".to_string(),
        province: "Quebec".to_string(),
        post_code: "28142".to_string(),
    }
}
