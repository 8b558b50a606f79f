use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    ForSale,
    ForRent,
    Foreclosure,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    pub location: String,
    pub image_url: Option<String>,
    pub beds: Option<i64>,
    pub baths: Option<i64>,
    pub property_type: Option<String>,
    pub land_area: Option<f64>,
    pub listing_type: ListingType,
    pub agents_id: i64,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub image_url: Option<String>,
    pub beds: Option<i64>,
    pub baths: Option<i64>,
    pub property_type: Option<String>,
    pub land_area: Option<f64>,
    pub listing_type: Option<ListingType>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: Option<i64>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub beds: Option<i64>,
    pub baths: Option<i64>,
    pub property_type: Option<String>,
    pub land_area: Option<f64>,
    pub listing_type: Option<ListingType>,
}

/// Freeform description of a property sent to the value-estimate endpoint.
/// Not persisted; forwarded into the LLM prompt.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub area: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub age: Option<i64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub nearby: Vec<String>,
}
