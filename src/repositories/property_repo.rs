use chrono::Utc;
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::property::{CreatePropertyRequest, ListingType, Property, UpdatePropertyRequest};

const PROPERTY_COLUMNS: &str = "id, title, description, price, location, image_url, beds, baths, \
                                property_type, land_area, listing_type, agents_id, is_verified, created_at";

pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, agent_id: i64, request: &CreatePropertyRequest) -> Result<Property> {
        let now = Utc::now();
        let listing_type = request.listing_type.unwrap_or(ListingType::ForSale);

        let id = sqlx::query(
            "INSERT INTO properties
                 (title, description, price, location, image_url, beds, baths,
                  property_type, land_area, listing_type, agents_id, is_verified, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.price)
        .bind(&request.location)
        .bind(&request.image_url)
        .bind(request.beds)
        .bind(request.baths)
        .bind(&request.property_type)
        .bind(request.land_area)
        .bind(listing_type)
        .bind(agent_id)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            crate::middleware::error_handling::AppError::NotFound("Property not found".to_string())
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(property)
    }

    /// Verified listings only; buyers never see pending ones.
    pub async fn list_verified(&self) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE is_verified = 1 ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    pub async fn list_all(&self) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    /// Everything verified plus the given agent's own pending listings.
    pub async fn list_visible_to_agent(&self, agent_id: i64) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties
             WHERE is_verified = 1 OR agents_id = ?
             ORDER BY created_at DESC"
        ))
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    pub async fn list_by_agent(&self, agent_id: i64) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE agents_id = ? ORDER BY created_at DESC"
        ))
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    pub async fn pending(&self) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE is_verified = 0 ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    /// Any mutation drops the listing back to unverified; it must pass
    /// admin review again before buyers see it.
    pub async fn update(&self, id: i64, request: &UpdatePropertyRequest) -> Result<Option<Property>> {
        let result = sqlx::query(
            "UPDATE properties
             SET title = COALESCE(?, title),
                 description = COALESCE(?, description),
                 price = COALESCE(?, price),
                 location = COALESCE(?, location),
                 image_url = COALESCE(?, image_url),
                 beds = COALESCE(?, beds),
                 baths = COALESCE(?, baths),
                 property_type = COALESCE(?, property_type),
                 land_area = COALESCE(?, land_area),
                 listing_type = COALESCE(?, listing_type),
                 is_verified = 0
             WHERE id = ?",
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.price)
        .bind(&request.location)
        .bind(&request.image_url)
        .bind(request.beds)
        .bind(request.baths)
        .bind(&request.property_type)
        .bind(request.land_area)
        .bind(request.listing_type)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn verify(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE properties SET is_verified = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
