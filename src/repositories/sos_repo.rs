use chrono::Utc;
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::sos::SosReport;

pub struct SosRepository {
    pool: SqlitePool,
}

impl SosRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Option<i64>,
        description: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        media_path: Option<&str>,
        assessment: Option<&str>,
    ) -> Result<SosReport> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO sos_reports
                 (user_id, description, latitude, longitude, media_path, assessment, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(description)
        .bind(latitude)
        .bind(longitude)
        .bind(media_path)
        .bind(assessment)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(SosReport {
            id,
            user_id,
            description: description.to_string(),
            latitude,
            longitude,
            media_path: media_path.map(str::to_string),
            assessment: assessment.map(str::to_string),
            created_at: now,
        })
    }
}
