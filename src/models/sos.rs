use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SosReport {
    pub id: i64,
    pub user_id: Option<i64>,
    pub description: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub media_path: Option<String>,
    pub assessment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields collected from the multipart SOS form before the report row is
/// written. The media file is already on disk at this point.
#[derive(Debug, Default)]
pub struct SosSubmission {
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub media_path: Option<String>,
}
