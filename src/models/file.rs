use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::user::UserRole;

/// A verification document on disk, referenced by its storage-relative
/// path. Uploaded by an agent or buyer; reviewed by admins before the
/// matching role-extension row is verified.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoredFile {
    pub id: i64,
    pub user_id: i64,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

/// Admin review row: the file joined with its uploader's name and role.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FileWithOwner {
    pub id: i64,
    pub user_id: i64,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub user_role: UserRole,
}
