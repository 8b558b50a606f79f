use chrono::Utc;
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::file::{FileWithOwner, StoredFile};

pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, file_url: &str) -> Result<StoredFile> {
        let now = Utc::now();
        let id = sqlx::query("INSERT INTO files (user_id, file_url, created_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(file_url)
            .bind(now)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(StoredFile {
            id,
            user_id,
            file_url: file_url.to_string(),
            created_at: now,
        })
    }

    pub async fn list_with_owners(&self) -> Result<Vec<FileWithOwner>> {
        let files = sqlx::query_as::<_, FileWithOwner>(
            "SELECT f.id, f.user_id, f.file_url, f.created_at,
                    u.name AS user_name, u.role AS user_role
             FROM files f
             JOIN users u ON f.user_id = u.id
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(files)
    }
}
