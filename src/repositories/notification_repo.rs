use chrono::Utc;
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::notification::Notification;

const NOTIFICATION_COLUMNS: &str = "id, user_id, type, message, related_id, is_read, created_at";

pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i64,
        notification_type: &str,
        message: &str,
        related_id: Option<i64>,
    ) -> Result<Notification> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO notifications (user_id, type, message, related_id, is_read, created_at)
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(user_id)
        .bind(notification_type)
        .bind(message)
        .bind(related_id)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Notification {
            id,
            user_id,
            notification_type: notification_type.to_string(),
            message: message.to_string(),
            related_id,
            is_read: false,
            created_at: now,
        })
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
