//! Notification emitter and bell read model.
//!
//! Rows are pre-rendered text addressed to one recipient; clients poll
//! `list`/`unread_count` on an interval. Emission helpers are invoked
//! fire-and-forget by the write paths: a failed insert is logged and never
//! rolls back the primary write.

use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::notification::{
    clip_preview, Notification, TYPE_PROPERTY_INQUIRY, TYPE_SYSTEM,
};
use crate::repositories::NotificationRepository;

pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: NotificationRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        recipient_id: i64,
        notification_type: &str,
        message: &str,
        related_id: Option<i64>,
    ) -> Result<Notification> {
        let notification = self
            .repo
            .create(recipient_id, notification_type, message, related_id)
            .await?;
        tracing::info!(
            "Notification created: type={}, recipient={}",
            notification.notification_type,
            notification.user_id
        );
        Ok(notification)
    }

    /// New-thread alert to the property's agent. The preview clips the
    /// opening message to its first 50 characters.
    pub async fn notify_new_inquiry(
        &self,
        agent_user_id: i64,
        property_title: &str,
        sender_name: &str,
        opening_message: &str,
        inquiry_id: i64,
    ) -> Result<Notification> {
        let message = format!(
            "New inquiry for \"{}\" from {}: \"{}\"",
            property_title,
            sender_name,
            clip_preview(opening_message, 50)
        );
        self.create(agent_user_id, TYPE_PROPERTY_INQUIRY, &message, Some(inquiry_id))
            .await
    }

    /// New-message alert to the thread counterpart.
    pub async fn notify_new_message(
        &self,
        recipient_id: i64,
        property_title: &str,
        sender_name: &str,
        inquiry_id: i64,
    ) -> Result<Notification> {
        let message = format!(
            "New message for property \"{}\" from {}",
            property_title, sender_name
        );
        self.create(recipient_id, TYPE_PROPERTY_INQUIRY, &message, Some(inquiry_id))
            .await
    }

    pub async fn notify_admins_sos(
        &self,
        admin_ids: &[i64],
        description: &str,
        report_id: i64,
    ) -> Result<()> {
        let message = format!("SOS report received: \"{}\"", clip_preview(description, 50));
        for admin_id in admin_ids {
            if let Err(e) = self
                .create(*admin_id, TYPE_SYSTEM, &message, Some(report_id))
                .await
            {
                tracing::warn!("Failed to notify admin {} of SOS report: {}", admin_id, e);
            }
        }
        Ok(())
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Notification>> {
        self.repo.list_for_user(user_id).await
    }

    pub async fn unread_count(&self, user_id: i64) -> Result<i64> {
        self.repo.unread_count(user_id).await
    }

    pub async fn mark_all_read(&self, user_id: i64) -> Result<u64> {
        self.repo.mark_all_read(user_id).await
    }
}
