use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const TYPE_PROPERTY_INQUIRY: &str = "property_inquiry";
pub const TYPE_PROPERTY_PURCHASE: &str = "property_purchase";
pub const TYPE_SYSTEM: &str = "system";

/// Pre-rendered, write-once alert row addressed to a single recipient.
/// `related_id` semantics depend on `notification_type` (inquiry id for
/// property_inquiry, property id for property_purchase).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub related_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub recipient_id: i64,
    #[validate(length(min = 1, message = "Type is required"))]
    #[serde(rename = "type")]
    pub notification_type: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub related_id: Option<i64>,
}

/// Clip an inquiry message to a short preview for notification text.
pub fn clip_preview(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        message.to_string()
    } else {
        let clipped: String = message.chars().take(max_chars).collect();
        format!("{}...", clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_pass_through() {
        assert_eq!(clip_preview("hello", 50), "hello");
    }

    #[test]
    fn long_messages_are_clipped_with_ellipsis() {
        let long = "x".repeat(80);
        let preview = clip_preview(&long, 50);
        assert_eq!(preview.chars().count(), 53);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn clipping_is_char_safe() {
        let msg = "ñ".repeat(60);
        let preview = clip_preview(&msg, 50);
        assert!(preview.starts_with('ñ'));
    }
}
