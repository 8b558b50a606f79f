use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One conversation thread between a buyer and the agent owning a property.
/// The opening message lives on this row, not in `inquiry_messages`; thread
/// reads materialize it as a synthetic first entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inquiry {
    pub id: i64,
    pub property_id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InquiryMessage {
    pub id: i64,
    pub inquiry_id: i64,
    pub sender_id: i64,
    pub message: String,
    pub is_from_agent: bool,
    pub is_read: bool,
    pub kind: MessageKind,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub contract_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Buyer and agent identities a thread resolves to, via
/// inquiry -> property -> agent -> agent's user. Used for the two-party
/// access check on every thread operation.
#[derive(Debug, Clone, FromRow)]
pub struct ThreadParticipants {
    pub inquiry_id: i64,
    pub property_id: i64,
    pub buyer_user_id: i64,
    pub agents_id: i64,
    pub agent_user_id: i64,
}

impl ThreadParticipants {
    pub fn is_participant(&self, user_id: i64) -> bool {
        user_id == self.buyer_user_id || user_id == self.agent_user_id
    }

    pub fn is_agent(&self, user_id: i64) -> bool {
        user_id == self.agent_user_id
    }

    /// The other party's user id, given one participant.
    pub fn counterpart_of(&self, user_id: i64) -> i64 {
        if self.is_agent(user_id) {
            self.buyer_user_id
        } else {
            self.agent_user_id
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub contract_id: Option<i64>,
}

impl PostMessageRequest {
    pub fn kind(&self) -> MessageKind {
        if self.file_url.is_some() || self.file_name.is_some() || self.contract_id.is_some() {
            MessageKind::File
        } else {
            MessageKind::Text
        }
    }
}

/// Synthetic opening entry of a thread, materialized from the Inquiry row.
/// Always buyer-authored and never counted as unread.
#[derive(Debug, Clone, Serialize)]
pub struct OpeningMessage {
    pub id: String,
    pub inquiry_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub message: String,
    pub is_from_agent: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl OpeningMessage {
    pub fn from_inquiry(inquiry: &Inquiry, sender_name: String) -> Self {
        Self {
            id: format!("initial-{}", inquiry.id),
            inquiry_id: inquiry.id,
            sender_id: inquiry.user_id,
            sender_name,
            message: inquiry.message.clone(),
            is_from_agent: false,
            is_read: true,
            created_at: inquiry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub inquiry_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub message: String,
    pub is_from_agent: bool,
    pub is_read: bool,
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn new(message: InquiryMessage, sender_name: String) -> Self {
        Self {
            id: message.id,
            inquiry_id: message.inquiry_id,
            sender_id: message.sender_id,
            sender_name,
            message: message.message,
            is_from_agent: message.is_from_agent,
            is_read: message.is_read,
            kind: message.kind,
            file_url: message.file_url,
            file_name: message.file_name,
            contract_id: message.contract_id,
            created_at: message.created_at,
        }
    }
}

/// A thread read is the opening entry followed by stored rows; the two
/// shapes serialize flat so clients see one homogeneous list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ThreadEntry {
    Opening(OpeningMessage),
    Stored(MessageResponse),
}

/// Raw inbox row before last-message/unread enrichment: the inquiry joined
/// with its property and owning agent.
#[derive(Debug, Clone, FromRow)]
pub struct ThreadListRow {
    pub id: i64,
    pub property_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub sender_email: Option<String>,
    pub sender_phone: Option<String>,
    pub initial_message: String,
    pub created_at: DateTime<Utc>,
    pub property_title: String,
    pub property_image_url: Option<String>,
    pub agent_id: i64,
    pub agent_name: String,
}

/// Stored message joined with its sender's current display name; the name is
/// None when the user row no longer resolves.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithSender {
    pub id: i64,
    pub inquiry_id: i64,
    pub sender_id: i64,
    pub message: String,
    pub is_from_agent: bool,
    pub is_read: bool,
    pub kind: MessageKind,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub contract_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub sender_name: Option<String>,
}

/// One inbox row. `error` is set when resolving this thread's last message
/// or unread count failed and fallback values were substituted.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummary {
    pub id: i64,
    pub property_id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub sender_email: Option<String>,
    pub sender_phone: Option<String>,
    pub initial_message: String,
    pub created_at: DateTime<Utc>,
    pub property_title: String,
    pub property_image_url: Option<String>,
    pub agent_id: i64,
    pub agent_name: String,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_kind_derives_from_file_fields() {
        let text_only = PostMessageRequest {
            message: "When can I view the unit?".to_string(),
            file_url: None,
            file_name: None,
            contract_id: None,
        };
        assert_eq!(text_only.kind(), MessageKind::Text);

        let with_file = PostMessageRequest {
            message: "Shared a file: deed.pdf".to_string(),
            file_url: Some("/uploads/deed.pdf".to_string()),
            file_name: Some("deed.pdf".to_string()),
            contract_id: None,
        };
        assert_eq!(with_file.kind(), MessageKind::File);
    }
}
