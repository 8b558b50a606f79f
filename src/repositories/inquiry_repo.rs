use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::inquiry::{
    Inquiry, InquiryMessage, MessageKind, MessageWithSender, ThreadListRow, ThreadParticipants,
};

const INQUIRY_COLUMNS: &str = "id, property_id, user_id, name, email, phone, message, created_at";

pub struct InquiryRepository {
    pool: SqlitePool,
}

impl InquiryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        property_id: i64,
        user_id: i64,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        message: &str,
    ) -> Result<Inquiry> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO inquiries (property_id, user_id, name, email, phone, message, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(property_id)
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(message)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Inquiry {
            id,
            property_id,
            user_id,
            name: name.to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            message: message.to_string(),
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Inquiry>> {
        let inquiry = sqlx::query_as::<_, Inquiry>(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inquiry)
    }

    /// Resolve the two identities a thread belongs to. None means the
    /// inquiry itself is missing; a missing link further down the
    /// property -> agent chain also yields None since the join fails.
    pub async fn find_participants(&self, inquiry_id: i64) -> Result<Option<ThreadParticipants>> {
        let participants = sqlx::query_as::<_, ThreadParticipants>(
            "SELECT i.id AS inquiry_id,
                    i.property_id,
                    i.user_id AS buyer_user_id,
                    p.agents_id,
                    a.users_id AS agent_user_id
             FROM inquiries i
             JOIN properties p ON i.property_id = p.id
             JOIN agents a ON p.agents_id = a.id
             WHERE i.id = ?",
        )
        .bind(inquiry_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(participants)
    }

    pub async fn insert_message(
        &self,
        inquiry_id: i64,
        sender_id: i64,
        message: &str,
        is_from_agent: bool,
        kind: MessageKind,
        file_url: Option<&str>,
        file_name: Option<&str>,
        contract_id: Option<i64>,
    ) -> Result<InquiryMessage> {
        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO inquiry_messages
                 (inquiry_id, sender_id, message, is_from_agent, is_read, kind,
                  file_url, file_name, contract_id, created_at)
             VALUES (?, ?, ?, ?, 0, ?, ?, ?, ?, ?)",
        )
        .bind(inquiry_id)
        .bind(sender_id)
        .bind(message)
        .bind(is_from_agent)
        .bind(kind)
        .bind(file_url)
        .bind(file_name)
        .bind(contract_id)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(InquiryMessage {
            id,
            inquiry_id,
            sender_id,
            message: message.to_string(),
            is_from_agent,
            is_read: false,
            kind,
            file_url: file_url.map(str::to_string),
            file_name: file_name.map(str::to_string),
            contract_id,
            created_at: now,
        })
    }

    /// All stored rows for a thread with sender names resolved in the same
    /// query. Ordered by creation time with the autoincrement id as a
    /// deterministic tiebreaker for same-timestamp posts.
    pub async fn list_messages(&self, inquiry_id: i64) -> Result<Vec<MessageWithSender>> {
        let messages = sqlx::query_as::<_, MessageWithSender>(
            "SELECT im.id, im.inquiry_id, im.sender_id, im.message, im.is_from_agent,
                    im.is_read, im.kind, im.file_url, im.file_name, im.contract_id,
                    im.created_at, u.name AS sender_name
             FROM inquiry_messages im
             LEFT JOIN users u ON im.sender_id = u.id
             WHERE im.inquiry_id = ?
             ORDER BY im.created_at ASC, im.id ASC",
        )
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    /// Flip unread -> read on one side of a thread. `authored_by_agent`
    /// selects which side's messages are flipped (the reader's counterpart).
    /// Returns the number of rows changed; zero on a repeat call.
    pub async fn mark_read(&self, inquiry_id: i64, authored_by_agent: bool) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE inquiry_messages
             SET is_read = 1
             WHERE inquiry_id = ? AND is_from_agent = ? AND is_read = 0",
        )
        .bind(inquiry_id)
        .bind(authored_by_agent)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_for_agent(&self, agent_id: i64) -> Result<Vec<ThreadListRow>> {
        let rows = sqlx::query_as::<_, ThreadListRow>(
            "SELECT i.id, i.property_id, i.user_id AS sender_id, i.name AS sender_name,
                    i.email AS sender_email, i.phone AS sender_phone,
                    i.message AS initial_message, i.created_at,
                    p.title AS property_title, p.image_url AS property_image_url,
                    a.id AS agent_id, u.name AS agent_name
             FROM inquiries i
             JOIN properties p ON i.property_id = p.id
             JOIN agents a ON p.agents_id = a.id
             JOIN users u ON a.users_id = u.id
             WHERE p.agents_id = ?
             ORDER BY i.created_at DESC, i.id DESC",
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_for_buyer(&self, user_id: i64) -> Result<Vec<ThreadListRow>> {
        let rows = sqlx::query_as::<_, ThreadListRow>(
            "SELECT i.id, i.property_id, i.user_id AS sender_id, i.name AS sender_name,
                    i.email AS sender_email, i.phone AS sender_phone,
                    i.message AS initial_message, i.created_at,
                    p.title AS property_title, p.image_url AS property_image_url,
                    a.id AS agent_id, u.name AS agent_name
             FROM inquiries i
             JOIN properties p ON i.property_id = p.id
             JOIN agents a ON p.agents_id = a.id
             JOIN users u ON a.users_id = u.id
             WHERE i.user_id = ?
             ORDER BY i.created_at DESC, i.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn last_message(
        &self,
        inquiry_id: i64,
    ) -> Result<Option<(String, DateTime<Utc>)>> {
        let row: Option<(String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT message, created_at
             FROM inquiry_messages
             WHERE inquiry_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .bind(inquiry_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Unread messages authored by one side of the thread.
    pub async fn unread_count(&self, inquiry_id: i64, authored_by_agent: bool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM inquiry_messages
             WHERE inquiry_id = ? AND is_from_agent = ? AND is_read = 0",
        )
        .bind(inquiry_id)
        .bind(authored_by_agent)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
