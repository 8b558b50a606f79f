//! Inquiry threads: one conversation per buyer/property pair, created by a
//! "contact agent" action, with append-only messages and per-direction read
//! tracking. Clients poll the read endpoints; there is no push channel.

use sqlx::SqlitePool;

use crate::middleware::error_handling::{AppError, Result};
use crate::models::inquiry::{
    CreateInquiryRequest, Inquiry, MessageKind, MessageResponse, OpeningMessage,
    PostMessageRequest, ThreadEntry, ThreadListRow, ThreadParticipants, ThreadSummary,
};
use crate::models::user::UserRole;
use crate::repositories::{InquiryRepository, PropertyRepository, UserRepository};
use crate::services::NotificationService;

pub struct InquiryService {
    inquiries: InquiryRepository,
    properties: PropertyRepository,
    users: UserRepository,
    notifications: NotificationService,
}

impl InquiryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inquiries: InquiryRepository::new(pool.clone()),
            properties: PropertyRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            notifications: NotificationService::new(pool),
        }
    }

    /// Open a new thread against a property. The property -> agent ->
    /// agent-user chain is resolved link by link so a broken reference
    /// reports which entity is missing instead of a generic failure.
    /// Repeat inquiries from the same buyer are allowed by design.
    pub async fn create_inquiry(
        &self,
        property_id: i64,
        user_id: i64,
        request: CreateInquiryRequest,
    ) -> Result<Inquiry> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::BadRequest("Message is required".to_string()));
        }

        let property = self
            .properties
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

        let agent_users_id = self
            .users
            .agent_user_id(property.agents_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;

        let agent_user = self
            .users
            .find_by_id(agent_users_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agent user not found".to_string()))?;

        let sender = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // Contact snapshot: explicit fields win, profile values fill the gaps.
        let name = request
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| sender.name.clone());
        let email = request.email.or(Some(sender.email.clone()));
        let phone = request.phone.or_else(|| sender.phone_number.clone());

        let inquiry = self
            .inquiries
            .create(
                property_id,
                user_id,
                &name,
                email.as_deref(),
                phone.as_deref(),
                message,
            )
            .await?;

        // Fire and forget - the thread exists even if the bell insert fails.
        if let Err(e) = self
            .notifications
            .notify_new_inquiry(agent_user.id, &property.title, &name, message, inquiry.id)
            .await
        {
            tracing::warn!("Failed to create inquiry notification: {}", e);
        }

        Ok(inquiry)
    }

    /// Two-party access check shared by every thread operation. Missing
    /// inquiry (or a broken property/agent link) -> 404; a caller who is
    /// neither the buyer nor the owning agent's user -> 403.
    async fn authorize(&self, inquiry_id: i64, user_id: i64) -> Result<ThreadParticipants> {
        let participants = self
            .inquiries
            .find_participants(inquiry_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))?;

        if !participants.is_participant(user_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to access this inquiry".to_string(),
            ));
        }

        Ok(participants)
    }

    /// Append a message. Direction is computed from the authenticated
    /// sender's identity; any client-supplied flag is ignored by
    /// construction since the request carries none.
    pub async fn post_message(
        &self,
        inquiry_id: i64,
        user_id: i64,
        request: PostMessageRequest,
    ) -> Result<MessageResponse> {
        let message = request.message.trim().to_string();
        if message.is_empty() {
            return Err(AppError::BadRequest("Message is required".to_string()));
        }

        let participants = self.authorize(inquiry_id, user_id).await?;
        let is_from_agent = participants.is_agent(user_id);

        let sender_name = self
            .users
            .display_name(user_id)
            .await?
            .unwrap_or_else(|| fallback_name(is_from_agent).to_string());

        let stored = self
            .inquiries
            .insert_message(
                inquiry_id,
                user_id,
                &message,
                is_from_agent,
                request.kind(),
                request.file_url.as_deref(),
                request.file_name.as_deref(),
                request.contract_id,
            )
            .await?;

        let recipient_id = participants.counterpart_of(user_id);
        let property_title = self
            .properties
            .find_by_id(participants.property_id)
            .await
            .ok()
            .flatten()
            .map(|p| p.title)
            .unwrap_or_else(|| "Unknown Property".to_string());

        if let Err(e) = self
            .notifications
            .notify_new_message(recipient_id, &property_title, &sender_name, inquiry_id)
            .await
        {
            tracing::warn!("Failed to create message notification: {}", e);
        }

        Ok(MessageResponse::new(stored, sender_name))
    }

    /// Full thread read: the synthetic opening entry first, then stored
    /// rows ordered by creation time (id as tiebreaker). Every entry
    /// carries a resolved sender name; a dangling sender degrades to a
    /// role placeholder instead of failing the read.
    pub async fn get_messages(&self, inquiry_id: i64, user_id: i64) -> Result<Vec<ThreadEntry>> {
        self.authorize(inquiry_id, user_id).await?;

        let inquiry = self
            .inquiries
            .find_by_id(inquiry_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Initial inquiry details not found".to_string()))?;

        let opening_name = if inquiry.name.trim().is_empty() {
            self.users
                .display_name(inquiry.user_id)
                .await?
                .unwrap_or_else(|| "Buyer".to_string())
        } else {
            inquiry.name.clone()
        };

        let mut entries = vec![ThreadEntry::Opening(OpeningMessage::from_inquiry(
            &inquiry,
            opening_name,
        ))];

        for row in self.inquiries.list_messages(inquiry_id).await? {
            let sender_name = row
                .sender_name
                .clone()
                .unwrap_or_else(|| fallback_name(row.is_from_agent).to_string());
            // A 'text' row carrying file metadata predates the kind column;
            // report it as a file entry.
            let kind = if row.file_url.is_some()
                || row.file_name.is_some()
                || row.contract_id.is_some()
            {
                MessageKind::File
            } else {
                row.kind
            };
            entries.push(ThreadEntry::Stored(MessageResponse {
                id: row.id,
                inquiry_id: row.inquiry_id,
                sender_id: row.sender_id,
                sender_name,
                message: row.message,
                is_from_agent: row.is_from_agent,
                is_read: row.is_read,
                kind,
                file_url: row.file_url,
                file_name: row.file_name,
                contract_id: row.contract_id,
                created_at: row.created_at,
            }));
        }

        Ok(entries)
    }

    /// Flip the counterpart's unread messages to read. The caller's own
    /// messages are never touched, and a repeat call flips nothing.
    pub async fn mark_read(&self, inquiry_id: i64, user_id: i64) -> Result<u64> {
        let participants = self.authorize(inquiry_id, user_id).await?;
        let reader_is_agent = participants.is_agent(user_id);
        // The agent reads buyer-authored messages and vice versa.
        self.inquiries.mark_read(inquiry_id, !reader_is_agent).await
    }

    /// Agent inbox: one summary per inquiry on the agent's properties,
    /// newest-created first. Role-gated against the store, not the token.
    pub async fn agent_inbox(&self, user_id: i64) -> Result<Vec<ThreadSummary>> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if user.role != UserRole::Agent {
            return Err(AppError::Forbidden(
                "Only agents can access this endpoint".to_string(),
            ));
        }

        let agent = self
            .users
            .find_agent_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agent profile not found".to_string()))?;

        let rows = self.inquiries.list_for_agent(agent.id).await?;
        Ok(self.enrich_rows(rows, false).await)
    }

    /// Buyer inbox: the threads this user opened, newest-created first.
    pub async fn buyer_inbox(&self, user_id: i64) -> Result<Vec<ThreadSummary>> {
        let rows = self.inquiries.list_for_buyer(user_id).await?;
        Ok(self.enrich_rows(rows, true).await)
    }

    /// Attach last-message and unread-count data to each inbox row.
    /// `counterpart_is_agent` scopes the unread count to messages authored
    /// by the querying party's counterpart. One bad row degrades to
    /// fallback values with an error marker; the rest of the list is
    /// unaffected.
    async fn enrich_rows(
        &self,
        rows: Vec<ThreadListRow>,
        counterpart_is_agent: bool,
    ) -> Vec<ThreadSummary> {
        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let enriched = self.enrich_row(&row, counterpart_is_agent).await;
            summaries.push(match enriched {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::error!(
                        "Error processing inquiry messages for inquiry {}: {}",
                        row.id,
                        e
                    );
                    summary_from_row(&row, None, 0, Some("Error processing messages".to_string()))
                }
            });
        }
        summaries
    }

    async fn enrich_row(
        &self,
        row: &ThreadListRow,
        counterpart_is_agent: bool,
    ) -> Result<ThreadSummary> {
        let last = self.inquiries.last_message(row.id).await?;
        let unread = self.inquiries.unread_count(row.id, counterpart_is_agent).await?;
        Ok(summary_from_row(row, last, unread, None))
    }
}

fn fallback_name(is_from_agent: bool) -> &'static str {
    if is_from_agent {
        "Agent"
    } else {
        "Buyer"
    }
}

fn summary_from_row(
    row: &ThreadListRow,
    last: Option<(String, chrono::DateTime<chrono::Utc>)>,
    unread_count: i64,
    error: Option<String>,
) -> ThreadSummary {
    let (last_message, last_message_time) = match last {
        Some((message, time)) => (message, time),
        // No stored messages yet: the opening message is the latest entry.
        None => (row.initial_message.clone(), row.created_at),
    };

    ThreadSummary {
        id: row.id,
        property_id: row.property_id,
        sender_id: row.sender_id,
        sender_name: row.sender_name.clone(),
        sender_email: row.sender_email.clone(),
        sender_phone: row.sender_phone.clone(),
        initial_message: row.initial_message.clone(),
        created_at: row.created_at,
        property_title: row.property_title.clone(),
        property_image_url: row.property_image_url.clone(),
        agent_id: row.agent_id,
        agent_name: row.agent_name.clone(),
        last_message,
        last_message_time,
        unread_count,
        error,
    }
}
