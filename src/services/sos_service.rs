use sqlx::SqlitePool;

use crate::middleware::error_handling::{AppError, Result};
use crate::models::sos::{SosReport, SosSubmission};
use crate::repositories::{SosRepository, UserRepository};
use crate::services::{AssistantService, NotificationService};

pub struct SosService {
    reports: SosRepository,
    users: UserRepository,
    notifications: NotificationService,
}

impl SosService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            reports: SosRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            notifications: NotificationService::new(pool),
        }
    }

    /// Persist an SOS report and alert every admin. The triage note is
    /// best-effort: an unavailable assistant never blocks the report.
    pub async fn submit(
        &self,
        user_id: Option<i64>,
        submission: SosSubmission,
        assistant: &AssistantService,
    ) -> Result<SosReport> {
        let description = submission
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::BadRequest("Description is required".to_string()))?
            .to_string();

        let assessment = match assistant.triage_sos(&description).await {
            Ok(note) => Some(note),
            Err(e) => {
                tracing::warn!("SOS triage unavailable: {}", e);
                None
            }
        };

        let report = self
            .reports
            .create(
                user_id,
                &description,
                submission.latitude,
                submission.longitude,
                submission.media_path.as_deref(),
                assessment.as_deref(),
            )
            .await?;

        let admin_ids = self.users.admin_user_ids().await.unwrap_or_default();
        self.notifications
            .notify_admins_sos(&admin_ids, &description, report.id)
            .await?;

        Ok(report)
    }
}
