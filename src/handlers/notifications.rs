use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::{error_handling::Result, Claims},
    models::notification::{CreateNotificationRequest, Notification},
    services::NotificationService,
};

pub async fn list_notifications(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Notification>>> {
    let service = NotificationService::new(config.database_pool.clone());
    let notifications = service.list(claims.user_id).await?;
    Ok(Json(notifications))
}

pub async fn unread_count(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>> {
    let service = NotificationService::new(config.database_pool.clone());
    let count = service.unread_count(claims.user_id).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn mark_all_read(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>> {
    let service = NotificationService::new(config.database_pool.clone());
    let count = service.mark_all_read(claims.user_id).await?;
    Ok(Json(json!({ "count": count })))
}

/// Explicit creation, used by the purchase-request flow to alert an agent.
pub async fn create_notification(
    State(config): State<AppConfig>,
    Extension(_claims): Extension<Claims>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<Json<Notification>> {
    request.validate()?;

    let service = NotificationService::new(config.database_pool.clone());
    let notification = service
        .create(
            request.recipient_id,
            &request.notification_type,
            &request.message,
            request.related_id,
        )
        .await?;
    Ok(Json(notification))
}
