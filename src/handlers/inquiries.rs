use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::{error_handling::Result, Claims},
    models::inquiry::{
        CreateInquiryRequest, Inquiry, MessageResponse, PostMessageRequest, ThreadEntry,
        ThreadSummary,
    },
    services::InquiryService,
};

pub async fn create_inquiry(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<i64>,
    Json(request): Json<CreateInquiryRequest>,
) -> Result<Json<Inquiry>> {
    request.validate()?;

    let service = InquiryService::new(config.database_pool.clone());
    let inquiry = service
        .create_inquiry(property_id, claims.user_id, request)
        .await?;
    Ok(Json(inquiry))
}

pub async fn post_message(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(inquiry_id): Path<i64>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<MessageResponse>> {
    request.validate()?;

    let service = InquiryService::new(config.database_pool.clone());
    let message = service
        .post_message(inquiry_id, claims.user_id, request)
        .await?;
    Ok(Json(message))
}

pub async fn get_messages(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(inquiry_id): Path<i64>,
) -> Result<Json<Vec<ThreadEntry>>> {
    let service = InquiryService::new(config.database_pool.clone());
    let entries = service.get_messages(inquiry_id, claims.user_id).await?;
    Ok(Json(entries))
}

pub async fn mark_read(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(inquiry_id): Path<i64>,
) -> Result<Json<Value>> {
    let service = InquiryService::new(config.database_pool.clone());
    let count = service.mark_read(inquiry_id, claims.user_id).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn agent_inbox(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ThreadSummary>>> {
    let service = InquiryService::new(config.database_pool.clone());
    let summaries = service.agent_inbox(claims.user_id).await?;
    Ok(Json(summaries))
}

pub async fn buyer_inbox(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ThreadSummary>>> {
    let service = InquiryService::new(config.database_pool.clone());
    let summaries = service.buyer_inbox(claims.user_id).await?;
    Ok(Json(summaries))
}
