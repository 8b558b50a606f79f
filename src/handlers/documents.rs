use axum::{
    extract::{Extension, Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    config::AppConfig,
    middleware::{
        error_handling::{AppError, Result},
        Claims,
    },
    models::user::UserRole,
    repositories::FileRepository,
    utils::FileStorage,
};

/// Agent-side verification document upload. The stored reference shows up
/// in the admin files review list.
pub async fn upload_agent_document(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<Json<Value>> {
    if claims.role != UserRole::Agent {
        return Err(AppError::Forbidden(
            "Only agents can access this endpoint".to_string(),
        ));
    }
    store_document(&config, claims.user_id, multipart).await
}

/// Buyer-side counterpart of the agent upload.
pub async fn upload_buyer_document(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    multipart: Multipart,
) -> Result<Json<Value>> {
    if claims.role != UserRole::Buyer {
        return Err(AppError::Forbidden(
            "Only buyers can access this endpoint".to_string(),
        ));
    }
    store_document(&config, claims.user_id, multipart).await
}

async fn store_document(
    config: &AppConfig,
    user_id: i64,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("document") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "document".to_string());
            let data = field.bytes().await?;
            if !data.is_empty() {
                let storage = FileStorage::new(&config.file_storage_path)?;
                stored = Some(storage.save_file(&filename, &data)?);
            }
        }
    }

    let file_url =
        stored.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let repo = FileRepository::new(config.database_pool.clone());
    let file = repo.create(user_id, &file_url).await?;

    tracing::info!(file_id = file.id, user_id, "verification document stored");
    Ok(Json(json!({
        "message": "Document uploaded successfully",
        "file": file,
    })))
}
