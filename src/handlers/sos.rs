use axum::{
    extract::{Extension, Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    config::AppConfig,
    middleware::{error_handling::Result, Claims},
    models::sos::SosSubmission,
    services::{AssistantService, SosService},
    utils::FileStorage,
};

/// Multipart emergency report: `description` (required), optional
/// `latitude`/`longitude` and a media capture. The media lands in file
/// storage; the rest goes to the SOS service.
pub async fn analyze_sos(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut submission = SosSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("description") => {
                submission.description = Some(field.text().await?);
            }
            Some("latitude") => {
                submission.latitude = field.text().await?.trim().parse().ok();
            }
            Some("longitude") => {
                submission.longitude = field.text().await?.trim().parse().ok();
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "sos-capture".to_string());
                let data = field.bytes().await?;
                if !data.is_empty() {
                    let storage = FileStorage::new(&config.file_storage_path)?;
                    submission.media_path = Some(storage.save_file(&filename, &data)?);
                }
            }
            _ => {}
        }
    }

    let assistant = AssistantService::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    );
    let service = SosService::new(config.database_pool.clone());
    let report = service
        .submit(Some(claims.user_id), submission, &assistant)
        .await?;

    Ok(Json(json!({
        "message": "SOS report received",
        "report": report,
    })))
}
