use axum::{
    extract::{Extension, Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::{
        error_handling::{AppError, Result},
        Claims,
    },
    models::contract::{
        AnalyzeContractRequest, Contract, ContractSummary, CreateContractRequest,
        UpdateContractRequest,
    },
    repositories::{ContractRepository, PropertyRepository, UserRepository},
    services::AssistantService,
    utils::FileStorage,
};

pub async fn list_contracts(State(config): State<AppConfig>) -> Result<Json<Vec<Contract>>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    Ok(Json(repo.list().await?))
}

pub async fn get_contract(
    State(config): State<AppConfig>,
    Path(contract_id): Path<i64>,
) -> Result<Json<Contract>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    let contract = repo
        .find_by_id(contract_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;
    Ok(Json(contract))
}

/// Referenced property, buyer and agent are checked link by link so a
/// dangling id reports which entity is missing.
pub async fn create_contract(
    State(config): State<AppConfig>,
    Extension(_claims): Extension<Claims>,
    Json(request): Json<CreateContractRequest>,
) -> Result<Json<Contract>> {
    request.validate()?;

    let properties = PropertyRepository::new(config.database_pool.clone());
    properties
        .find_by_id(request.property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

    let users = UserRepository::new(config.database_pool.clone());
    users
        .find_buyer(request.buyer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer not found".to_string()))?;
    users
        .find_agent(request.agents_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;

    let repo = ContractRepository::new(config.database_pool.clone());
    let contract = repo
        .create(
            request.property_id,
            request.buyer_id,
            request.agents_id,
            &request.status,
            request.contract_detail.as_deref(),
        )
        .await?;

    tracing::info!(contract_id = contract.id, "contract created");
    Ok(Json(contract))
}

pub async fn update_contract(
    State(config): State<AppConfig>,
    Path(contract_id): Path<i64>,
    Json(request): Json<UpdateContractRequest>,
) -> Result<Json<Contract>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    let contract = repo
        .update(contract_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;
    Ok(Json(contract))
}

pub async fn delete_contract(
    State(config): State<AppConfig>,
    Path(contract_id): Path<i64>,
) -> Result<Json<Value>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    if !repo.delete(contract_id).await? {
        return Err(AppError::NotFound("Contract not found".to_string()));
    }
    Ok(Json(json!({ "message": "Contract deleted successfully" })))
}

pub async fn contracts_for_buyer(
    State(config): State<AppConfig>,
    Path(buyer_id): Path<i64>,
) -> Result<Json<Vec<ContractSummary>>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    Ok(Json(repo.list_for_buyer(buyer_id).await?))
}

pub async fn contracts_for_agent(
    State(config): State<AppConfig>,
    Path(agents_id): Path<i64>,
) -> Result<Json<Vec<ContractSummary>>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    Ok(Json(repo.list_for_agent(agents_id).await?))
}

/// Multipart upload: a `pdf` part (application/pdf only) and a
/// `contract_id` part. The file lands under the configured storage path
/// with a uuid-prefixed name recorded on the contract row.
pub async fn upload_pdf(
    State(config): State<AppConfig>,
    Extension(_claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut pdf_data: Option<(String, Vec<u8>)> = None;
    let mut contract_id: Option<i64> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("pdf") => {
                let content_type = field.content_type().map(str::to_string);
                if content_type.as_deref() != Some("application/pdf") {
                    return Err(AppError::BadRequest(
                        "Only PDF files are allowed".to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "contract.pdf".to_string());
                let data = field.bytes().await?;
                pdf_data = Some((filename, data.to_vec()));
            }
            Some("contract_id") => {
                let text = field.text().await?;
                contract_id = Some(text.trim().parse().map_err(|_| {
                    AppError::BadRequest("Invalid contract_id".to_string())
                })?);
            }
            _ => {}
        }
    }

    let (filename, data) =
        pdf_data.ok_or_else(|| AppError::BadRequest("PDF file is required".to_string()))?;
    let contract_id =
        contract_id.ok_or_else(|| AppError::BadRequest("contract_id is required".to_string()))?;

    let repo = ContractRepository::new(config.database_pool.clone());
    repo.find_by_id(contract_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

    let storage = FileStorage::new(&config.file_storage_path)?;
    let stored_path = storage.save_file(&filename, &data)?;
    repo.set_pdf_path(contract_id, &stored_path).await?;

    tracing::info!(contract_id, path = %stored_path, "contract PDF stored");
    Ok(Json(json!({ "message": "PDF uploaded successfully", "pdf_path": stored_path })))
}

pub async fn download_pdf(
    State(config): State<AppConfig>,
    Path(contract_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let repo = ContractRepository::new(config.database_pool.clone());
    let contract = repo
        .find_by_id(contract_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

    let pdf_path = contract
        .pdf_path
        .ok_or_else(|| AppError::NotFound("No PDF attached to this contract".to_string()))?;

    let storage = FileStorage::new(&config.file_storage_path)?;
    let data = storage.read_file(&pdf_path)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", pdf_path),
            ),
        ],
        data,
    ))
}

pub async fn analyze_contract(
    State(config): State<AppConfig>,
    Extension(_claims): Extension<Claims>,
    Path(contract_id): Path<i64>,
    Json(request): Json<AnalyzeContractRequest>,
) -> Result<Json<Value>> {
    let repo = ContractRepository::new(config.database_pool.clone());
    let contract = repo
        .find_by_id(contract_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contract not found".to_string()))?;

    let assistant = AssistantService::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    );
    let analysis = assistant
        .analyze_contract(&contract, request.question.as_deref())
        .await?;

    Ok(Json(json!({ "analysis": analysis })))
}
