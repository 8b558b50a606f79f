use axum::{
    extract::{Extension, Path, State},
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
    models::{
        property::{CreatePropertyRequest, EstimateRequest, Property, UpdatePropertyRequest},
        user::UserRole,
    },
    repositories::{PropertyRepository, UserRepository},
    services::AssistantService,
};

/// Visibility depends on who is asking: everyone sees verified listings,
/// an agent additionally sees their own unverified ones, an admin sees all.
pub async fn list_properties(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Property>>> {
    let repo = PropertyRepository::new(config.database_pool.clone());

    let properties = match claims.role {
        UserRole::Admin => repo.list_all().await?,
        UserRole::Agent => {
            let users = UserRepository::new(config.database_pool.clone());
            match users.find_agent_by_user(claims.user_id).await? {
                Some(agent) => repo.list_visible_to_agent(agent.id).await?,
                None => repo.list_verified().await?,
            }
        }
        UserRole::Buyer => repo.list_verified().await?,
    };

    Ok(Json(properties))
}

pub async fn get_property(
    State(config): State<AppConfig>,
    Path(property_id): Path<i64>,
) -> Result<Json<Property>> {
    let repo = PropertyRepository::new(config.database_pool.clone());
    let property = repo
        .find_by_id(property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;
    Ok(Json(property))
}

pub async fn create_property(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<Json<Property>> {
    request.validate()?;

    if claims.role != UserRole::Agent {
        return Err(AppError::Forbidden(
            "Only agents can create properties".to_string(),
        ));
    }

    let users = UserRepository::new(config.database_pool.clone());
    let agent = users
        .find_agent_by_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent profile not found".to_string()))?;

    let repo = PropertyRepository::new(config.database_pool.clone());
    let property = repo.create(agent.id, &request).await?;

    tracing::info!(property_id = property.id, agent_id = agent.id, "property created");
    Ok(Json(property))
}

pub async fn update_property(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<i64>,
    Json(request): Json<UpdatePropertyRequest>,
) -> Result<Json<Property>> {
    request.validate()?;

    let repo = PropertyRepository::new(config.database_pool.clone());
    let existing = repo
        .find_by_id(property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

    authorize_owner_or_admin(&config, &claims, &existing).await?;

    let property = repo
        .update(property_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;
    Ok(Json(property))
}

pub async fn delete_property(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<i64>,
) -> Result<Json<Value>> {
    let repo = PropertyRepository::new(config.database_pool.clone());
    let existing = repo
        .find_by_id(property_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;

    authorize_owner_or_admin(&config, &claims, &existing).await?;

    repo.delete(property_id).await?;
    Ok(Json(json!({ "message": "Property deleted successfully" })))
}

pub async fn estimate_property(
    State(config): State<AppConfig>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<Value>> {
    let assistant = AssistantService::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
    );
    let estimate = assistant.estimate_property_value(&request).await?;

    Ok(Json(json!({ "estimate": estimate })))
}

async fn authorize_owner_or_admin(
    config: &AppConfig,
    claims: &Claims,
    property: &Property,
) -> Result<()> {
    if claims.role == UserRole::Admin {
        return Ok(());
    }

    let users = UserRepository::new(config.database_pool.clone());
    let owns = users
        .find_agent_by_user(claims.user_id)
        .await?
        .map(|agent| agent.id == property.agents_id)
        .unwrap_or(false);

    if owns {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission to modify this property".to_string(),
        ))
    }
}
