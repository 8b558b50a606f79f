use axum::{
    extract::{Extension, Path, State},
    Json,
};
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::{
        error_handling::{AppError, Result},
        Claims,
    },
    models::{
        property::Property,
        user::{RoleProfile, UpdateUserRequest, UserRole},
    },
    repositories::{PropertyRepository, UserRepository},
};

pub async fn list_agents(State(config): State<AppConfig>) -> Result<Json<Vec<RoleProfile>>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let agents = repo.list_agents().await?;
    Ok(Json(agents))
}

pub async fn get_agent(
    State(config): State<AppConfig>,
    Path(agent_id): Path<i64>,
) -> Result<Json<RoleProfile>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let agent = repo
        .find_agent(agent_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;
    Ok(Json(agent))
}

pub async fn agent_properties(
    State(config): State<AppConfig>,
    Path(agent_id): Path<i64>,
) -> Result<Json<Vec<Property>>> {
    let users = UserRepository::new(config.database_pool.clone());
    users
        .find_agent(agent_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent not found".to_string()))?;

    let repo = PropertyRepository::new(config.database_pool.clone());
    let properties = repo.list_by_agent(agent_id).await?;
    Ok(Json(properties))
}

pub async fn get_own_profile(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<RoleProfile>> {
    require_agent(&claims)?;

    let repo = UserRepository::new(config.database_pool.clone());
    let agent = repo
        .find_agent_by_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent profile not found".to_string()))?;
    Ok(Json(agent))
}

pub async fn update_own_profile(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<RoleProfile>> {
    require_agent(&claims)?;
    request.validate()?;

    let repo = UserRepository::new(config.database_pool.clone());
    repo.update(claims.user_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let agent = repo
        .find_agent_by_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Agent profile not found".to_string()))?;
    Ok(Json(agent))
}

fn require_agent(claims: &Claims) -> Result<()> {
    if claims.role == UserRole::Agent {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only agents can access this endpoint".to_string(),
        ))
    }
}
