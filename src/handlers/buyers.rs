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
    models::user::{RoleProfile, UpdateUserRequest, UserRole},
    repositories::UserRepository,
};

pub async fn list_buyers(State(config): State<AppConfig>) -> Result<Json<Vec<RoleProfile>>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let buyers = repo.list_buyers().await?;
    Ok(Json(buyers))
}

pub async fn get_buyer(
    State(config): State<AppConfig>,
    Path(buyer_id): Path<i64>,
) -> Result<Json<RoleProfile>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let buyer = repo
        .find_buyer(buyer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer not found".to_string()))?;
    Ok(Json(buyer))
}

pub async fn get_own_profile(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<RoleProfile>> {
    require_buyer(&claims)?;

    let repo = UserRepository::new(config.database_pool.clone());
    let buyer = repo
        .find_buyer_by_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer profile not found".to_string()))?;
    Ok(Json(buyer))
}

pub async fn update_own_profile(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<RoleProfile>> {
    require_buyer(&claims)?;
    request.validate()?;

    let repo = UserRepository::new(config.database_pool.clone());
    repo.update(claims.user_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let buyer = repo
        .find_buyer_by_user(claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer profile not found".to_string()))?;
    Ok(Json(buyer))
}

fn require_buyer(claims: &Claims) -> Result<()> {
    if claims.role == UserRole::Buyer {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only buyers can access this endpoint".to_string(),
        ))
    }
}
