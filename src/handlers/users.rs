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
    models::user::{UpdateUserRequest, UserResponse, UserRole},
    repositories::UserRepository,
};

/// Resolved profile of the calling user; the inquiry form pre-fills its
/// contact snapshot from this.
pub async fn me(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let user = repo
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user.into()))
}

pub async fn list_users(State(config): State<AppConfig>) -> Result<Json<Vec<UserResponse>>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let users = repo.list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn get_user(
    State(config): State<AppConfig>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let repo = UserRepository::new(config.database_pool.clone());
    let user = repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user.into()))
}

/// Users may edit their own row; admins may edit anyone's.
pub async fn update_user(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    request.validate()?;

    if claims.user_id != user_id && claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "You do not have permission to update this user".to_string(),
        ));
    }

    let repo = UserRepository::new(config.database_pool.clone());
    let user = repo
        .update(user_id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user.into()))
}
