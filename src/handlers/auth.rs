use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    config::AppConfig,
    middleware::{error_handling::Result, Claims},
    models::user::{CreateUserRequest, LoginRequest, UpdateUserRequest, UserResponse},
    repositories::UserRepository,
    services::AuthService,
};

pub async fn register(
    State(config): State<AppConfig>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let auth_service = AuthService::new(
        UserRepository::new(config.database_pool.clone()),
        &config.jwt_secret,
    );

    let (user, token) = auth_service.register(request).await?;

    Ok(Json(json!({ "token": token, "user": user })))
}

pub async fn login(
    State(config): State<AppConfig>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>> {
    request.validate()?;

    let auth_service = AuthService::new(
        UserRepository::new(config.database_pool.clone()),
        &config.jwt_secret,
    );

    let (user, token) = auth_service.login(request).await?;

    Ok(Json(json!({ "token": token, "user": user })))
}

pub async fn get_profile(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>> {
    let auth_service = AuthService::new(
        UserRepository::new(config.database_pool.clone()),
        &config.jwt_secret,
    );

    let user = auth_service.get_user(claims.user_id).await?;
    Ok(Json(user))
}

pub async fn update_profile(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    request.validate()?;

    let auth_service = AuthService::new(
        UserRepository::new(config.database_pool.clone()),
        &config.jwt_secret,
    );

    let user = auth_service.update_user(claims.user_id, request).await?;
    Ok(Json(user))
}
