use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    config::AppConfig,
    middleware::{
        error_handling::{AppError, Result},
        Claims,
    },
    models::{file::FileWithOwner, property::Property, user::{RoleProfile, UserRole}},
    repositories::{FileRepository, PropertyRepository, UserRepository},
};

pub async fn dashboard(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>> {
    require_admin(&claims)?;

    let pool = &config.database_pool;
    let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let total_agents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM agents")
        .fetch_one(pool)
        .await?;
    let total_buyers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buyers")
        .fetch_one(pool)
        .await?;
    let total_properties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
        .fetch_one(pool)
        .await?;
    let total_inquiries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inquiries")
        .fetch_one(pool)
        .await?;
    let pending_agents: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM agents WHERE is_verified = 0")
            .fetch_one(pool)
            .await?;
    let pending_buyers: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM buyers WHERE is_verified = 0")
            .fetch_one(pool)
            .await?;
    let pending_properties: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE is_verified = 0")
            .fetch_one(pool)
            .await?;

    Ok(Json(json!({
        "total_users": total_users,
        "total_agents": total_agents,
        "total_buyers": total_buyers,
        "total_properties": total_properties,
        "total_inquiries": total_inquiries,
        "pending_agents": pending_agents,
        "pending_buyers": pending_buyers,
        "pending_properties": pending_properties,
    })))
}

pub async fn pending_agents(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<RoleProfile>>> {
    require_admin(&claims)?;
    let repo = UserRepository::new(config.database_pool.clone());
    Ok(Json(repo.pending_agents().await?))
}

pub async fn pending_buyers(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<RoleProfile>>> {
    require_admin(&claims)?;
    let repo = UserRepository::new(config.database_pool.clone());
    Ok(Json(repo.pending_buyers().await?))
}

pub async fn pending_properties(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Property>>> {
    require_admin(&claims)?;
    let repo = PropertyRepository::new(config.database_pool.clone());
    Ok(Json(repo.pending().await?))
}

/// Verification documents across all users, joined with the uploader's
/// name and role, for review ahead of verify-agent / verify-buyer.
pub async fn list_files(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<FileWithOwner>>> {
    require_admin(&claims)?;
    let repo = FileRepository::new(config.database_pool.clone());
    Ok(Json(repo.list_with_owners().await?))
}

pub async fn verify_agent(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(agent_id): Path<i64>,
) -> Result<Json<Value>> {
    require_admin(&claims)?;
    let repo = UserRepository::new(config.database_pool.clone());
    if !repo.verify_agent(agent_id).await? {
        return Err(AppError::NotFound("Agent not found".to_string()));
    }
    Ok(Json(json!({ "message": "Agent verified successfully" })))
}

pub async fn verify_buyer(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(buyer_id): Path<i64>,
) -> Result<Json<Value>> {
    require_admin(&claims)?;
    let repo = UserRepository::new(config.database_pool.clone());
    if !repo.verify_buyer(buyer_id).await? {
        return Err(AppError::NotFound("Buyer not found".to_string()));
    }
    Ok(Json(json!({ "message": "Buyer verified successfully" })))
}

pub async fn verify_property(
    State(config): State<AppConfig>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<i64>,
) -> Result<Json<Value>> {
    require_admin(&claims)?;
    let repo = PropertyRepository::new(config.database_pool.clone());
    if !repo.verify(property_id).await? {
        return Err(AppError::NotFound("Property not found".to_string()));
    }
    Ok(Json(json!({ "message": "Property verified successfully" })))
}

fn require_admin(claims: &Claims) -> Result<()> {
    if claims.role == UserRole::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Admin access required".to_string(),
        ))
    }
}
