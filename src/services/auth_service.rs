use crate::middleware::error_handling::{AppError, Result};
use crate::middleware::JwtService;
use crate::models::user::{CreateUserRequest, LoginRequest, UpdateUserRequest, UserResponse};
use crate::repositories::UserRepository;

pub struct AuthService {
    user_repo: UserRepository,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: &str) -> Self {
        Self {
            user_repo,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub async fn register(&self, request: CreateUserRequest) -> Result<(UserResponse, String)> {
        if self.user_repo.email_exists(&request.email).await? {
            return Err(AppError::BadRequest("Email already exists".to_string()));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
        let user = self.user_repo.create(&request, &password_hash).await?;
        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, user.role)?;

        tracing::info!("New user registered: id={}, role={}", user.id, user.role.as_str());

        Ok((user.into(), token))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<(UserResponse, String)> {
        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        // Same error for unknown email and wrong password.
        if !bcrypt::verify(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, user.role)?;

        Ok((user.into(), token))
    }

    pub async fn get_user(&self, user_id: i64) -> Result<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    pub async fn update_user(&self, user_id: i64, request: UpdateUserRequest) -> Result<UserResponse> {
        let user = self
            .user_repo
            .update(user_id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }
}
