use chrono::Utc;
use sqlx::SqlitePool;

use crate::middleware::error_handling::Result;
use crate::models::user::{CreateUserRequest, RoleProfile, UpdateUserRequest, User, UserRole};

const USER_COLUMNS: &str = "id, name, email, password_hash, phone_number, role, created_at";

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the user plus its 1:1 role-extension row in one transaction so
    /// a half-registered account can never be observed.
    pub async fn create(&self, request: &CreateUserRequest, password_hash: &str) -> Result<User> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let user_id = sqlx::query(
            "INSERT INTO users (name, email, password_hash, phone_number, role, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(password_hash)
        .bind(&request.phone_number)
        .bind(request.role)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        match request.role {
            UserRole::Agent => {
                sqlx::query("INSERT INTO agents (users_id, is_verified) VALUES (?, 0)")
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
            }
            UserRole::Buyer => {
                sqlx::query("INSERT INTO buyers (users_id, is_verified) VALUES (?, 0)")
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
            }
            UserRole::Admin => {}
        }

        tx.commit().await?;

        Ok(User {
            id: user_id,
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash: password_hash.to_string(),
            phone_number: request.phone_number.clone(),
            role: request.role,
            created_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> Result<Option<User>> {
        let result = sqlx::query(
            "UPDATE users
             SET name = COALESCE(?, name),
                 email = COALESCE(?, email),
                 phone_number = COALESCE(?, phone_number)
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    /// Display name for a user id; None when the row is gone.
    pub async fn display_name(&self, id: i64) -> Result<Option<String>> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }

    pub async fn admin_user_ids(&self) -> Result<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM users WHERE role = 'admin'")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    // ------------------------------------------------------------------
    // Role-extension rows (agents / buyers)
    // ------------------------------------------------------------------

    pub async fn list_agents(&self) -> Result<Vec<RoleProfile>> {
        let agents = sqlx::query_as::<_, RoleProfile>(
            "SELECT a.id, a.users_id, a.is_verified, u.name, u.email, u.phone_number
             FROM agents a JOIN users u ON a.users_id = u.id
             ORDER BY a.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(agents)
    }

    pub async fn find_agent(&self, agent_id: i64) -> Result<Option<RoleProfile>> {
        let agent = sqlx::query_as::<_, RoleProfile>(
            "SELECT a.id, a.users_id, a.is_verified, u.name, u.email, u.phone_number
             FROM agents a JOIN users u ON a.users_id = u.id
             WHERE a.id = ?",
        )
        .bind(agent_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(agent)
    }

    /// Resolves the owning user of an agent row without joining `users`, so a
    /// dangling agent reference surfaces as a missing user rather than a
    /// missing agent.
    pub async fn agent_user_id(&self, agent_id: i64) -> Result<Option<i64>> {
        let users_id = sqlx::query_scalar::<_, i64>("SELECT users_id FROM agents WHERE id = ?")
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(users_id)
    }

    pub async fn find_agent_by_user(&self, user_id: i64) -> Result<Option<RoleProfile>> {
        let agent = sqlx::query_as::<_, RoleProfile>(
            "SELECT a.id, a.users_id, a.is_verified, u.name, u.email, u.phone_number
             FROM agents a JOIN users u ON a.users_id = u.id
             WHERE a.users_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(agent)
    }

    pub async fn list_buyers(&self) -> Result<Vec<RoleProfile>> {
        let buyers = sqlx::query_as::<_, RoleProfile>(
            "SELECT b.id, b.users_id, b.is_verified, u.name, u.email, u.phone_number
             FROM buyers b JOIN users u ON b.users_id = u.id
             ORDER BY b.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(buyers)
    }

    pub async fn find_buyer(&self, buyer_id: i64) -> Result<Option<RoleProfile>> {
        let buyer = sqlx::query_as::<_, RoleProfile>(
            "SELECT b.id, b.users_id, b.is_verified, u.name, u.email, u.phone_number
             FROM buyers b JOIN users u ON b.users_id = u.id
             WHERE b.id = ?",
        )
        .bind(buyer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(buyer)
    }

    pub async fn find_buyer_by_user(&self, user_id: i64) -> Result<Option<RoleProfile>> {
        let buyer = sqlx::query_as::<_, RoleProfile>(
            "SELECT b.id, b.users_id, b.is_verified, u.name, u.email, u.phone_number
             FROM buyers b JOIN users u ON b.users_id = u.id
             WHERE b.users_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(buyer)
    }

    pub async fn pending_agents(&self) -> Result<Vec<RoleProfile>> {
        let agents = sqlx::query_as::<_, RoleProfile>(
            "SELECT a.id, a.users_id, a.is_verified, u.name, u.email, u.phone_number
             FROM agents a JOIN users u ON a.users_id = u.id
             WHERE a.is_verified = 0",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(agents)
    }

    pub async fn pending_buyers(&self) -> Result<Vec<RoleProfile>> {
        let buyers = sqlx::query_as::<_, RoleProfile>(
            "SELECT b.id, b.users_id, b.is_verified, u.name, u.email, u.phone_number
             FROM buyers b JOIN users u ON b.users_id = u.id
             WHERE b.is_verified = 0",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(buyers)
    }

    pub async fn verify_agent(&self, agent_id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE agents SET is_verified = 1 WHERE id = ?")
            .bind(agent_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn verify_buyer(&self, buyer_id: i64) -> Result<bool> {
        let result = sqlx::query("UPDATE buyers SET is_verified = 1 WHERE id = ?")
            .bind(buyer_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
