//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{CreateUserRequest, User};
use crate::utils::errors::SksError;

const USER_COLUMNS: &str = "id, mobile, first_name, last_name, email, is_admin, is_selected, is_rejected, whatsapp_sent, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, SksError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (mobile, first_name, last_name, email, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.mobile)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.email)
        .bind(request.is_admin)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, SksError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Find user by mobile number
    pub async fn find_by_mobile(&self, mobile: &str) -> Result<Option<User>, SksError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE mobile = $1"
        ))
        .bind(mobile)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users with pagination, newest first
    pub async fn list(&self, limit: i64, offset: i64, non_admin_only: bool) -> Result<Vec<User>, SksError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE ($3 = FALSE OR is_admin = FALSE) ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .bind(non_admin_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count users
    pub async fn count(&self, non_admin_only: bool) -> Result<i64, SksError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE ($1 = FALSE OR is_admin = FALSE)",
        )
        .bind(non_admin_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Mark a non-admin user selected (approved) or rejected
    ///
    /// Returns `None` when no non-admin user has this ID.
    pub async fn set_selection(&self, id: i64, selected: bool) -> Result<Option<User>, SksError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_selected = $2, is_rejected = NOT $2, updated_at = $3
            WHERE id = $1 AND is_admin = FALSE
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(selected)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Flip the WhatsApp-notified flag, treating NULL as false
    pub async fn toggle_whatsapp(&self, id: i64) -> Result<Option<User>, SksError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET whatsapp_sent = NOT COALESCE(whatsapp_sent, FALSE), updated_at = $2
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
