use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::auth::{error::AuthError, repo_types::User};

/// Persistence boundary for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return the stored record.
    ///
    /// Fails with [`AuthError::DuplicateUsername`] if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AuthError>;
    async fn find_by_username(&self, username: &str) -> Result<User, AuthError>;
    async fn find_by_id(&self, id: i64) -> Result<User, AuthError>;
    async fn exists(&self, username: &str) -> Result<bool, AuthError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        if self.exists(username).await? {
            return Err(AuthError::DuplicateUsername);
        }

        // The UNIQUE constraint still catches a racing insert that passed the check above.
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                warn!(%username, "duplicate username caught by unique constraint");
                return Err(AuthError::DuplicateUsername);
            }
            Err(e) => return Err(e.into()),
        };

        debug!(user_id = id, "user row inserted");
        self.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at, is_active
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AuthError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, AuthError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AuthError::NotFound)
    }

    async fn exists(&self, username: &str) -> Result<bool, AuthError> {
        let found = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)"#,
        )
        .bind(username)
        .fetch_one(&self.db)
        .await?;
        Ok(found)
    }
}
