use shelf_db::{RepoError, RepoResult};
use sqlx::SqlitePool;

use super::models::User;
use super::password;

const ENTITY: &str = "user";

/// Data access for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepo {
    pool: SqlitePool,
}

impl UserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Create an account, storing only the password hash.
    pub async fn add(&self, username: &str, password: &str) -> RepoResult<User> {
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| RepoError::Password(e.to_string()))??;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash) VALUES (?, ?) \
             RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::from_insert(e, ENTITY, username))?;

        tracing::info!(user_id = user.id, username, "user added");
        Ok(user)
    }

    /// The user whose password matches, or `None` for an unknown user or a
    /// wrong password alike.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> RepoResult<Option<User>> {
        let user = self.get_by_username(username).await?;

        let password = password.to_owned();
        let stored = user.as_ref().map(|user| user.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || {
            password::verify_password(&password, password::stored_or_dummy(stored.as_deref()))
        })
        .await
        .map_err(|e| RepoError::Password(e.to_string()))?;

        Ok(user.filter(|_| verified))
    }
}
