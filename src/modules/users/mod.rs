pub mod models;
pub mod password;
pub mod repo;

use async_trait::async_trait;
use shelf_kernel::{InitCtx, Migration, Module};

pub use models::User;
pub use repo::UserRepo;

/// Owns the `users` table. Accounts are managed through the auth pages and the CLI.
pub struct UsersModule;

impl UsersModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for UsersModule {
    fn default() -> Self {
        Self::new()
    }
}

pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_init",
        up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            );
        "#,
    }]
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(ctx.db)
            .await?;
        if count == 0 {
            tracing::warn!(
                module = self.name(),
                "no users yet; register at /auth/register or run `shelf-cli create-user`"
            );
        }
        Ok(())
    }
}
