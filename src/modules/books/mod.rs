pub mod models;
pub mod repo;
pub mod routes;
pub mod views;

use async_trait::async_trait;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use shelf_authz::{require_user, SessionGuard};
use shelf_kernel::{InitCtx, Migration, Module};

pub use models::Book;
pub use repo::BookRepo;
use routes::BooksState;

/// Book CRUD pages; every `/books` route requires a signed-in user.
pub struct BooksModule {
    repo: BookRepo,
    guard: SessionGuard,
}

impl BooksModule {
    pub fn new(repo: BookRepo, guard: SessionGuard) -> Self {
        Self { repo, guard }
    }
}

pub fn migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_init",
        up: r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL
            );
        "#,
    }]
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        let state = BooksState {
            repo: self.repo.clone(),
        };

        let protected = Router::new()
            .route("/books", get(routes::list_books).post(routes::create_book))
            .route("/books/", get(routes::list_books))
            .route("/books/update", post(routes::update_book))
            .route("/books/delete/{id}", post(routes::delete_book))
            .route_layer(middleware::from_fn_with_state(
                self.guard.clone(),
                require_user,
            ))
            .with_state(state);

        Router::new().route("/", get(routes::index)).merge(protected)
    }

    fn migrations(&self) -> Vec<Migration> {
        migrations()
    }

    async fn start(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(ctx.db)
            .await?;
        tracing::info!(module = self.name(), books = count, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}
