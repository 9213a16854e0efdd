//! Application bootstrap: database, session store, modules, HTTP.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use shelf_authz::{MemorySessionStore, SessionGuard};
use shelf_kernel::settings::Settings;
use shelf_kernel::{InitCtx, ModuleRegistry};
use sqlx::SqlitePool;

use crate::modules::{self, books::BookRepo, users::UserRepo};

/// A bootstrapped application: migrated database and started modules.
pub struct App {
    pub settings: Settings,
    pub db: SqlitePool,
    pub registry: ModuleRegistry,
    pub guard: SessionGuard,
    /// Migrations applied during bootstrap
    pub migrations_applied: usize,
}

impl App {
    /// Connect, register and initialize modules, migrate, then start modules.
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        tracing::info!(
            env = ?settings.environment,
            db = %settings.database.url,
            "shelf bootstrap starting"
        );

        let db = shelf_db::connect(&settings.database).await?;
        let guard = SessionGuard::from_settings(Arc::new(MemorySessionStore::new()), &settings.auth);

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &db, &guard)?;

        let ctx = InitCtx {
            settings: &settings,
            db: &db,
        };
        registry.init_modules(&ctx).await?;

        let migrations_applied = shelf_db::run_migrations(&db, &registry.collect_migrations())
            .await
            .context("failed to run migrations")?;

        registry.start_modules(&ctx).await?;

        tracing::info!(
            modules = registry.len(),
            migrations_applied,
            "shelf bootstrap complete"
        );

        Ok(Self {
            settings,
            db,
            registry,
            guard,
            migrations_applied,
        })
    }

    pub fn router(&self) -> Router {
        shelf_http::build_router(&self.registry, &self.settings)
    }

    pub fn books(&self) -> BookRepo {
        BookRepo::new(self.db.clone())
    }

    pub fn users(&self) -> UserRepo {
        UserRepo::new(self.db.clone())
    }

    /// Serve HTTP until shutdown, then stop modules and close the pool.
    pub async fn serve(self) -> anyhow::Result<()> {
        let served = shelf_http::start_server(&self.registry, &self.settings).await;
        self.shutdown().await?;
        served
    }

    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.registry.stop_modules().await?;
        self.db.close().await;
        Ok(())
    }
}
