pub mod routes;
pub mod views;

use async_trait::async_trait;
use axum::{routing::get, Router};
use shelf_authz::SessionGuard;
use shelf_kernel::{InitCtx, Module};

use crate::modules::users::UserRepo;
use routes::AuthState;

/// Session lifecycle pages under `/auth`.
pub struct AuthModule {
    users: UserRepo,
    guard: SessionGuard,
}

impl AuthModule {
    pub fn new(users: UserRepo, guard: SessionGuard) -> Self {
        Self { users, guard }
    }
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            cookie = %ctx.settings.auth.cookie_name,
            ttl_secs = ctx.settings.auth.session_ttl_secs,
            "auth module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        let state = AuthState {
            users: self.users.clone(),
            guard: self.guard.clone(),
        };

        Router::new()
            .route("/auth/login", get(routes::login_form).post(routes::login))
            .route("/auth/logout", get(routes::logout))
            .route(
                "/auth/register",
                get(routes::register_form).post(routes::register),
            )
            .with_state(state)
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let purged = self.guard.store().purge_expired().await;
        tracing::info!(module = self.name(), purged, "auth module stopped");
        Ok(())
    }
}
