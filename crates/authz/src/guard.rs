//! Request guards resolving the session cookie to a signed-in user.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::InvalidHeaderValue;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use time::Duration;

use shelf_kernel::settings::AuthSettings;

use crate::cookie::SessionCookie;
use crate::session::{Session, SessionStore};

/// Where anonymous clients are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// The user behind the current request's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
}

impl From<&Session> for CurrentUser {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id,
            username: session.username.clone(),
        }
    }
}

/// Reads the `CurrentUser` placed in request extensions by [`require_user`].
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Ties the session store to the session cookie.
#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    cookie: SessionCookie,
    ttl: Duration,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn SessionStore>, cookie: SessionCookie, ttl: Duration) -> Self {
        Self { store, cookie, ttl }
    }

    pub fn from_settings(store: Arc<dyn SessionStore>, settings: &AuthSettings) -> Self {
        let ttl = Duration::seconds(settings.session_ttl_secs.min(u64::from(u32::MAX)) as i64);
        Self::new(store, SessionCookie::from_settings(settings), ttl)
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Resolve the session cookie, if any, to a live session.
    pub async fn session(&self, headers: &HeaderMap) -> Option<Session> {
        let token = self.cookie.read(headers)?;
        self.store.get(token).await
    }

    pub async fn current_user(&self, headers: &HeaderMap) -> Option<CurrentUser> {
        self.session(headers)
            .await
            .map(|session| CurrentUser::from(&session))
    }

    /// Open a session for the user and return it with its `Set-Cookie` value.
    /// A session the request already carries is closed first.
    pub async fn sign_in(
        &self,
        headers: &HeaderMap,
        user_id: i64,
        username: &str,
    ) -> Result<(Session, HeaderValue), InvalidHeaderValue> {
        if let Some(token) = self.cookie.read(headers) {
            if self.store.destroy(token).await {
                tracing::debug!("previous session replaced");
            }
        }

        let purged = self.store.purge_expired().await;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions purged");
        }

        let session = self.store.create(user_id, username, self.ttl).await;
        let cookie = self.cookie.issue(&session.token)?;
        tracing::info!(user_id, username, "session opened");
        Ok((session, cookie))
    }

    /// Close the request's session, if any, and return the clearing `Set-Cookie` value.
    pub async fn sign_out(&self, headers: &HeaderMap) -> Result<HeaderValue, InvalidHeaderValue> {
        if let Some(token) = self.cookie.read(headers) {
            if self.store.destroy(token).await {
                tracing::info!("session closed");
            }
        }
        self.cookie.clear()
    }
}

/// Middleware admitting only requests with a live session.
///
/// Signed-in requests get a [`CurrentUser`] extension; anonymous ones are
/// redirected to the login form.
pub async fn require_user(
    State(guard): State<SessionGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    match guard.current_user(request.headers()).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "anonymous request redirected to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}
