//! Server-side sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

/// An authenticated session, located by its opaque token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn new(user_id: i64, username: impl Into<String>, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc();

        Self {
            token: Uuid::new_v4().simple().to_string(),
            user_id,
            username: username.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc())
    }
}

/// Storage for sessions keyed by token.
///
/// Expired sessions are never returned from `get`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create and persist a fresh session for the user.
    async fn create(&self, user_id: i64, username: &str, ttl: Duration) -> Session;

    async fn get(&self, token: &str) -> Option<Session>;

    /// Remove a session. Returns whether it existed.
    async fn destroy(&self, token: &str) -> bool;

    /// Drop every expired session, returning how many were removed.
    async fn purge_expired(&self) -> usize;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: i64, username: &str, ttl: Duration) -> Session {
        let session = Session::new(user_id, username, ttl);
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        session
    }

    async fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;

        if session.is_expired() {
            self.sessions.write().await.remove(token);
            tracing::debug!(user_id = session.user_id, "expired session evicted");
            return None;
        }

        Some(session)
    }

    async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    async fn purge_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        before - sessions.len()
    }
}
