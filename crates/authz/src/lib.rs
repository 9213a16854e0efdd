//! Authentication plumbing: server-side sessions keyed by a cookie token.

pub mod cookie;
pub mod guard;
pub mod session;

pub use cookie::SessionCookie;
pub use guard::{require_user, CurrentUser, SessionGuard, LOGIN_PATH};
pub use session::{MemorySessionStore, Session, SessionStore};
