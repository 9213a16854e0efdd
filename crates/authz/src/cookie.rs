//! Session cookie encoding.

use axum::http::header::{self, InvalidHeaderValue};
use axum::http::{HeaderMap, HeaderValue};

use shelf_kernel::settings::AuthSettings;

/// Attributes of the cookie carrying the session token.
///
/// The cookie is always `HttpOnly`, `SameSite=Lax` and scoped to `/`.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: u64,
}

impl SessionCookie {
    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self {
            name: settings.cookie_name.clone(),
            secure: settings.cookie_secure,
            max_age_secs: settings.session_ttl_secs,
        }
    }

    /// `Set-Cookie` value issuing `token`.
    pub fn issue(&self, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.name, token, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` value that makes the client drop the cookie.
    pub fn clear(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
            self.name
        ))
    }

    /// Read the token from the request's `Cookie` headers.
    pub fn read<'h>(&self, headers: &'h HeaderMap) -> Option<&'h str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .find_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key == self.name && !value.is_empty()).then_some(value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie() -> SessionCookie {
        SessionCookie {
            name: "shelf_session".to_string(),
            secure: false,
            max_age_secs: 3600,
        }
    }

    #[test]
    fn issued_cookie_carries_attributes() {
        let value = cookie().issue("abc123").unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("shelf_session=abc123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Max-Age=3600"));
        assert!(!value.contains("Secure"));

        let secure = SessionCookie {
            secure: true,
            ..cookie()
        };
        assert!(secure.issue("abc").unwrap().to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let value = cookie().clear().unwrap();
        assert!(value.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn token_is_read_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; shelf_session=tok42; lang=en"),
        );
        assert_eq!(cookie().read(&headers), Some("tok42"));
    }

    #[test]
    fn empty_or_missing_token_reads_as_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(cookie().read(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("shelf_session="));
        assert_eq!(cookie().read(&headers), None);
    }
}
