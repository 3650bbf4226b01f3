//! Session cookie handling and the session extractors.
//!
//! # Responsibilities
//! - Read the session token from the `Cookie` header
//! - Resolve it into a `SessionContext` through the auth service
//! - Build the `Set-Cookie` values for login and logout
//!
//! # Design Decisions
//! - Any lookup failure is treated as "not logged in" (303 to the login page)
//! - Cookies are `HttpOnly` and `SameSite=Lax`; `Secure` is configurable

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};

use crate::config::AppConfig;
use crate::domain::SessionContext;
use crate::error::AppError;
use crate::http::server::AppState;

/// Value of the cookie named `name`, if the request carries one.
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value storing a fresh session token.
pub fn session_cookie(config: &AppConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if config.security.secure_cookies { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
        config.frontend.session_cookie_name, token, config.frontend.session_max_age_secs, secure
    ))
}

/// `Set-Cookie` value removing the session cookie.
pub fn expired_session_cookie(config: &AppConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        config.frontend.session_cookie_name
    ))
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.config.frontend.session_cookie_name)
            .ok_or(AppError::Unauthorized)?;

        state.auth.session_context(&token).await.map_err(|err| {
            tracing::debug!(error = %err, "Session lookup failed");
            AppError::Unauthorized
        })
    }
}

/// Session for pages that render for anonymous visitors too.
#[derive(Debug, Clone, Default)]
pub struct MaybeSession(pub Option<SessionContext>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self(SessionContext::from_request_parts(parts, state).await.ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; recipes_session=abc123"));
        headers.append(COOKIE, HeaderValue::from_static("other=1"));

        assert_eq!(session_token(&headers, "recipes_session"), Some("abc123".to_string()));
        assert_eq!(session_token(&headers, "missing"), None);
    }

    #[test]
    fn test_empty_cookie_value_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("recipes_session="));
        assert_eq!(session_token(&headers, "recipes_session"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let mut config = AppConfig::default();
        let cookie = session_cookie(&config, "tok").unwrap();
        assert_eq!(cookie, "recipes_session=tok; Path=/; Max-Age=86400; HttpOnly; SameSite=Lax");

        config.security.secure_cookies = true;
        let cookie = session_cookie(&config, "tok").unwrap();
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));

        let expired = expired_session_cookie(&config).unwrap();
        assert!(expired.to_str().unwrap().contains("Max-Age=0"));
    }
}
