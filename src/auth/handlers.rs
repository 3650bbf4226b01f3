//! Login, logout, registration and TOTP verification routes.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use url::{form_urlencoded, Url};

use super::{AuthError, LoginInput, RegistrationInput, TotpVerificationInput};
use crate::domain::SessionContext;
use crate::error::{AppError, LogError};
use crate::http::form::{decode_command, extract_form, FormValues};
use crate::http::response::{html, htmx_redirect, HOME_PATH, LOGIN_PATH};
use crate::http::server::AppState;
use crate::http::session::{expired_session_cookie, session_cookie};
use crate::views::templates::{LoginView, RegistrationView, TotpSetupView};
use crate::views::{PageData, RenderMode};

const REDIRECT_TO: &str = "redirectTo";
const LOGIN_PROMPT_PATH: &str = "/components/login_prompt";
const REGISTER_PATH: &str = "/register";
const REGISTRATION_PROMPT_PATH: &str = "/components/registration_prompt";
const TOTP_VERIFY_PATH: &str = "/totp/verify";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_view).post(login))
        .route(LOGIN_PROMPT_PATH, get(login_prompt))
        .route("/logout", post(logout))
        .route(REGISTER_PATH, get(registration_view).post(register))
        .route(REGISTRATION_PROMPT_PATH, get(registration_prompt))
        .route(TOTP_VERIFY_PATH, post(verify_totp))
}

/// Post-login destination taken from `?redirectTo=`.
///
/// Only local absolute paths are kept; anything else becomes `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(pub String);

impl RedirectTarget {
    pub fn from_query(query: Option<&str>) -> Self {
        let requested = query.and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == REDIRECT_TO)
                .map(|(_, value)| value.into_owned())
        });

        match requested {
            Some(path) if is_local_path(&path) => Self(path),
            _ => Self(HOME_PATH.to_string()),
        }
    }

    /// Login form action carrying this target along.
    fn login_url(&self) -> String {
        if self.0 == HOME_PATH {
            return LOGIN_PATH.to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(REDIRECT_TO, &self.0)
            .finish();
        format!("{LOGIN_PATH}?{query}")
    }
}

/// Origin local targets are resolved against; only its identity matters.
const LOCAL_ORIGIN: &str = "http://localhost";

/// Browsers strip tabs and newlines before navigating, so any control or
/// whitespace character disqualifies a target.
fn is_local_path(path: &str) -> bool {
    if !path.starts_with('/') || path.starts_with("//") || path.contains('\\') {
        return false;
    }
    if path.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return false;
    }
    let Ok(base) = Url::parse(LOCAL_ORIGIN) else {
        return false;
    };
    base.join(path).is_ok_and(|resolved| resolved.origin() == base.origin())
}

impl<S: Send + Sync> FromRequestParts<S> for RedirectTarget {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(parts.uri.query()))
    }
}

fn cookie_error(err: axum::http::header::InvalidHeaderValue) -> AppError {
    AppError::Auth(AuthError::Unavailable(format!("session cookie: {err}")))
}

fn login_input(form: &FormValues) -> LoginInput {
    LoginInput {
        username: form.get_string("username"),
        password: form.get_string("password"),
        totp_token: form.get_string("totpToken"),
    }
}

fn registration_input(form: &FormValues) -> RegistrationInput {
    RegistrationInput {
        username: form.get_string("username"),
        password: form.get_string("password"),
    }
}

fn totp_verification_input(form: &FormValues) -> TotpVerificationInput {
    TotpVerificationInput {
        user_id: form.get_u64("userID"),
        totp_token: form.get_string("totpToken"),
    }
}

#[tracing::instrument(skip_all)]
async fn login_view(State(state): State<AppState>, target: RedirectTarget) -> Result<Response, AppError> {
    let view = LoginView::new(target.login_url());
    let body = state
        .views
        .render(RenderMode::Page, &PageData::new("Login", None), &view)
        .log_error("rendering login page")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all)]
async fn login_prompt(State(state): State<AppState>, target: RedirectTarget) -> Result<Response, AppError> {
    let view = LoginView::new(target.login_url());
    let body = state
        .views
        .render_fragment(&view)
        .log_error("rendering login prompt")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    target: RedirectTarget,
    body: Body,
) -> Result<Response, AppError> {
    let form = extract_form(body, state.config.security.max_body_size).await;
    let input = decode_command("login", form, login_input)
        .ok_or_else(|| AppError::InvalidInput("invalid login form".into()))?;

    let token = match state.auth.authenticate(&input).await {
        Ok(token) => token,
        Err(err) => {
            tracing::info!(error = %err, "Login rejected");
            let body = state
                .views
                .render_fragment(&LoginView::new(target.login_url()))
                .log_error("rendering login prompt")?;
            return Ok(html(StatusCode::OK, body));
        }
    };

    let cookie = session_cookie(&state.config, &token)
        .log_error("building session cookie")
        .map_err(cookie_error)?;

    let mut response = htmx_redirect(StatusCode::OK, &target.0);
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

#[tracing::instrument(skip_all, fields(user_id = session.user_id()))]
async fn logout(State(state): State<AppState>, session: SessionContext) -> Result<Response, AppError> {
    state
        .auth
        .logout(&session)
        .await
        .log_error("logging user out")?;

    let cookie: HeaderValue = expired_session_cookie(&state.config)
        .log_error("building expired session cookie")
        .map_err(cookie_error)?;

    let mut response = htmx_redirect(StatusCode::OK, HOME_PATH);
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

#[tracing::instrument(skip_all)]
async fn registration_view(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state
        .views
        .render(
            RenderMode::Page,
            &PageData::new("Register", None),
            &RegistrationView::default(),
        )
        .log_error("rendering registration page")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all)]
async fn registration_prompt(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state
        .views
        .render_fragment(&RegistrationView::default())
        .log_error("rendering registration prompt")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all)]
async fn register(State(state): State<AppState>, body: Body) -> Result<Response, AppError> {
    let form = extract_form(body, state.config.security.max_body_size).await;
    let input = decode_command("registration", form, registration_input)
        .ok_or_else(|| AppError::InvalidInput("invalid registration form".into()))?;

    let registration = match state.auth.register(&input).await {
        Ok(registration) => registration,
        Err(err) => {
            tracing::info!(error = %err, "Registration rejected");
            let body = state
                .views
                .render_fragment(&RegistrationView::default())
                .log_error("rendering registration prompt")?;
            return Ok(html(StatusCode::OK, body));
        }
    };

    tracing::info!(user_id = registration.user_id, "User registered");

    let view = TotpSetupView {
        user_id: registration.user_id,
        qr_code: registration.two_factor_qr_code,
        verify_url: TOTP_VERIFY_PATH,
    };
    let body = state
        .views
        .render_fragment(&view)
        .log_error("rendering TOTP setup")?;
    Ok(html(StatusCode::OK, body))
}

#[tracing::instrument(skip_all)]
async fn verify_totp(State(state): State<AppState>, body: Body) -> Result<Response, AppError> {
    let form = extract_form(body, state.config.security.max_body_size).await;
    let input = decode_command("totp verification", form, totp_verification_input)
        .ok_or_else(|| AppError::InvalidInput("invalid TOTP verification form".into()))?;

    state
        .auth
        .verify_totp_secret(&input)
        .await
        .log_error("verifying TOTP secret")?;

    tracing::info!(user_id = input.user_id, "Two-factor secret verified");
    Ok(htmx_redirect(StatusCode::ACCEPTED, LOGIN_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Validate;

    #[test]
    fn test_redirect_target_keeps_local_paths() {
        let target = RedirectTarget::from_query(Some("redirectTo=%2Frecipes%2F4"));
        assert_eq!(target.0, "/recipes/4");
        assert_eq!(target.login_url(), "/login?redirectTo=%2Frecipes%2F4");
    }

    #[test]
    fn test_redirect_target_rejects_foreign_hosts() {
        for query in ["redirectTo=https%3A%2F%2Fevil.example", "redirectTo=%2F%2Fevil.example", "other=1"] {
            assert_eq!(RedirectTarget::from_query(Some(query)).0, "/");
        }
        assert_eq!(RedirectTarget::from_query(None).login_url(), "/login");
    }

    #[test]
    fn test_redirect_target_rejects_control_characters() {
        for query in [
            "redirectTo=%2F%09%2Fevil.example%2Fphish",
            "redirectTo=%2F%0A%2Fevil.example",
            "redirectTo=%2F%0D%0A%2Fevil.example",
            "redirectTo=%2F%20%2Fevil.example",
        ] {
            assert_eq!(RedirectTarget::from_query(Some(query)).0, "/");
        }
        assert!(is_local_path("/recipes/4/recipe_steps?page=2"));
    }

    #[test]
    fn test_login_form_decodes() {
        let form = FormValues::parse("username=cook&password=hunter2&totpToken=123456");
        let input = login_input(&form);
        assert_eq!(input.totp_token, "123456");
        assert!(input.validate().is_ok());
        assert!(login_input(&FormValues::parse("username=cook")).validate().is_err());
    }

    #[test]
    fn test_totp_form_decodes() {
        let form = FormValues::parse("userID=12&totpToken=654321");
        let input = totp_verification_input(&form);
        assert_eq!(input.user_id, 12);
        assert!(input.validate().is_ok());
        assert!(totp_verification_input(&FormValues::parse("userID=abc&totpToken=654321"))
            .validate()
            .is_err());
    }
}
