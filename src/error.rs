//! Request-level error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::auth::AuthError;
use crate::http::response::LOGIN_PATH;
use crate::store::StoreError;

/// Everything a handler can fail with.
///
/// Downstream failures are never shown to the client; handlers log them with
/// context through [`LogError`] before returning.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("request is not authorized")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("rendering template: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::SEE_OTHER,
            AppError::Store(_) | AppError::Auth(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => {
                tracing::debug!("Request not authorized, redirecting to login");
                Redirect::to(LOGIN_PATH).into_response()
            }
            AppError::InvalidInput(ref reason) => {
                tracing::debug!(reason = %reason, "Rejecting invalid input");
                self.status().into_response()
            }
            ref err => {
                tracing::debug!(error = %err, "Answering with internal server error");
                self.status().into_response()
            }
        }
    }
}

/// Log the error of a `Result` inside the current span and pass it on.
pub trait LogError {
    fn log_error(self, context: &str) -> Self;
}

impl<T, E: std::fmt::Display> LogError for Result<T, E> {
    fn log_error(self, context: &str) -> Self {
        if let Err(ref err) = self {
            tracing::error!(error = %err, "{}", context);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[test]
    fn test_downstream_errors_are_internal() {
        let err = AppError::from(StoreError::Unavailable("connection reset".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(AuthError::SessionNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let response = AppError::InvalidInput("empty form".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
