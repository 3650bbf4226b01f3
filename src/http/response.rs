//! Response helpers shared by the handlers.
//!
//! # Responsibilities
//! - Signal client-side navigation through the `HX-Redirect` header
//! - Build HTML responses with an explicit status
//!
//! # Design Decisions
//! - Mutation handlers answer with a status and a redirect header rather than a body
//! - A redirect target that cannot be encoded as a header is dropped, not fatal

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Empty response telling the client to navigate to `location`.
pub fn htmx_redirect(status: StatusCode, location: &str) -> Response {
    let mut response = status.into_response();
    match HeaderValue::from_str(location) {
        Ok(value) => {
            response.headers_mut().insert(HX_REDIRECT, value);
        }
        Err(err) => {
            tracing::warn!(location, error = %err, "Dropping unencodable redirect target");
        }
    }
    response
}

/// Rendered HTML with the given status.
pub fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}
