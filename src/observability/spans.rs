//! Per-request spans.

use axum::http::Request;
use tracing::Span;

use crate::http::X_REQUEST_ID;

/// Span wrapping a whole request; every handler log line inherits its fields.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

