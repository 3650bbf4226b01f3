//! Request-side extractors.
//!
//! # Responsibilities
//! - Name the request ID header
//! - Pull numeric identifiers out of the matched route
//! - Parse list filters from the query string
//! - Decide between full-page and fragment rendering
//!
//! # Design Decisions
//! - Extractors here never reject; bad values surface when a handler asks for them
//! - Query parsing is lenient: unknown or malformed parameters fall back to defaults

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use url::form_urlencoded;

use crate::domain::QueryFilter;
use crate::error::AppError;
use crate::http::server::AppState;
use crate::views::RenderMode;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Raw path parameters of the matched route.
#[derive(Debug, Clone, Default)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self(params)
    }

    /// A required, non-zero numeric identifier.
    pub fn id(&self, key: &str) -> Result<u64, AppError> {
        let raw = self
            .0
            .get(key)
            .ok_or_else(|| AppError::InvalidInput(format!("missing path parameter {key}")))?;

        match raw.parse::<u64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AppError::InvalidInput(format!("{key} must be a positive integer"))),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RouteParams {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();
        Ok(Self(params))
    }
}

impl FromRequestParts<AppState> for QueryFilter {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let pairs: Vec<(String, String)> = parts
            .uri
            .query()
            .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Ok(QueryFilter::from_pairs(
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            state.config.frontend.default_page_limit,
        ))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RenderMode {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RenderMode::for_path(parts.uri.path()))
    }
}
