//! Home page and static assets.

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{AppError, LogError};
use crate::http::server::AppState;
use crate::http::session::MaybeSession;
use crate::views::templates::HomeView;
use crate::views::PageData;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(home))
        .route("/favicon.svg", get(favicon))
}

#[tracing::instrument(skip_all)]
async fn home(
    State(state): State<AppState>,
    MaybeSession(session): MaybeSession,
) -> Result<Response, AppError> {
    let view = HomeView {
        site_name: state.views.site_name().to_string(),
        username: session.as_ref().map(|s| s.requester.username.clone()),
        navigation: state.views.navigation().to_vec(),
    };
    let page = PageData::new("Home", session.as_ref());
    let html = state
        .views
        .render_page(&page, &view)
        .log_error("rendering home page")?;
    Ok(Html(html).into_response())
}

async fn favicon(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], state.views.favicon())
}
