//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics, security headers)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{self, AuthService};
use crate::config::AppConfig;
use crate::http::middleware::metrics::track_requests;
use crate::observability::spans::make_request_span;
use crate::pages;
use crate::resources;
use crate::security::headers::with_security_headers;
use crate::store::DataStore;
use crate::views::TemplateRegistry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DataStore>,
    pub auth: Arc<dyn AuthService>,
    pub views: Arc<TemplateRegistry>,
}

/// Build the Axum router with all routes and middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    let router = Router::new()
        .merge(pages::routes())
        .merge(auth::handlers::routes())
        .merge(resources::all_routes())
        .with_state(state)
        .route_layer(middleware::from_fn(track_requests))
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    if config.security.enable_headers {
        with_security_headers(router)
    } else {
        router
    }
}

/// HTTP server for the recipe frontend.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server around prepared application state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server until a shutdown signal is broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            fake_data = self.config.frontend.use_fake_data,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
