//! Recipe frontend (v1)
//!
//! Server-rendered HTML frontend for a recipe service, built with Tokio,
//! Axum and askama. Pages are progressively enhanced with htmx.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser / htmx
//!         │
//!         ▼
//!   ┌───────────────────────────────────────────────────────────┐
//!   │ http server: request id → trace → timeout → body limit    │
//!   │              → metrics → security headers                 │
//!   │                                                           │
//!   │   pages ── auth::handlers ── resources::handlers<R>       │
//!   │                 │                    │                    │
//!   │                 ▼                    ▼                    │
//!   │            AuthService          DataStore (per entity)    │
//!   │                 └──────┬─────────────┘                    │
//!   │                        ▼                                  │
//!   │            views (askama fragments / full pages)          │
//!   └───────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use recipe_frontend::config::{load_config, AppConfig};
use recipe_frontend::lifecycle::{build_state, wait_for_termination, Shutdown};
use recipe_frontend::observability::{logging, metrics};
use recipe_frontend::HttpServer;

#[derive(Parser)]
#[command(name = "recipe-frontend")]
#[command(about = "Server-rendered frontend for the recipe service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Serve generated placeholder entities instead of stored ones.
    #[arg(long)]
    fake_data: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.fake_data {
        config.frontend.use_fake_data = true;
    }

    logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "recipe-frontend starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        fake_data = config.frontend.use_fake_data,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(err) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %err,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let state = build_state(config);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signals = tokio::spawn(async move {
        wait_for_termination().await;
        shutdown.trigger();
    });

    HttpServer::new(state).run(listener, server_shutdown).await?;
    signals.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}
