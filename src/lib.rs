//! Server-rendered recipe management frontend.

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod resources;
pub mod security;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
