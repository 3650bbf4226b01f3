//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, route params, query filter, render mode)
//!     → session.rs (session cookie → SessionContext)
//!     → form.rs (body → FormValues)
//!     → resource/auth handlers
//!     → response.rs (HX-Redirect, status-only replies)
//!     → Send to client
//! ```

pub mod form;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod session;

pub use request::{RouteParams, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
