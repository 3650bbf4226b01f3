//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request produces:
//!     → spans.rs (one span per request carrying method, path, request id)
//!     → logging.rs (structured log events inside that span)
//!     → metrics.rs (request counter and latency histogram)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line via the request span
//! - Metrics are recorded once per request by middleware, not per handler
//! - The Prometheus exporter is optional and configured at startup

pub mod logging;
pub mod metrics;
pub mod spans;
