//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → RequestBodyLimitLayer (server.rs, bounded by security.max_body_size)
//!     → handler
//! Outgoing response:
//!     → headers.rs (hardening headers)
//! ```
//!
//! # Design Decisions
//! - Hardening headers never override a value a handler set explicitly
//! - Session cookies are HttpOnly/SameSite (see http::session)

pub mod headers;
