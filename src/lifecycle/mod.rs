//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Build store, auth service, templates → AppState
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Broadcast → Server stops accepting → In-flight requests drain
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then collaborators, then the listener
//! - One broadcast channel fans the shutdown out to every subscriber

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::wait_for_termination;
pub use startup::build_state;
