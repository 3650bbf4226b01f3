//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the frontend.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the recipe frontend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits and response hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Frontend behaviour (sessions, paging, fake data).
    pub frontend: FrontendConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Mark the session cookie `Secure` (requires HTTPS in front).
    pub secure_cookies: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
            secure_cookies: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Frontend behaviour.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Serve generated placeholder entities instead of calling the data store.
    pub use_fake_data: bool,

    /// Name of the cookie carrying the session token.
    pub session_cookie_name: String,

    /// Session cookie lifetime in seconds.
    pub session_max_age_secs: u64,

    /// Page size used when a list request does not specify `limit`.
    pub default_page_limit: u16,

    /// Shown in page titles and the navigation bar.
    pub site_name: String,

    /// Accounts created in the in-memory auth service at startup.
    pub seed_users: Vec<SeedUser>,
}

/// Development account loaded into the in-memory auth service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    /// Grant the service admin role.
    pub admin: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            use_fake_data: false,
            session_cookie_name: "recipes_session".to_string(),
            session_max_age_secs: 24 * 60 * 60,
            default_page_limit: crate::domain::query::DEFAULT_LIMIT,
            site_name: "Recipes".to_string(),
            seed_users: Vec::new(),
        }
    }
}
