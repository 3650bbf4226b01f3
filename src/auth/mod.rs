//! Session and account surface.
//!
//! # Responsibilities
//! - Define the contract with the external auth service (`AuthService`)
//! - Decode and validate login, registration and TOTP forms
//! - Serve the login/registration pages and their form submissions
//!
//! # Design Decisions
//! - Session tokens are opaque strings; this layer never inspects them
//! - Authentication failures are never described to the client
//! - `InMemoryAuthService` is a development stand-in

pub mod handlers;
pub mod memory;

use async_trait::async_trait;

use crate::domain::{require_text, SessionContext, Validate, ValidationError};

pub use memory::InMemoryAuthService;

/// Failure reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("session not found")]
    SessionNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username already taken")]
    UsernameTaken,

    #[error("user {0} not found")]
    UserNotFound(u64),

    #[error("invalid TOTP token")]
    InvalidTotpToken,

    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub totp_token: String,
}

impl Validate for LoginInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username)?;
        require_text("password", &self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub username: String,
    pub password: String,
}

impl Validate for RegistrationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username)?;
        require_text("password", &self.password)
    }
}

/// Result of a successful registration: the new user still has to confirm TOTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResponse {
    pub user_id: u64,
    pub two_factor_qr_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotpVerificationInput {
    pub user_id: u64,
    pub totp_token: String,
}

/// TOTP tokens are six ASCII digits.
pub fn is_totp_token(token: &str) -> bool {
    token.len() == 6 && token.bytes().all(|b| b.is_ascii_digit())
}

impl Validate for TotpVerificationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id == 0 {
            return Err(ValidationError::Required("user_id"));
        }
        if !is_totp_token(&self.totp_token) {
            return Err(ValidationError::Invalid {
                field: "totp_token",
                reason: "must be six digits",
            });
        }
        Ok(())
    }
}

/// Session lookup and account operations owned by the auth backend.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a session token into the requester's context.
    async fn session_context(&self, token: &str) -> Result<SessionContext, AuthError>;

    /// Check credentials and open a session, returning its token.
    async fn authenticate(&self, input: &LoginInput) -> Result<String, AuthError>;

    async fn logout(&self, session: &SessionContext) -> Result<(), AuthError>;

    async fn register(&self, input: &RegistrationInput) -> Result<RegistrationResponse, AuthError>;

    async fn verify_totp_secret(&self, input: &TotpVerificationInput) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_username_and_password() {
        let input = LoginInput {
            username: "cook".into(),
            ..Default::default()
        };
        assert_eq!(input.validate(), Err(ValidationError::Required("password")));
    }

    #[test]
    fn test_totp_token_shape() {
        assert!(is_totp_token("012345"));
        assert!(!is_totp_token("12345"));
        assert!(!is_totp_token("12a456"));

        let input = TotpVerificationInput {
            user_id: 3,
            totp_token: "1234567".into(),
        };
        assert!(input.validate().is_err());
    }
}
