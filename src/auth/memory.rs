//! In-process auth service for local development and tests.
//!
//! Passwords are compared in plain text and any well-formed TOTP token is
//! accepted. Never point a deployment at this.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use url::form_urlencoded;
use uuid::Uuid;

use super::{
    is_totp_token, AuthError, AuthService, LoginInput, RegistrationInput, RegistrationResponse,
    TotpVerificationInput,
};
use crate::domain::{Requester, ServicePermissions, ServiceRole, SessionContext};

#[derive(Debug, Clone)]
struct UserRecord {
    username: String,
    password: String,
    role: ServiceRole,
    totp_secret: String,
    two_factor_verified: bool,
}

#[derive(Debug, Clone)]
struct StoredSession {
    context: SessionContext,
    issued_at: Instant,
}

const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub struct InMemoryAuthService {
    issuer: String,
    users: DashMap<u64, UserRecord>,
    /// Username to user id; the entry API keeps name claims atomic.
    usernames: DashMap<String, u64>,
    sessions: DashMap<String, StoredSession>,
    session_ttl: Duration,
    next_user_id: AtomicU64,
}

impl InMemoryAuthService {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            users: DashMap::new(),
            usernames: DashMap::new(),
            sessions: DashMap::new(),
            session_ttl: DEFAULT_SESSION_TTL,
            next_user_id: AtomicU64::new(1),
        }
    }

    /// Sessions older than `ttl` are treated as unknown.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Add a user that can log in without a TOTP token.
    ///
    /// Returns the existing id, untouched, when the username is taken.
    pub fn seed_user(&self, username: &str, password: &str, role: ServiceRole) -> u64 {
        self.insert_user(username, password, role).unwrap_or_else(|existing| existing)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Claim `username` and store the user; `Err` carries the id already holding it.
    fn insert_user(&self, username: &str, password: &str, role: ServiceRole) -> Result<u64, u64> {
        match self.usernames.entry(username.to_string()) {
            Entry::Occupied(existing) => Err(*existing.get()),
            Entry::Vacant(slot) => {
                let id = self.next_user_id.fetch_add(1, Ordering::Relaxed);
                self.users.insert(
                    id,
                    UserRecord {
                        username: username.to_string(),
                        password: password.to_string(),
                        role,
                        totp_secret: new_secret(),
                        two_factor_verified: false,
                    },
                );
                slot.insert(id);
                Ok(id)
            }
        }
    }

    fn find_by_username(&self, username: &str) -> Option<(u64, UserRecord)> {
        let id = *self.usernames.get(username)?;
        self.users.get(&id).map(|user| (id, user.value().clone()))
    }

    fn provisioning_uri(&self, username: &str, secret: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("secret", secret)
            .append_pair("issuer", &self.issuer)
            .finish();
        let label: String = form_urlencoded::byte_serialize(format!("{}:{}", self.issuer, username).as_bytes()).collect();
        format!("otpauth://totp/{}?{}", label, query)
    }
}

fn new_secret() -> String {
    Uuid::new_v4().simple().to_string().to_uppercase()
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn session_context(&self, token: &str) -> Result<SessionContext, AuthError> {
        let issued_at = self
            .sessions
            .get(token)
            .map(|session| session.issued_at)
            .ok_or(AuthError::SessionNotFound)?;

        if issued_at.elapsed() >= self.session_ttl {
            self.sessions.remove(token);
            tracing::debug!("Session expired");
            return Err(AuthError::SessionNotFound);
        }

        self.sessions
            .get(token)
            .map(|session| session.context.clone())
            .ok_or(AuthError::SessionNotFound)
    }

    async fn authenticate(&self, input: &LoginInput) -> Result<String, AuthError> {
        let (user_id, user) = self
            .find_by_username(&input.username)
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password != input.password {
            return Err(AuthError::InvalidCredentials);
        }
        if user.two_factor_verified && !is_totp_token(&input.totp_token) {
            return Err(AuthError::InvalidTotpToken);
        }

        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            StoredSession {
                context: SessionContext {
                    session_id: token.clone(),
                    requester: Requester {
                        user_id,
                        username: user.username,
                        service_permissions: ServicePermissions::new(vec![user.role]),
                    },
                    active_account_id: user_id,
                },
                issued_at: Instant::now(),
            },
        );

        tracing::debug!(user_id, "Session opened");
        Ok(token)
    }

    async fn logout(&self, session: &SessionContext) -> Result<(), AuthError> {
        self.sessions
            .remove(&session.session_id)
            .map(|_| ())
            .ok_or(AuthError::SessionNotFound)
    }

    async fn register(&self, input: &RegistrationInput) -> Result<RegistrationResponse, AuthError> {
        let user_id = self
            .insert_user(&input.username, &input.password, ServiceRole::User)
            .map_err(|_| AuthError::UsernameTaken)?;
        let secret = self
            .users
            .get(&user_id)
            .map(|user| user.totp_secret.clone())
            .ok_or(AuthError::UserNotFound(user_id))?;

        Ok(RegistrationResponse {
            user_id,
            two_factor_qr_code: self.provisioning_uri(&input.username, &secret),
        })
    }

    async fn verify_totp_secret(&self, input: &TotpVerificationInput) -> Result<(), AuthError> {
        let mut user = self
            .users
            .get_mut(&input.user_id)
            .ok_or(AuthError::UserNotFound(input.user_id))?;

        if !is_totp_token(&input.totp_token) {
            return Err(AuthError::InvalidTotpToken);
        }
        user.two_factor_verified = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn login(username: &str, password: &str, totp_token: &str) -> LoginInput {
        LoginInput {
            username: username.into(),
            password: password.into(),
            totp_token: totp_token.into(),
        }
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let auth = InMemoryAuthService::new("Recipes");
        let user_id = auth.seed_user("cook", "hunter2", ServiceRole::Admin);

        let token = auth.authenticate(&login("cook", "hunter2", "")).await.unwrap();
        let session = auth.session_context(&token).await.unwrap();
        assert_eq!(session.user_id(), user_id);
        assert!(session.is_service_admin());

        auth.logout(&session).await.unwrap();
        assert_eq!(auth.session_context(&token).await, Err(AuthError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let auth = InMemoryAuthService::new("Recipes");
        auth.seed_user("cook", "hunter2", ServiceRole::User);

        let result = auth.authenticate(&login("cook", "nope", "")).await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert_eq!(auth.active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_registration_flow_requires_totp_afterwards() {
        let auth = InMemoryAuthService::new("Recipes");
        let registration = auth
            .register(&RegistrationInput {
                username: "baker".into(),
                password: "flour".into(),
            })
            .await
            .unwrap();
        assert!(registration.two_factor_qr_code.starts_with("otpauth://totp/Recipes%3Abaker?"));

        auth.verify_totp_secret(&TotpVerificationInput {
            user_id: registration.user_id,
            totp_token: "123456".into(),
        })
        .await
        .unwrap();

        let without_token = auth.authenticate(&login("baker", "flour", "")).await;
        assert_eq!(without_token, Err(AuthError::InvalidTotpToken));
        assert!(auth.authenticate(&login("baker", "flour", "654321")).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let auth = InMemoryAuthService::new("Recipes");
        auth.seed_user("cook", "a", ServiceRole::User);
        let result = auth
            .register(&RegistrationInput {
                username: "cook".into(),
                password: "b".into(),
            })
            .await;
        assert_eq!(result, Err(AuthError::UsernameTaken));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_claim_username_once() {
        let auth = Arc::new(InMemoryAuthService::new("Recipes"));
        let attempts: Vec<_> = (0..16)
            .map(|i| {
                let auth = auth.clone();
                tokio::spawn(async move {
                    auth.register(&RegistrationInput {
                        username: "baker".into(),
                        password: format!("flour{i}"),
                    })
                    .await
                })
            })
            .collect();

        let mut succeeded = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(err) => assert_eq!(err, AuthError::UsernameTaken),
            }
        }
        assert_eq!(succeeded, 1);
    }

    #[tokio::test]
    async fn test_expired_sessions_are_dropped() {
        let auth = InMemoryAuthService::new("Recipes").with_session_ttl(Duration::ZERO);
        auth.seed_user("cook", "hunter2", ServiceRole::User);

        let token = auth.authenticate(&login("cook", "hunter2", "")).await.unwrap();
        assert_eq!(auth.session_context(&token).await, Err(AuthError::SessionNotFound));
        assert_eq!(auth.active_sessions(), 0);
    }

    #[test]
    fn test_seeding_a_taken_username_keeps_the_original() {
        let auth = InMemoryAuthService::new("Recipes");
        let first = auth.seed_user("cook", "hunter2", ServiceRole::User);
        assert_eq!(auth.seed_user("cook", "other", ServiceRole::Admin), first);
        assert_eq!(auth.find_by_username("cook").map(|(_, user)| user.password), Some("hunter2".to_string()));
    }
}
