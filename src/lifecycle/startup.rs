//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the data store, auth service and template registry
//! - Seed development accounts from configuration
//! - Assemble the shared `AppState`
//!
//! # Design Decisions
//! - Collaborators are built once and shared behind `Arc`
//! - Listeners are bound by the caller, after the state exists

use std::sync::Arc;
use std::time::Duration;

use crate::auth::InMemoryAuthService;
use crate::config::AppConfig;
use crate::domain::ServiceRole;
use crate::http::server::AppState;
use crate::resources;
use crate::store::InMemoryDataStore;
use crate::views::TemplateRegistry;

/// Auth service holding the configured seed accounts.
pub fn build_auth_service(config: &AppConfig) -> InMemoryAuthService {
    let auth = InMemoryAuthService::new(config.frontend.site_name.clone())
        .with_session_ttl(Duration::from_secs(config.frontend.session_max_age_secs));
    for user in &config.frontend.seed_users {
        let role = if user.admin { ServiceRole::Admin } else { ServiceRole::User };
        let user_id = auth.seed_user(&user.username, &user.password, role);
        tracing::info!(user_id, username = %user.username, admin = user.admin, "Seeded user");
    }
    auth
}

/// Application state backed by the in-process collaborators.
pub fn build_state(config: AppConfig) -> AppState {
    let auth = build_auth_service(&config);
    let views = TemplateRegistry::new(config.frontend.site_name.clone(), resources::navigation());

    AppState {
        config: Arc::new(config),
        store: Arc::new(InMemoryDataStore::new()),
        auth: Arc::new(auth),
        views: Arc::new(views),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LoginInput;
    use crate::config::SeedUser;

    #[tokio::test]
    async fn test_seed_users_can_log_in() {
        let mut config = AppConfig::default();
        config.frontend.seed_users.push(SeedUser {
            username: "admin".into(),
            password: "admin".into(),
            admin: true,
        });

        let state = build_state(config);
        let token = state
            .auth
            .authenticate(&LoginInput {
                username: "admin".into(),
                password: "admin".into(),
                totp_token: String::new(),
            })
            .await
            .unwrap();
        let session = state.auth.session_context(&token).await.unwrap();
        assert!(session.is_service_admin());
        assert_eq!(state.views.navigation().len(), 4);
    }
}
