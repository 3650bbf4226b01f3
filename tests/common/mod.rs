//! Shared utilities for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use recipe_frontend::auth::{
    AuthError, AuthService, InMemoryAuthService, LoginInput, RegistrationInput,
    RegistrationResponse, TotpVerificationInput,
};
use recipe_frontend::config::AppConfig;
use recipe_frontend::domain::{
    Entity, EntityList, FieldChangeSummary, QueryFilter, ServiceRole, SessionContext,
};
use recipe_frontend::http::build_router;
use recipe_frontend::resources;
use recipe_frontend::store::{EntityStore, InMemoryDataStore, StoreError};
use recipe_frontend::views::TemplateRegistry;
use recipe_frontend::AppState;

pub const USERNAME: &str = "cook";
pub const ADMIN_USERNAME: &str = "chef";
pub const PASSWORD: &str = "hunter2";

/// Store operations observed by [`RecordingStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    List,
    Create,
    Update,
    Archive,
}

/// In-memory store that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: InMemoryDataStore,
    calls: Mutex<Vec<(Op, &'static str)>>,
    failing: Mutex<HashSet<Op>>,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<(Op, &'static str)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<Op> {
        self.calls().into_iter().map(|(op, _)| op).collect()
    }

    /// Make every later call of `op` fail.
    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    fn record(&self, op: Op, kind: &'static str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push((op, kind));
        if self.failing.lock().unwrap().contains(&op) {
            return Err(StoreError::Unavailable(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl<E> EntityStore<E> for RecordingStore
where
    E: Entity,
    InMemoryDataStore: EntityStore<E>,
{
    async fn get(&self, scope: &E::Scope, id: u64) -> Result<E, StoreError> {
        self.record(Op::Get, E::KIND)?;
        EntityStore::<E>::get(&self.inner, scope, id).await
    }

    async fn list(&self, scope: &E::Scope, filter: &QueryFilter) -> Result<EntityList<E>, StoreError> {
        self.record(Op::List, E::KIND)?;
        EntityStore::<E>::list(&self.inner, scope, filter).await
    }

    async fn create(&self, scope: &E::Scope, input: &E::CreationInput, user_id: u64) -> Result<E, StoreError> {
        self.record(Op::Create, E::KIND)?;
        EntityStore::<E>::create(&self.inner, scope, input, user_id).await
    }

    async fn update(&self, entity: &E, user_id: u64, changes: &[FieldChangeSummary]) -> Result<(), StoreError> {
        self.record(Op::Update, E::KIND)?;
        EntityStore::<E>::update(&self.inner, entity, user_id, changes).await
    }

    async fn archive(&self, scope: &E::Scope, id: u64, account_id: u64, user_id: u64) -> Result<(), StoreError> {
        self.record(Op::Archive, E::KIND)?;
        EntityStore::<E>::archive(&self.inner, scope, id, account_id, user_id).await
    }
}

/// Auth service that resolves any session but fails every account operation.
pub struct FailingAuthService;

#[async_trait]
impl AuthService for FailingAuthService {
    async fn session_context(&self, token: &str) -> Result<SessionContext, AuthError> {
        let mut session = SessionContext::default();
        session.session_id = token.to_string();
        session.requester.user_id = 1;
        Ok(session)
    }

    async fn authenticate(&self, _input: &LoginInput) -> Result<String, AuthError> {
        Err(AuthError::Unavailable("auth backend down".into()))
    }

    async fn logout(&self, _session: &SessionContext) -> Result<(), AuthError> {
        Err(AuthError::Unavailable("auth backend down".into()))
    }

    async fn register(&self, _input: &RegistrationInput) -> Result<RegistrationResponse, AuthError> {
        Err(AuthError::Unavailable("auth backend down".into()))
    }

    async fn verify_totp_secret(&self, _input: &TotpVerificationInput) -> Result<(), AuthError> {
        Err(AuthError::Unavailable("auth backend down".into()))
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

fn state(config: AppConfig, store: Arc<RecordingStore>, auth: Arc<dyn AuthService>) -> AppState {
    let views = TemplateRegistry::new(config.frontend.site_name.clone(), resources::navigation());
    AppState {
        config: Arc::new(config),
        store,
        auth,
        views: Arc::new(views),
    }
}

/// Router plus handles on its collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<RecordingStore>,
    pub auth: Arc<InMemoryAuthService>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(RecordingStore::default());
        let auth = Arc::new(InMemoryAuthService::new(config.frontend.site_name.clone()));
        let router = build_router(&config, state(config.clone(), store.clone(), auth.clone()));
        Self { router, store, auth }
    }

    /// Seed a household member, open a session for it and return the `Cookie` header value.
    pub async fn session_cookie(&self) -> String {
        self.open_session(USERNAME, ServiceRole::User).await
    }

    /// Same as [`TestApp::session_cookie`] for a service admin.
    pub async fn admin_session_cookie(&self) -> String {
        self.open_session(ADMIN_USERNAME, ServiceRole::Admin).await
    }

    async fn open_session(&self, username: &str, role: ServiceRole) -> String {
        self.auth.seed_user(username, PASSWORD, role);
        let token = self
            .auth
            .authenticate(&LoginInput {
                username: username.into(),
                password: PASSWORD.into(),
                totp_token: String::new(),
            })
            .await
            .unwrap();
        format!("recipes_session={token}")
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Router whose auth collaborator is [`FailingAuthService`].
pub fn router_with_failing_auth() -> Router {
    let config = test_config();
    let store = Arc::new(RecordingStore::default());
    build_router(&config, state(config.clone(), store, Arc::new(FailingAuthService)))
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form(method: Method, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
