//! Generic CRUD handlers shared by every resource.
//!
//! # Responsibilities
//! - Fetch one entity or a page of entities (or fakes, when configured)
//! - Decode and validate creation/update forms
//! - Call the store for create, update and archive
//! - Render table, editor and creator views
//!
//! # Design Decisions
//! - Every handler checks the requester's permission for its verb first
//! - A command reaches the store only after it validates
//! - Update fetches the current entity first; a failed fetch stops the request
//! - Archive re-fetches the list so the table can be re-rendered in place
//! - Render failures after a successful mutation keep the success status

use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use super::{CreationInputOf, Resource, ScopeOf, UpdateInputOf};
use crate::domain::fakes::{fake_list, Fake};
use crate::domain::{Action, Entity, EntityList, Permission, QueryFilter, SessionContext};
use crate::error::{AppError, LogError};
use crate::http::form::{decode_command, extract_form};
use crate::http::response::{html, htmx_redirect};
use crate::http::server::AppState;
use crate::http::RouteParams;
use crate::views::templates::{CreatorView, EditorView, TableRow, TableView};
use crate::views::{PageData, RenderMode, ResourceUrls, UrlBuilder};

/// Load one entity, or a placeholder when fake data is enabled.
pub async fn fetch_entity<R: Resource>(
    state: &AppState,
    scope: &ScopeOf<R>,
    id: u64,
) -> Result<R::Entity, AppError> {
    if state.config.frontend.use_fake_data {
        return Ok(R::Entity::fake(scope));
    }

    let entity = R::store(state.store.as_ref())
        .get(scope, id)
        .await
        .log_error("fetching entity from data store")?;
    Ok(entity)
}

/// Load a page of entities, or placeholders when fake data is enabled.
pub async fn fetch_entities<R: Resource>(
    state: &AppState,
    scope: &ScopeOf<R>,
    filter: &QueryFilter,
) -> Result<EntityList<R::Entity>, AppError> {
    if state.config.frontend.use_fake_data {
        return Ok(fake_list::<R::Entity>(scope, filter));
    }

    let list = R::store(state.store.as_ref())
        .list(scope, filter)
        .await
        .log_error("fetching entities from data store")?;
    Ok(list)
}

/// Decode a creation form; `None` when the body is unreadable or the command is invalid.
pub async fn decode_creation_input<R: Resource>(body: Body, limit: usize) -> Option<CreationInputOf<R>> {
    decode_command(R::NAME, extract_form(body, limit).await, R::creation_input)
}

/// Decode an update form; `None` when the body is unreadable or the command is invalid.
pub async fn decode_update_input<R: Resource>(body: Body, limit: usize) -> Option<UpdateInputOf<R>> {
    decode_command(R::NAME, extract_form(body, limit).await, R::update_input)
}

/// Reject requesters lacking `action` on this resource.
fn authorize<R: Resource>(session: &SessionContext, action: Action) -> Result<(), AppError> {
    let permission = Permission::new(action, R::NAME);
    if session.has_permission(&permission) {
        return Ok(());
    }
    tracing::warn!(user_id = session.user_id(), %permission, "Requester lacks permission");
    Err(AppError::Unauthorized)
}

fn table_view<R: Resource>(urls: &impl UrlBuilder, list: &EntityList<R::Entity>) -> TableView {
    TableView {
        title: R::PLURAL.to_string(),
        list_url: urls.list_url(),
        new_url: urls.new_url(),
        columns: R::COLUMNS.to_vec(),
        rows: list
            .items
            .iter()
            .map(|entity| TableRow {
                individual_url: urls.individual_url(entity.id()),
                push_url: urls.push_url(entity.id()),
                cells: R::table_cells(entity),
            })
            .collect(),
        page: list.page,
        total_count: list.total_count,
    }
}

fn editor_title<R: Resource>(id: u64) -> String {
    format!("{} #{}", R::SINGULAR, id)
}

fn editor<R: Resource>(urls: &impl UrlBuilder, scope: &ScopeOf<R>, id: u64, entity: &R::Entity) -> EditorView {
    EditorView {
        title: editor_title::<R>(id),
        update_url: urls.individual_url(id),
        archive_url: urls.individual_url(id),
        list_url: urls.list_url(),
        fields: R::form_fields(entity),
        links: R::child_links(scope, id),
    }
}

/// Render a fragment after a successful mutation.
///
/// A render failure is logged and answered with `status` and an empty body.
fn render_after_mutation(status: StatusCode, rendered: Result<String, askama::Error>) -> Response {
    match rendered.log_error("rendering view after successful mutation") {
        Ok(body) => html(status, body),
        Err(_) => status.into_response(),
    }
}

#[tracing::instrument(skip_all, fields(resource = R::NAME))]
pub async fn list_view<R: Resource>(
    State(state): State<AppState>,
    mode: RenderMode,
    session: SessionContext,
    params: RouteParams,
    filter: QueryFilter,
) -> Result<Response, AppError> {
    authorize::<R>(&session, Action::Read)?;
    let scope = R::scope(&params)?;
    let list = fetch_entities::<R>(&state, &scope, &filter).await?;

    let urls = ResourceUrls::new(R::collection_path(&scope));
    let view = table_view::<R>(&urls, &list);
    let page = PageData::new(R::PLURAL, Some(&session));
    let body = state
        .views
        .render(mode, &page, &view)
        .log_error("rendering table view")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all, fields(resource = R::NAME))]
pub async fn editor_view<R: Resource>(
    State(state): State<AppState>,
    mode: RenderMode,
    session: SessionContext,
    params: RouteParams,
) -> Result<Response, AppError> {
    authorize::<R>(&session, Action::Update)?;
    let scope = R::scope(&params)?;
    let id = params.id(R::ID_PARAM)?;
    let entity = fetch_entity::<R>(&state, &scope, id).await?;

    let urls = ResourceUrls::new(R::collection_path(&scope));
    let view = editor::<R>(&urls, &scope, id, &entity);
    let page = PageData::new(editor_title::<R>(id), Some(&session));
    let body = state
        .views
        .render(mode, &page, &view)
        .log_error("rendering editor view")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all, fields(resource = R::NAME))]
pub async fn creator_view<R: Resource>(
    State(state): State<AppState>,
    mode: RenderMode,
    session: SessionContext,
    params: RouteParams,
) -> Result<Response, AppError> {
    authorize::<R>(&session, Action::Create)?;
    let scope = R::scope(&params)?;
    let urls = ResourceUrls::new(R::collection_path(&scope));
    let title = format!("New {}", R::SINGULAR);

    let view = CreatorView {
        title: title.clone(),
        create_url: urls.collection_url(),
        fields: R::form_fields(&R::Entity::default()),
    };
    let page = PageData::new(title, Some(&session));
    let body = state
        .views
        .render(mode, &page, &view)
        .log_error("rendering creator view")?;
    Ok(Html(body).into_response())
}

#[tracing::instrument(skip_all, fields(resource = R::NAME))]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    session: SessionContext,
    params: RouteParams,
    body: Body,
) -> Result<Response, AppError> {
    authorize::<R>(&session, Action::Create)?;
    let scope = R::scope(&params)?;
    let input = decode_creation_input::<R>(body, state.config.security.max_body_size)
        .await
        .ok_or_else(|| AppError::InvalidInput(format!("invalid {} creation form", R::NAME)))?;

    let created = R::store(state.store.as_ref())
        .create(&scope, &input, session.user_id())
        .await
        .log_error("creating entity in data store")?;

    tracing::info!(id = created.id(), user_id = session.user_id(), "Entity created");
    Ok(htmx_redirect(StatusCode::CREATED, &R::collection_path(&scope)))
}

#[tracing::instrument(skip_all, fields(resource = R::NAME))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    session: SessionContext,
    params: RouteParams,
    body: Body,
) -> Result<Response, AppError> {
    authorize::<R>(&session, Action::Update)?;
    let scope = R::scope(&params)?;
    let id = params.id(R::ID_PARAM)?;
    let input = decode_update_input::<R>(body, state.config.security.max_body_size)
        .await
        .ok_or_else(|| AppError::InvalidInput(format!("invalid {} update form", R::NAME)))?;

    let mut entity = fetch_entity::<R>(&state, &scope, id).await?;
    let changes = entity.update(&input);

    R::store(state.store.as_ref())
        .update(&entity, session.user_id(), &changes)
        .await
        .log_error("updating entity in data store")?;

    tracing::info!(id, user_id = session.user_id(), changed_fields = changes.len(), "Entity updated");

    let urls = ResourceUrls::new(R::collection_path(&scope));
    let rendered = state.views.render_fragment(&editor::<R>(&urls, &scope, id, &entity));
    Ok(render_after_mutation(StatusCode::OK, rendered))
}

#[tracing::instrument(skip_all, fields(resource = R::NAME))]
pub async fn archive<R: Resource>(
    State(state): State<AppState>,
    session: SessionContext,
    params: RouteParams,
    filter: QueryFilter,
) -> Result<Response, AppError> {
    authorize::<R>(&session, Action::Archive)?;
    let scope = R::scope(&params)?;
    let id = params.id(R::ID_PARAM)?;

    R::store(state.store.as_ref())
        .archive(&scope, id, session.active_account_id, session.user_id())
        .await
        .log_error("archiving entity in data store")?;

    tracing::info!(id, user_id = session.user_id(), "Entity archived");

    let list = fetch_entities::<R>(&state, &scope, &filter).await?;
    let urls = ResourceUrls::new(R::collection_path(&scope));
    let rendered = state.views.render_fragment(&table_view::<R>(&urls, &list));
    Ok(render_after_mutation(StatusCode::OK, rendered))
}
