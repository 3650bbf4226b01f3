//! Resource views: one generic CRUD handler set, bound per entity.
//!
//! # Data Flow
//! ```text
//! request
//!     → RouteParams / QueryFilter / SessionContext extractors
//!     → handlers.rs (fetch, decode + validate, mutate)
//!     → Resource binding (store accessor, form keys, columns, fields)
//!     → views (fragment or full page)
//! ```
//!
//! # Design Decisions
//! - Everything entity-specific lives behind the `Resource` trait
//! - Route parameter names are shared between nested collections so the
//!   router sees one consistent tree
//! - Fragment routes live under `/dashboard_pages`
//! - Listing needs `read`, creator and create need `create`, editor and
//!   update need `update`, archive needs `archive` on `Resource::NAME`

pub mod handlers;
pub mod recipe_step_ingredients;
pub mod recipe_steps;
pub mod recipes;
pub mod valid_ingredients;
pub mod valid_instruments;
pub mod valid_preparations;

use axum::routing::get;
use axum::Router;

use crate::domain::fakes::Fake;
use crate::domain::Entity;
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::server::AppState;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::{FormField, NavLink, DASHBOARD_PAGES_PREFIX};

pub use recipe_step_ingredients::RecipeStepIngredients;
pub use recipe_steps::RecipeSteps;
pub use recipes::Recipes;
pub use valid_ingredients::ValidIngredients;
pub use valid_instruments::ValidInstruments;
pub use valid_preparations::ValidPreparations;

/// Parent scope of a resource's entity.
pub type ScopeOf<R> = <<R as Resource>::Entity as Entity>::Scope;
pub type CreationInputOf<R> = <<R as Resource>::Entity as Entity>::CreationInput;
pub type UpdateInputOf<R> = <<R as Resource>::Entity as Entity>::UpdateInput;

/// Binds an entity type to its routes, store, forms and table.
pub trait Resource: Send + Sync + 'static {
    type Entity: Fake;

    /// Short identifier used in logs, metrics and permission names.
    const NAME: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    /// Route template of the collection, e.g. `/recipes/{recipe_id}/recipe_steps`.
    const COLLECTION_ROUTE: &'static str;

    /// Route parameter naming a single entity.
    const ID_PARAM: &'static str;

    const COLUMNS: &'static [&'static str];

    /// Resolve the parent scope from the route.
    fn scope(params: &RouteParams) -> Result<ScopeOf<Self>, AppError>;

    /// Concrete collection path for a scope.
    fn collection_path(scope: &ScopeOf<Self>) -> String;

    fn store(store: &dyn DataStore) -> &dyn EntityStore<Self::Entity>;

    fn creation_input(form: &FormValues) -> CreationInputOf<Self>;

    fn update_input(form: &FormValues) -> UpdateInputOf<Self>;

    fn table_cells(entity: &Self::Entity) -> Vec<String>;

    fn form_fields(entity: &Self::Entity) -> Vec<FormField>;

    /// Nested collections shown on the editor of entity `id`.
    fn child_links(_scope: &ScopeOf<Self>, _id: u64) -> Vec<NavLink> {
        Vec::new()
    }
}

/// Page and fragment routes for one resource.
pub fn routes<R: Resource>() -> Router<AppState> {
    let collection = R::COLLECTION_ROUTE;
    let creator = format!("{collection}/new");
    let individual = format!("{collection}/{{{}}}", R::ID_PARAM);

    Router::new()
        .route(collection, get(handlers::list_view::<R>).post(handlers::create::<R>))
        .route(&creator, get(handlers::creator_view::<R>))
        .route(
            &individual,
            get(handlers::editor_view::<R>)
                .post(handlers::update::<R>)
                .delete(handlers::archive::<R>),
        )
        .route(&format!("{DASHBOARD_PAGES_PREFIX}{collection}"), get(handlers::list_view::<R>))
        .route(&format!("{DASHBOARD_PAGES_PREFIX}{creator}"), get(handlers::creator_view::<R>))
        .route(
            &format!("{DASHBOARD_PAGES_PREFIX}{individual}"),
            get(handlers::editor_view::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::archive::<R>),
        )
}

/// Routes for every resource.
pub fn all_routes() -> Router<AppState> {
    Router::new()
        .merge(routes::<Recipes>())
        .merge(routes::<RecipeSteps>())
        .merge(routes::<RecipeStepIngredients>())
        .merge(routes::<ValidInstruments>())
        .merge(routes::<ValidIngredients>())
        .merge(routes::<ValidPreparations>())
}

/// Navigation bar entries for the top-level collections.
pub fn navigation() -> Vec<NavLink> {
    vec![
        NavLink::new(Recipes::PLURAL, Recipes::COLLECTION_ROUTE),
        NavLink::new(ValidInstruments::PLURAL, ValidInstruments::COLLECTION_ROUTE),
        NavLink::new(ValidIngredients::PLURAL, ValidIngredients::COLLECTION_ROUTE),
        NavLink::new(ValidPreparations::PLURAL, ValidPreparations::COLLECTION_ROUTE),
    ]
}
