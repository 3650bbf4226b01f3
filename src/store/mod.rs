//! Data-access interface consumed by the resource handlers.
//!
//! # Responsibilities
//! - Define the per-entity read/write contract (`EntityStore`)
//! - Bundle one store per entity behind a single `DataStore` handle
//!
//! # Design Decisions
//! - The persistence engine lives elsewhere; handlers only see these traits
//! - Every write carries the acting user id so the backend can audit it
//! - `InMemoryDataStore` is a development stand-in, not a database

pub mod memory;

use async_trait::async_trait;

use crate::domain::{
    Entity, EntityList, FieldChangeSummary, QueryFilter, Recipe, RecipeStep, RecipeStepIngredient,
    ValidIngredient, ValidInstrument, ValidPreparation,
};

pub use memory::InMemoryDataStore;

/// Failure reported by the data store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

/// Read/write operations for one entity type.
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn get(&self, scope: &E::Scope, id: u64) -> Result<E, StoreError>;

    async fn list(&self, scope: &E::Scope, filter: &QueryFilter) -> Result<EntityList<E>, StoreError>;

    async fn create(&self, scope: &E::Scope, input: &E::CreationInput, user_id: u64) -> Result<E, StoreError>;

    /// Persist an entity that has already had its update applied.
    async fn update(&self, entity: &E, user_id: u64, changes: &[FieldChangeSummary]) -> Result<(), StoreError>;

    async fn archive(&self, scope: &E::Scope, id: u64, account_id: u64, user_id: u64) -> Result<(), StoreError>;
}

/// Every entity store the frontend needs.
pub trait DataStore: Send + Sync {
    fn recipes(&self) -> &dyn EntityStore<Recipe>;
    fn recipe_steps(&self) -> &dyn EntityStore<RecipeStep>;
    fn recipe_step_ingredients(&self) -> &dyn EntityStore<RecipeStepIngredient>;
    fn valid_instruments(&self) -> &dyn EntityStore<ValidInstrument>;
    fn valid_ingredients(&self) -> &dyn EntityStore<ValidIngredient>;
    fn valid_preparations(&self) -> &dyn EntityStore<ValidPreparation>;
}

impl<T> DataStore for T
where
    T: EntityStore<Recipe>
        + EntityStore<RecipeStep>
        + EntityStore<RecipeStepIngredient>
        + EntityStore<ValidInstrument>
        + EntityStore<ValidIngredient>
        + EntityStore<ValidPreparation>,
{
    fn recipes(&self) -> &dyn EntityStore<Recipe> {
        self
    }

    fn recipe_steps(&self) -> &dyn EntityStore<RecipeStep> {
        self
    }

    fn recipe_step_ingredients(&self) -> &dyn EntityStore<RecipeStepIngredient> {
        self
    }

    fn valid_instruments(&self) -> &dyn EntityStore<ValidInstrument> {
        self
    }

    fn valid_ingredients(&self) -> &dyn EntityStore<ValidIngredient> {
        self
    }

    fn valid_preparations(&self) -> &dyn EntityStore<ValidPreparation> {
        self
    }
}
