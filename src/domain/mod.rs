//! Domain records moved between HTTP forms, the data store, and templates.
//!
//! # Responsibilities
//! - Define the entity records and their creation/update commands
//! - Validate commands before they are forwarded to the data store
//! - Compute field-change summaries when an entity is updated
//!
//! # Design Decisions
//! - Entities are plain data; persistence belongs to the store collaborator
//! - Update commands carry every field because forms post every field
//! - Validation only checks required fields and simple cross-field rules

pub mod changes;
pub mod fakes;
pub mod permissions;
pub mod query;
pub mod recipe;
pub mod recipe_step;
pub mod recipe_step_ingredient;
pub mod session;
pub mod valid_ingredient;
pub mod valid_instrument;
pub mod valid_preparation;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

pub use changes::FieldChangeSummary;
pub use permissions::{Action, Permission};
pub use query::{QueryFilter, SortDirection};
pub use recipe::{Recipe, RecipeCreationInput, RecipeUpdateInput};
pub use recipe_step::{RecipeScope, RecipeStep, RecipeStepCreationInput, RecipeStepUpdateInput};
pub use recipe_step_ingredient::{
    RecipeStepIngredient, RecipeStepIngredientCreationInput, RecipeStepIngredientUpdateInput,
    RecipeStepScope,
};
pub use session::{Requester, ServicePermissions, ServiceRole, SessionContext};
pub use valid_ingredient::{ValidIngredient, ValidIngredientCreationInput, ValidIngredientUpdateInput};
pub use valid_instrument::{ValidInstrument, ValidInstrumentCreationInput, ValidInstrumentUpdateInput};
pub use valid_preparation::{
    ValidPreparation, ValidPreparationCreationInput, ValidPreparationUpdateInput,
};

/// Reason a creation or update command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Commands that must be checked before reaching the data store.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject blank text for a required field.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Reject a zero identifier for a required reference.
pub(crate) fn require_id(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Lifecycle timestamps maintained by the store (unix seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

impl Timestamps {
    pub fn is_archived(&self) -> bool {
        self.archived_on.is_some()
    }
}

/// Current time in unix seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// A record owned by the data store and rendered by this frontend.
pub trait Entity: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Kind label used in logs and errors.
    const KIND: &'static str;

    /// Parent identifiers the entity lives under (`()` for top-level records).
    type Scope: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;
    type CreationInput: Validate + Clone + fmt::Debug + Send + Sync + 'static;
    type UpdateInput: Validate + Clone + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> u64;

    fn scope(&self) -> Self::Scope;

    fn timestamps(&self) -> &Timestamps;

    fn timestamps_mut(&mut self) -> &mut Timestamps;

    /// Build a new record from a validated creation command.
    fn from_creation_input(
        id: u64,
        scope: &Self::Scope,
        input: &Self::CreationInput,
        created_by: u64,
    ) -> Self;

    /// Apply an update command, returning the fields that actually changed.
    fn update(&mut self, input: &Self::UpdateInput) -> Vec<FieldChangeSummary>;
}

/// One page of entities returned by a list query.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityList<E> {
    pub items: Vec<E>,
    pub page: u32,
    pub limit: u16,
    pub total_count: u64,
}

impl<E> EntityList<E> {
    pub fn new(items: Vec<E>, filter: &QueryFilter, total_count: u64) -> Self {
        Self {
            items,
            page: filter.page,
            limit: filter.limit,
            total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_whitespace() {
        assert_eq!(require_text("name", "  "), Err(ValidationError::Required("name")));
        assert!(require_text("name", "pancakes").is_ok());
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("preparation_id", 0), Err(ValidationError::Required("preparation_id")));
        assert!(require_id("preparation_id", 5).is_ok());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::Invalid {
            field: "min_estimated_time_in_seconds",
            reason: "must not exceed the maximum",
        };
        assert_eq!(err.to_string(), "min_estimated_time_in_seconds must not exceed the maximum");
    }
}
