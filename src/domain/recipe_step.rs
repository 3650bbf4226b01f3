//! Recipe steps, scoped to their recipe.

use super::changes::{track, track_optional, FieldChangeSummary};
use super::{require_id, Entity, Timestamps, Validate, ValidationError};

/// Parent identifiers for records that live under a recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeScope {
    pub recipe_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeStep {
    pub id: u64,
    pub index: u32,
    pub preparation_id: u64,
    pub prerequisite_step: u64,
    pub min_estimated_time_in_seconds: u32,
    pub max_estimated_time_in_seconds: u32,
    pub temperature_in_celsius: Option<u16>,
    pub notes: String,
    pub why: String,
    pub belongs_to_recipe: u64,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeStepCreationInput {
    pub index: u32,
    pub preparation_id: u64,
    pub prerequisite_step: u64,
    pub min_estimated_time_in_seconds: u32,
    pub max_estimated_time_in_seconds: u32,
    pub temperature_in_celsius: Option<u16>,
    pub notes: String,
    pub why: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeStepUpdateInput {
    pub index: u32,
    pub preparation_id: u64,
    pub prerequisite_step: u64,
    pub min_estimated_time_in_seconds: u32,
    pub max_estimated_time_in_seconds: u32,
    pub temperature_in_celsius: Option<u16>,
    pub notes: String,
    pub why: String,
}

fn validate_step(preparation_id: u64, min_seconds: u32, max_seconds: u32) -> Result<(), ValidationError> {
    require_id("preparation_id", preparation_id)?;
    if max_seconds != 0 && min_seconds > max_seconds {
        return Err(ValidationError::Invalid {
            field: "min_estimated_time_in_seconds",
            reason: "must not exceed max_estimated_time_in_seconds",
        });
    }
    Ok(())
}

impl Validate for RecipeStepCreationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_step(
            self.preparation_id,
            self.min_estimated_time_in_seconds,
            self.max_estimated_time_in_seconds,
        )
    }
}

impl Validate for RecipeStepUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_step(
            self.preparation_id,
            self.min_estimated_time_in_seconds,
            self.max_estimated_time_in_seconds,
        )
    }
}

impl Entity for RecipeStep {
    const KIND: &'static str = "recipe step";

    type Scope = RecipeScope;
    type CreationInput = RecipeStepCreationInput;
    type UpdateInput = RecipeStepUpdateInput;

    fn id(&self) -> u64 {
        self.id
    }

    fn scope(&self) -> RecipeScope {
        RecipeScope {
            recipe_id: self.belongs_to_recipe,
        }
    }

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }

    fn from_creation_input(
        id: u64,
        scope: &RecipeScope,
        input: &RecipeStepCreationInput,
        _created_by: u64,
    ) -> Self {
        Self {
            id,
            index: input.index,
            preparation_id: input.preparation_id,
            prerequisite_step: input.prerequisite_step,
            min_estimated_time_in_seconds: input.min_estimated_time_in_seconds,
            max_estimated_time_in_seconds: input.max_estimated_time_in_seconds,
            temperature_in_celsius: input.temperature_in_celsius,
            notes: input.notes.clone(),
            why: input.why.clone(),
            belongs_to_recipe: scope.recipe_id,
            timestamps: Timestamps::default(),
        }
    }

    fn update(&mut self, input: &RecipeStepUpdateInput) -> Vec<FieldChangeSummary> {
        let mut changes = Vec::new();
        track(&mut changes, "index", &mut self.index, &input.index);
        track(&mut changes, "preparation_id", &mut self.preparation_id, &input.preparation_id);
        track(&mut changes, "prerequisite_step", &mut self.prerequisite_step, &input.prerequisite_step);
        track(
            &mut changes,
            "min_estimated_time_in_seconds",
            &mut self.min_estimated_time_in_seconds,
            &input.min_estimated_time_in_seconds,
        );
        track(
            &mut changes,
            "max_estimated_time_in_seconds",
            &mut self.max_estimated_time_in_seconds,
            &input.max_estimated_time_in_seconds,
        );
        track_optional(
            &mut changes,
            "temperature_in_celsius",
            &mut self.temperature_in_celsius,
            &input.temperature_in_celsius,
        );
        track(&mut changes, "notes", &mut self.notes, &input.notes);
        track(&mut changes, "why", &mut self.why, &input.why);
        changes
    }
}
