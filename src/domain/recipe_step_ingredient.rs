//! Ingredients used by a recipe step.

use super::changes::{track, track_optional, FieldChangeSummary};
use super::{require_text, Entity, Timestamps, Validate, ValidationError};

/// Parent identifiers for records that live under a recipe step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeStepScope {
    pub recipe_id: u64,
    pub recipe_step_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeStepIngredient {
    pub id: u64,
    pub ingredient_id: Option<u64>,
    pub name: String,
    pub quantity_type: String,
    pub quantity_value: f32,
    pub quantity_notes: String,
    pub product_of_recipe_step: bool,
    pub ingredient_notes: String,
    pub belongs_to_recipe: u64,
    pub belongs_to_recipe_step: u64,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeStepIngredientCreationInput {
    pub ingredient_id: Option<u64>,
    pub name: String,
    pub quantity_type: String,
    pub quantity_value: f32,
    pub quantity_notes: String,
    pub product_of_recipe_step: bool,
    pub ingredient_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeStepIngredientUpdateInput {
    pub ingredient_id: Option<u64>,
    pub name: String,
    pub quantity_type: String,
    pub quantity_value: f32,
    pub quantity_notes: String,
    pub product_of_recipe_step: bool,
    pub ingredient_notes: String,
}

impl Validate for RecipeStepIngredientCreationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("quantity_type", &self.quantity_type)
    }
}

impl Validate for RecipeStepIngredientUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("quantity_type", &self.quantity_type)
    }
}

impl Entity for RecipeStepIngredient {
    const KIND: &'static str = "recipe step ingredient";

    type Scope = RecipeStepScope;
    type CreationInput = RecipeStepIngredientCreationInput;
    type UpdateInput = RecipeStepIngredientUpdateInput;

    fn id(&self) -> u64 {
        self.id
    }

    fn scope(&self) -> RecipeStepScope {
        RecipeStepScope {
            recipe_id: self.belongs_to_recipe,
            recipe_step_id: self.belongs_to_recipe_step,
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
        scope: &RecipeStepScope,
        input: &RecipeStepIngredientCreationInput,
        _created_by: u64,
    ) -> Self {
        Self {
            id,
            ingredient_id: input.ingredient_id,
            name: input.name.clone(),
            quantity_type: input.quantity_type.clone(),
            quantity_value: input.quantity_value,
            quantity_notes: input.quantity_notes.clone(),
            product_of_recipe_step: input.product_of_recipe_step,
            ingredient_notes: input.ingredient_notes.clone(),
            belongs_to_recipe: scope.recipe_id,
            belongs_to_recipe_step: scope.recipe_step_id,
            timestamps: Timestamps::default(),
        }
    }

    fn update(&mut self, input: &RecipeStepIngredientUpdateInput) -> Vec<FieldChangeSummary> {
        let mut changes = Vec::new();
        track_optional(&mut changes, "ingredient_id", &mut self.ingredient_id, &input.ingredient_id);
        track(&mut changes, "name", &mut self.name, &input.name);
        track(&mut changes, "quantity_type", &mut self.quantity_type, &input.quantity_type);
        track(&mut changes, "quantity_value", &mut self.quantity_value, &input.quantity_value);
        track(&mut changes, "quantity_notes", &mut self.quantity_notes, &input.quantity_notes);
        track(
            &mut changes,
            "product_of_recipe_step",
            &mut self.product_of_recipe_step,
            &input.product_of_recipe_step,
        );
        track(&mut changes, "ingredient_notes", &mut self.ingredient_notes, &input.ingredient_notes);
        changes
    }
}
