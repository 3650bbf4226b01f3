//! Recipes.

use super::changes::{track, track_optional, FieldChangeSummary};
use super::{require_text, Entity, Timestamps, Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    pub source: String,
    pub description: String,
    pub inspired_by_recipe_id: Option<u64>,
    pub created_by_user: u64,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCreationInput {
    pub name: String,
    pub source: String,
    pub description: String,
    pub inspired_by_recipe_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeUpdateInput {
    pub name: String,
    pub source: String,
    pub description: String,
    pub inspired_by_recipe_id: Option<u64>,
}

impl Validate for RecipeCreationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Validate for RecipeUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Entity for Recipe {
    const KIND: &'static str = "recipe";

    type Scope = ();
    type CreationInput = RecipeCreationInput;
    type UpdateInput = RecipeUpdateInput;

    fn id(&self) -> u64 {
        self.id
    }

    fn scope(&self) -> Self::Scope {}

    fn timestamps(&self) -> &Timestamps {
        &self.timestamps
    }

    fn timestamps_mut(&mut self) -> &mut Timestamps {
        &mut self.timestamps
    }

    fn from_creation_input(id: u64, _scope: &(), input: &RecipeCreationInput, created_by: u64) -> Self {
        Self {
            id,
            name: input.name.clone(),
            source: input.source.clone(),
            description: input.description.clone(),
            inspired_by_recipe_id: input.inspired_by_recipe_id,
            created_by_user: created_by,
            timestamps: Timestamps::default(),
        }
    }

    fn update(&mut self, input: &RecipeUpdateInput) -> Vec<FieldChangeSummary> {
        let mut changes = Vec::new();
        track(&mut changes, "name", &mut self.name, &input.name);
        track(&mut changes, "source", &mut self.source, &input.source);
        track(&mut changes, "description", &mut self.description, &input.description);
        track_optional(
            &mut changes,
            "inspired_by_recipe_id",
            &mut self.inspired_by_recipe_id,
            &input.inspired_by_recipe_id,
        );
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_reports_changed_fields() {
        let mut recipe = Recipe {
            id: 7,
            name: "Pancakes".into(),
            source: "grandma".into(),
            ..Recipe::default()
        };

        let changes = recipe.update(&RecipeUpdateInput {
            name: "Pancakes".into(),
            source: "cookbook".into(),
            description: String::new(),
            inspired_by_recipe_id: Some(3),
        });

        assert_eq!(recipe.source, "cookbook");
        assert_eq!(recipe.inspired_by_recipe_id, Some(3));
        let fields: Vec<_> = changes.iter().map(|c| c.field_name.as_str()).collect();
        assert_eq!(fields, vec!["source", "inspired_by_recipe_id"]);
    }

    #[test]
    fn test_name_is_required() {
        let input = RecipeCreationInput::default();
        assert_eq!(input.validate(), Err(ValidationError::Required("name")));
    }
}
