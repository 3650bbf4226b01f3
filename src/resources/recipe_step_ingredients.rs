//! Ingredient pages, nested under a recipe step.

use super::Resource;
use crate::domain::{
    RecipeStepIngredient, RecipeStepIngredientCreationInput, RecipeStepIngredientUpdateInput,
    RecipeStepScope,
};
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::FormField;

const INGREDIENT_ID: &str = "ingredientID";
const NAME: &str = "name";
const QUANTITY_TYPE: &str = "quantityType";
const QUANTITY_VALUE: &str = "quantityValue";
const QUANTITY_NOTES: &str = "quantityNotes";
const PRODUCT_OF_RECIPE_STEP: &str = "productOfRecipeStep";
const INGREDIENT_NOTES: &str = "ingredientNotes";

pub struct RecipeStepIngredients;

impl Resource for RecipeStepIngredients {
    type Entity = RecipeStepIngredient;

    const NAME: &'static str = "recipe_step_ingredients";
    const SINGULAR: &'static str = "Recipe Step Ingredient";
    const PLURAL: &'static str = "Recipe Step Ingredients";
    const COLLECTION_ROUTE: &'static str = "/recipes/{recipe_id}/recipe_steps/{recipe_step_id}/ingredients";
    const ID_PARAM: &'static str = "recipe_step_ingredient_id";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Quantity", "Unit", "Ingredient ID", "Notes"];

    fn scope(params: &RouteParams) -> Result<RecipeStepScope, AppError> {
        Ok(RecipeStepScope {
            recipe_id: params.id("recipe_id")?,
            recipe_step_id: params.id("recipe_step_id")?,
        })
    }

    fn collection_path(scope: &RecipeStepScope) -> String {
        format!(
            "/recipes/{}/recipe_steps/{}/ingredients",
            scope.recipe_id, scope.recipe_step_id
        )
    }

    fn store(store: &dyn DataStore) -> &dyn EntityStore<RecipeStepIngredient> {
        store.recipe_step_ingredients()
    }

    fn creation_input(form: &FormValues) -> RecipeStepIngredientCreationInput {
        RecipeStepIngredientCreationInput {
            ingredient_id: form.get_optional_u64(INGREDIENT_ID),
            name: form.get_string(NAME),
            quantity_type: form.get_string(QUANTITY_TYPE),
            quantity_value: form.get_f32(QUANTITY_VALUE),
            quantity_notes: form.get_string(QUANTITY_NOTES),
            product_of_recipe_step: form.get_bool(PRODUCT_OF_RECIPE_STEP),
            ingredient_notes: form.get_string(INGREDIENT_NOTES),
        }
    }

    fn update_input(form: &FormValues) -> RecipeStepIngredientUpdateInput {
        RecipeStepIngredientUpdateInput {
            ingredient_id: form.get_optional_u64(INGREDIENT_ID),
            name: form.get_string(NAME),
            quantity_type: form.get_string(QUANTITY_TYPE),
            quantity_value: form.get_f32(QUANTITY_VALUE),
            quantity_notes: form.get_string(QUANTITY_NOTES),
            product_of_recipe_step: form.get_bool(PRODUCT_OF_RECIPE_STEP),
            ingredient_notes: form.get_string(INGREDIENT_NOTES),
        }
    }

    fn table_cells(ingredient: &RecipeStepIngredient) -> Vec<String> {
        vec![
            ingredient.id.to_string(),
            ingredient.name.clone(),
            ingredient.quantity_value.to_string(),
            ingredient.quantity_type.clone(),
            ingredient.ingredient_id.map(|id| id.to_string()).unwrap_or_default(),
            ingredient.ingredient_notes.clone(),
        ]
    }

    fn form_fields(ingredient: &RecipeStepIngredient) -> Vec<FormField> {
        vec![
            FormField::optional_number(INGREDIENT_ID, "Ingredient ID", ingredient.ingredient_id),
            FormField::text(NAME, "Name", &ingredient.name).required(),
            FormField::text(QUANTITY_TYPE, "Quantity Type", &ingredient.quantity_type).required(),
            FormField::number(QUANTITY_VALUE, "Quantity", ingredient.quantity_value),
            FormField::text(QUANTITY_NOTES, "Quantity Notes", &ingredient.quantity_notes),
            FormField::checkbox(
                PRODUCT_OF_RECIPE_STEP,
                "Product of Recipe Step",
                ingredient.product_of_recipe_step,
            ),
            FormField::text_area(INGREDIENT_NOTES, "Ingredient Notes", &ingredient.ingredient_notes),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::Validate;

    #[test]
    fn test_creation_form_decodes() {
        let form = FormValues::parse(
            "ingredientID=12&name=flour&quantityType=grams&quantityValue=250.5&productOfRecipeStep=on",
        );
        let input = RecipeStepIngredients::creation_input(&form);
        assert_eq!(input.ingredient_id, Some(12));
        assert_eq!(input.quantity_value, 250.5);
        assert!(input.product_of_recipe_step);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_missing_quantity_type_fails_validation() {
        let form = FormValues::parse("name=flour&quantityValue=1");
        assert!(RecipeStepIngredients::update_input(&form).validate().is_err());
    }

    #[test]
    fn test_scope_needs_both_parents() {
        let params = RouteParams::new(HashMap::from([
            ("recipe_id".to_string(), "4".to_string()),
            ("recipe_step_id".to_string(), "9".to_string()),
        ]));
        let scope = RecipeStepIngredients::scope(&params).unwrap();
        assert_eq!(
            RecipeStepIngredients::collection_path(&scope),
            "/recipes/4/recipe_steps/9/ingredients"
        );

        let missing = RouteParams::new(HashMap::from([("recipe_id".to_string(), "4".to_string())]));
        assert!(RecipeStepIngredients::scope(&missing).is_err());
    }
}
