//! Recipe step pages, nested under a recipe.

use super::{Resource, ScopeOf};
use crate::domain::{RecipeScope, RecipeStep, RecipeStepCreationInput, RecipeStepUpdateInput};
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::{FormField, NavLink};

const INDEX: &str = "index";
const PREPARATION_ID: &str = "preparationID";
const PREREQUISITE_STEP: &str = "prerequisiteStep";
const MIN_SECONDS: &str = "minEstimatedTimeInSeconds";
const MAX_SECONDS: &str = "maxEstimatedTimeInSeconds";
const TEMPERATURE: &str = "temperatureInCelsius";
const NOTES: &str = "notes";
const WHY: &str = "why";

pub struct RecipeSteps;

impl Resource for RecipeSteps {
    type Entity = RecipeStep;

    const NAME: &'static str = "recipe_steps";
    const SINGULAR: &'static str = "Recipe Step";
    const PLURAL: &'static str = "Recipe Steps";
    const COLLECTION_ROUTE: &'static str = "/recipes/{recipe_id}/recipe_steps";
    const ID_PARAM: &'static str = "recipe_step_id";
    const COLUMNS: &'static [&'static str] = &[
        "ID",
        "Index",
        "Preparation ID",
        "Min Time (s)",
        "Max Time (s)",
        "Temperature (C)",
        "Notes",
    ];

    fn scope(params: &RouteParams) -> Result<RecipeScope, AppError> {
        Ok(RecipeScope {
            recipe_id: params.id("recipe_id")?,
        })
    }

    fn collection_path(scope: &RecipeScope) -> String {
        format!("/recipes/{}/recipe_steps", scope.recipe_id)
    }

    fn store(store: &dyn DataStore) -> &dyn EntityStore<RecipeStep> {
        store.recipe_steps()
    }

    fn creation_input(form: &FormValues) -> RecipeStepCreationInput {
        RecipeStepCreationInput {
            index: form.get_u32(INDEX),
            preparation_id: form.get_u64(PREPARATION_ID),
            prerequisite_step: form.get_u64(PREREQUISITE_STEP),
            min_estimated_time_in_seconds: form.get_u32(MIN_SECONDS),
            max_estimated_time_in_seconds: form.get_u32(MAX_SECONDS),
            temperature_in_celsius: form.get_optional_u16(TEMPERATURE),
            notes: form.get_string(NOTES),
            why: form.get_string(WHY),
        }
    }

    fn update_input(form: &FormValues) -> RecipeStepUpdateInput {
        RecipeStepUpdateInput {
            index: form.get_u32(INDEX),
            preparation_id: form.get_u64(PREPARATION_ID),
            prerequisite_step: form.get_u64(PREREQUISITE_STEP),
            min_estimated_time_in_seconds: form.get_u32(MIN_SECONDS),
            max_estimated_time_in_seconds: form.get_u32(MAX_SECONDS),
            temperature_in_celsius: form.get_optional_u16(TEMPERATURE),
            notes: form.get_string(NOTES),
            why: form.get_string(WHY),
        }
    }

    fn table_cells(step: &RecipeStep) -> Vec<String> {
        vec![
            step.id.to_string(),
            step.index.to_string(),
            step.preparation_id.to_string(),
            step.min_estimated_time_in_seconds.to_string(),
            step.max_estimated_time_in_seconds.to_string(),
            step.temperature_in_celsius.map(|t| t.to_string()).unwrap_or_default(),
            step.notes.clone(),
        ]
    }

    fn form_fields(step: &RecipeStep) -> Vec<FormField> {
        vec![
            FormField::number(INDEX, "Index", step.index),
            FormField::number(PREPARATION_ID, "Preparation ID", step.preparation_id).required(),
            FormField::number(PREREQUISITE_STEP, "Prerequisite Step", step.prerequisite_step),
            FormField::number(MIN_SECONDS, "Min Estimated Time (s)", step.min_estimated_time_in_seconds),
            FormField::number(MAX_SECONDS, "Max Estimated Time (s)", step.max_estimated_time_in_seconds),
            FormField::optional_number(TEMPERATURE, "Temperature (C)", step.temperature_in_celsius),
            FormField::text_area(NOTES, "Notes", &step.notes),
            FormField::text_area(WHY, "Why", &step.why),
        ]
    }

    fn child_links(scope: &ScopeOf<Self>, id: u64) -> Vec<NavLink> {
        vec![NavLink::new(
            "Ingredients",
            &format!("/recipes/{}/recipe_steps/{id}/ingredients", scope.recipe_id),
        )]
    }
}
