//! Recipe pages.

use super::{Resource, ScopeOf};
use crate::domain::{Recipe, RecipeCreationInput, RecipeUpdateInput};
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::{FormField, NavLink};

const NAME: &str = "name";
const SOURCE: &str = "source";
const DESCRIPTION: &str = "description";
const INSPIRED_BY: &str = "inspiredByRecipeID";

pub struct Recipes;

impl Resource for Recipes {
    type Entity = Recipe;

    const NAME: &'static str = "recipes";
    const SINGULAR: &'static str = "Recipe";
    const PLURAL: &'static str = "Recipes";
    const COLLECTION_ROUTE: &'static str = "/recipes";
    const ID_PARAM: &'static str = "recipe_id";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Source", "Description", "Created On"];

    fn scope(_params: &RouteParams) -> Result<(), AppError> {
        Ok(())
    }

    fn collection_path(_scope: &()) -> String {
        Self::COLLECTION_ROUTE.to_string()
    }

    fn store(store: &dyn DataStore) -> &dyn EntityStore<Recipe> {
        store.recipes()
    }

    fn creation_input(form: &FormValues) -> RecipeCreationInput {
        RecipeCreationInput {
            name: form.get_string(NAME),
            source: form.get_string(SOURCE),
            description: form.get_string(DESCRIPTION),
            inspired_by_recipe_id: form.get_optional_u64(INSPIRED_BY),
        }
    }

    fn update_input(form: &FormValues) -> RecipeUpdateInput {
        RecipeUpdateInput {
            name: form.get_string(NAME),
            source: form.get_string(SOURCE),
            description: form.get_string(DESCRIPTION),
            inspired_by_recipe_id: form.get_optional_u64(INSPIRED_BY),
        }
    }

    fn table_cells(recipe: &Recipe) -> Vec<String> {
        vec![
            recipe.id.to_string(),
            recipe.name.clone(),
            recipe.source.clone(),
            recipe.description.clone(),
            recipe.timestamps.created_on.to_string(),
        ]
    }

    fn form_fields(recipe: &Recipe) -> Vec<FormField> {
        vec![
            FormField::text(NAME, "Name", &recipe.name).required(),
            FormField::text(SOURCE, "Source", &recipe.source),
            FormField::text_area(DESCRIPTION, "Description", &recipe.description),
            FormField::optional_number(INSPIRED_BY, "Inspired By Recipe ID", recipe.inspired_by_recipe_id),
        ]
    }

    fn child_links(_scope: &ScopeOf<Self>, id: u64) -> Vec<NavLink> {
        vec![NavLink::new("Steps", &format!("/recipes/{id}/recipe_steps"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Validate;

    #[test]
    fn test_creation_form_decodes() {
        let form = FormValues::parse("name=Shakshuka&source=cookbook&description=eggs+in+sauce&inspiredByRecipeID=3");
        let input = Recipes::creation_input(&form);
        assert_eq!(
            input,
            RecipeCreationInput {
                name: "Shakshuka".into(),
                source: "cookbook".into(),
                description: "eggs in sauce".into(),
                inspired_by_recipe_id: Some(3),
            }
        );
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let form = FormValues::parse("source=cookbook");
        assert!(Recipes::update_input(&form).validate().is_err());
    }

    #[test]
    fn test_editor_links_to_steps() {
        let links = Recipes::child_links(&(), 4);
        assert_eq!(links[0].href, "/recipes/4/recipe_steps");
    }
}
