//! Valid preparation pages.

use super::Resource;
use crate::domain::{ValidPreparation, ValidPreparationCreationInput, ValidPreparationUpdateInput};
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::FormField;

const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const ICON_PATH: &str = "iconPath";

pub struct ValidPreparations;

impl Resource for ValidPreparations {
    type Entity = ValidPreparation;

    const NAME: &'static str = "valid_preparations";
    const SINGULAR: &'static str = "Valid Preparation";
    const PLURAL: &'static str = "Valid Preparations";
    const COLLECTION_ROUTE: &'static str = "/valid_preparations";
    const ID_PARAM: &'static str = "valid_preparation_id";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Description", "Icon Path"];

    fn scope(_params: &RouteParams) -> Result<(), AppError> {
        Ok(())
    }

    fn collection_path(_scope: &()) -> String {
        Self::COLLECTION_ROUTE.to_string()
    }

    fn store(store: &dyn DataStore) -> &dyn EntityStore<ValidPreparation> {
        store.valid_preparations()
    }

    fn creation_input(form: &FormValues) -> ValidPreparationCreationInput {
        ValidPreparationCreationInput {
            name: form.get_string(NAME),
            description: form.get_string(DESCRIPTION),
            icon_path: form.get_string(ICON_PATH),
        }
    }

    fn update_input(form: &FormValues) -> ValidPreparationUpdateInput {
        ValidPreparationUpdateInput {
            name: form.get_string(NAME),
            description: form.get_string(DESCRIPTION),
            icon_path: form.get_string(ICON_PATH),
        }
    }

    fn table_cells(preparation: &ValidPreparation) -> Vec<String> {
        vec![
            preparation.id.to_string(),
            preparation.name.clone(),
            preparation.description.clone(),
            preparation.icon_path.clone(),
        ]
    }

    fn form_fields(preparation: &ValidPreparation) -> Vec<FormField> {
        vec![
            FormField::text(NAME, "Name", &preparation.name).required(),
            FormField::text_area(DESCRIPTION, "Description", &preparation.description),
            FormField::text(ICON_PATH, "Icon Path", &preparation.icon_path),
        ]
    }
}
