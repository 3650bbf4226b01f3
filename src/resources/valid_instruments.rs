//! Valid instrument pages.

use super::Resource;
use crate::domain::{ValidInstrument, ValidInstrumentCreationInput, ValidInstrumentUpdateInput};
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::FormField;

const NAME: &str = "name";
const VARIANT: &str = "variant";
const DESCRIPTION: &str = "description";
const ICON_PATH: &str = "iconPath";

pub struct ValidInstruments;

impl Resource for ValidInstruments {
    type Entity = ValidInstrument;

    const NAME: &'static str = "valid_instruments";
    const SINGULAR: &'static str = "Valid Instrument";
    const PLURAL: &'static str = "Valid Instruments";
    const COLLECTION_ROUTE: &'static str = "/valid_instruments";
    const ID_PARAM: &'static str = "valid_instrument_id";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Variant", "Description", "Icon Path"];

    fn scope(_params: &RouteParams) -> Result<(), AppError> {
        Ok(())
    }

    fn collection_path(_scope: &()) -> String {
        Self::COLLECTION_ROUTE.to_string()
    }

    fn store(store: &dyn DataStore) -> &dyn EntityStore<ValidInstrument> {
        store.valid_instruments()
    }

    fn creation_input(form: &FormValues) -> ValidInstrumentCreationInput {
        ValidInstrumentCreationInput {
            name: form.get_string(NAME),
            variant: form.get_string(VARIANT),
            description: form.get_string(DESCRIPTION),
            icon_path: form.get_string(ICON_PATH),
        }
    }

    fn update_input(form: &FormValues) -> ValidInstrumentUpdateInput {
        ValidInstrumentUpdateInput {
            name: form.get_string(NAME),
            variant: form.get_string(VARIANT),
            description: form.get_string(DESCRIPTION),
            icon_path: form.get_string(ICON_PATH),
        }
    }

    fn table_cells(instrument: &ValidInstrument) -> Vec<String> {
        vec![
            instrument.id.to_string(),
            instrument.name.clone(),
            instrument.variant.clone(),
            instrument.description.clone(),
            instrument.icon_path.clone(),
        ]
    }

    fn form_fields(instrument: &ValidInstrument) -> Vec<FormField> {
        vec![
            FormField::text(NAME, "Name", &instrument.name).required(),
            FormField::text(VARIANT, "Variant", &instrument.variant),
            FormField::text_area(DESCRIPTION, "Description", &instrument.description),
            FormField::text(ICON_PATH, "Icon Path", &instrument.icon_path),
        ]
    }
}
