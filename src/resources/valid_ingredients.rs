//! Valid ingredient pages, including the allergen and diet checkboxes.

use super::Resource;
use crate::domain::valid_ingredient::IngredientFlags;
use crate::domain::{ValidIngredient, ValidIngredientCreationInput, ValidIngredientUpdateInput};
use crate::error::AppError;
use crate::http::form::FormValues;
use crate::http::RouteParams;
use crate::store::{DataStore, EntityStore};
use crate::views::FormField;

const NAME: &str = "name";
const VARIANT: &str = "variant";
const DESCRIPTION: &str = "description";
const WARNING: &str = "warning";
const ICON_PATH: &str = "iconPath";

/// Checkbox labels, in the order of [`IngredientFlags::entries`].
const FLAG_LABELS: [&str; 13] = [
    "Contains Egg",
    "Contains Dairy",
    "Contains Peanut",
    "Contains Tree Nut",
    "Contains Soy",
    "Contains Wheat",
    "Contains Shellfish",
    "Contains Sesame",
    "Contains Fish",
    "Contains Gluten",
    "Animal Flesh",
    "Animal Derived",
    "Volumetric",
];

fn decode_flags(form: &FormValues) -> IngredientFlags {
    IngredientFlags::from_lookup(|key| form.get_bool(key))
}

pub struct ValidIngredients;

impl Resource for ValidIngredients {
    type Entity = ValidIngredient;

    const NAME: &'static str = "valid_ingredients";
    const SINGULAR: &'static str = "Valid Ingredient";
    const PLURAL: &'static str = "Valid Ingredients";
    const COLLECTION_ROUTE: &'static str = "/valid_ingredients";
    const ID_PARAM: &'static str = "valid_ingredient_id";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Variant", "Description", "Warning"];

    fn scope(_params: &RouteParams) -> Result<(), AppError> {
        Ok(())
    }

    fn collection_path(_scope: &()) -> String {
        Self::COLLECTION_ROUTE.to_string()
    }

    fn store(store: &dyn DataStore) -> &dyn EntityStore<ValidIngredient> {
        store.valid_ingredients()
    }

    fn creation_input(form: &FormValues) -> ValidIngredientCreationInput {
        ValidIngredientCreationInput {
            name: form.get_string(NAME),
            variant: form.get_string(VARIANT),
            description: form.get_string(DESCRIPTION),
            warning: form.get_string(WARNING),
            icon_path: form.get_string(ICON_PATH),
            flags: decode_flags(form),
        }
    }

    fn update_input(form: &FormValues) -> ValidIngredientUpdateInput {
        ValidIngredientUpdateInput {
            name: form.get_string(NAME),
            variant: form.get_string(VARIANT),
            description: form.get_string(DESCRIPTION),
            warning: form.get_string(WARNING),
            icon_path: form.get_string(ICON_PATH),
            flags: decode_flags(form),
        }
    }

    fn table_cells(ingredient: &ValidIngredient) -> Vec<String> {
        vec![
            ingredient.id.to_string(),
            ingredient.name.clone(),
            ingredient.variant.clone(),
            ingredient.description.clone(),
            ingredient.warning.clone(),
        ]
    }

    fn form_fields(ingredient: &ValidIngredient) -> Vec<FormField> {
        let mut fields = vec![
            FormField::text(NAME, "Name", &ingredient.name).required(),
            FormField::text(VARIANT, "Variant", &ingredient.variant),
            FormField::text_area(DESCRIPTION, "Description", &ingredient.description),
            FormField::text(WARNING, "Warning", &ingredient.warning),
            FormField::text(ICON_PATH, "Icon Path", &ingredient.icon_path),
        ];
        fields.extend(
            ingredient
                .flags
                .entries()
                .into_iter()
                .zip(FLAG_LABELS)
                .map(|((key, checked), label)| FormField::checkbox(key, label, checked)),
        );
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Validate;

    #[test]
    fn test_checkboxes_decode_into_flags() {
        let form = FormValues::parse("name=butter&containsDairy=on&animalDerived=true&volumetric=off");
        let input = ValidIngredients::creation_input(&form);
        assert!(input.flags.contains_dairy);
        assert!(input.flags.animal_derived);
        assert!(!input.flags.volumetric);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_form_fields_include_every_flag() {
        let ingredient = ValidIngredient {
            name: "peanut butter".into(),
            flags: IngredientFlags {
                contains_peanut: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let fields = ValidIngredients::form_fields(&ingredient);
        let checkboxes: Vec<_> = fields.iter().filter(|f| f.is_checkbox()).collect();
        assert_eq!(checkboxes.len(), 13);

        let peanut = checkboxes.iter().find(|f| f.key == "containsPeanut").unwrap();
        assert!(peanut.checked());
        assert_eq!(peanut.label, "Contains Peanut");
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let form = FormValues::parse("containsEgg=on");
        assert!(ValidIngredients::update_input(&form).validate().is_err());
    }
}
