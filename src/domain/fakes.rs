//! Placeholder entities served when `frontend.use_fake_data` is enabled.
//!
//! Lets the views be exercised without a data store behind them.

use super::{
    unix_now, Entity, EntityList, QueryFilter, Recipe, RecipeScope, RecipeStep,
    RecipeStepIngredient, RecipeStepScope, Timestamps, ValidIngredient, ValidInstrument,
    ValidPreparation,
};
use super::valid_ingredient::IngredientFlags;

const WORDS: &[&str] = &[
    "basil", "butter", "cardamom", "chive", "cumin", "dill", "fennel", "garlic", "ginger",
    "lemon", "maple", "nutmeg", "onion", "paprika", "pepper", "saffron", "sage", "thyme",
];

const QUANTITY_TYPES: &[&str] = &["grams", "cups", "teaspoons", "tablespoons", "pieces"];

/// Entities that can produce a random placeholder under a given scope.
pub trait Fake: Entity {
    fn fake(scope: &Self::Scope) -> Self;
}

/// Random non-zero identifier.
pub fn fake_id() -> u64 {
    fastrand::u64(1..100_000)
}

fn word() -> String {
    fastrand::choice(WORDS).copied().unwrap_or("salt").to_string()
}

fn words(count: usize) -> String {
    (0..count).map(|_| word()).collect::<Vec<_>>().join(" ")
}

fn fake_timestamps() -> Timestamps {
    Timestamps {
        created_on: unix_now().saturating_sub(fastrand::u64(0..86_400 * 30)),
        last_updated_on: None,
        archived_on: None,
    }
}

/// A page of placeholder entities sized to the filter's limit.
pub fn fake_list<E: Fake>(scope: &E::Scope, filter: &QueryFilter) -> EntityList<E> {
    let count = fastrand::usize(1..=usize::from(filter.limit).min(10));
    let items = (0..count).map(|_| E::fake(scope)).collect::<Vec<_>>();
    let total = items.len() as u64;
    EntityList::new(items, filter, total)
}

impl Fake for Recipe {
    fn fake(_scope: &()) -> Self {
        Self {
            id: fake_id(),
            name: words(2),
            source: words(1),
            description: words(8),
            inspired_by_recipe_id: None,
            created_by_user: fake_id(),
            timestamps: fake_timestamps(),
        }
    }
}

impl Fake for RecipeStep {
    fn fake(scope: &RecipeScope) -> Self {
        let min = fastrand::u32(60..600);
        Self {
            id: fake_id(),
            index: fastrand::u32(0..10),
            preparation_id: fake_id(),
            prerequisite_step: 0,
            min_estimated_time_in_seconds: min,
            max_estimated_time_in_seconds: min + fastrand::u32(0..600),
            temperature_in_celsius: fastrand::bool().then(|| fastrand::u16(100..250)),
            notes: words(6),
            why: words(4),
            belongs_to_recipe: scope.recipe_id,
            timestamps: fake_timestamps(),
        }
    }
}

impl Fake for RecipeStepIngredient {
    fn fake(scope: &RecipeStepScope) -> Self {
        Self {
            id: fake_id(),
            ingredient_id: Some(fake_id()),
            name: word(),
            quantity_type: fastrand::choice(QUANTITY_TYPES).copied().unwrap_or("grams").to_string(),
            quantity_value: fastrand::u16(1..500) as f32,
            quantity_notes: String::new(),
            product_of_recipe_step: false,
            ingredient_notes: words(3),
            belongs_to_recipe: scope.recipe_id,
            belongs_to_recipe_step: scope.recipe_step_id,
            timestamps: fake_timestamps(),
        }
    }
}

impl Fake for ValidInstrument {
    fn fake(_scope: &()) -> Self {
        Self {
            id: fake_id(),
            name: words(1),
            variant: words(1),
            description: words(6),
            icon_path: String::new(),
            timestamps: fake_timestamps(),
        }
    }
}

impl Fake for ValidIngredient {
    fn fake(_scope: &()) -> Self {
        Self {
            id: fake_id(),
            name: word(),
            variant: words(1),
            description: words(6),
            warning: String::new(),
            icon_path: String::new(),
            flags: IngredientFlags::from_lookup(|_| fastrand::u8(0..4) == 0),
            timestamps: fake_timestamps(),
        }
    }
}

impl Fake for ValidPreparation {
    fn fake(_scope: &()) -> Self {
        Self {
            id: fake_id(),
            name: word(),
            description: words(6),
            icon_path: String::new(),
            timestamps: fake_timestamps(),
        }
    }
}
