//! Ingredients recognised by the service, with allergen and diet flags.

use super::changes::{track, FieldChangeSummary};
use super::{require_text, Entity, Timestamps, Validate, ValidationError};

/// Dietary flags shared by the record and its commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngredientFlags {
    pub contains_egg: bool,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_soy: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub volumetric: bool,
}

impl IngredientFlags {
    /// Form keys paired with their flag values, in display order.
    pub fn entries(&self) -> [(&'static str, bool); 13] {
        [
            ("containsEgg", self.contains_egg),
            ("containsDairy", self.contains_dairy),
            ("containsPeanut", self.contains_peanut),
            ("containsTreeNut", self.contains_tree_nut),
            ("containsSoy", self.contains_soy),
            ("containsWheat", self.contains_wheat),
            ("containsShellfish", self.contains_shellfish),
            ("containsSesame", self.contains_sesame),
            ("containsFish", self.contains_fish),
            ("containsGluten", self.contains_gluten),
            ("animalFlesh", self.animal_flesh),
            ("animalDerived", self.animal_derived),
            ("volumetric", self.volumetric),
        ]
    }

    /// Build flags from a lookup keyed by the same form keys as [`entries`](Self::entries).
    pub fn from_lookup(lookup: impl Fn(&str) -> bool) -> Self {
        Self {
            contains_egg: lookup("containsEgg"),
            contains_dairy: lookup("containsDairy"),
            contains_peanut: lookup("containsPeanut"),
            contains_tree_nut: lookup("containsTreeNut"),
            contains_soy: lookup("containsSoy"),
            contains_wheat: lookup("containsWheat"),
            contains_shellfish: lookup("containsShellfish"),
            contains_sesame: lookup("containsSesame"),
            contains_fish: lookup("containsFish"),
            contains_gluten: lookup("containsGluten"),
            animal_flesh: lookup("animalFlesh"),
            animal_derived: lookup("animalDerived"),
            volumetric: lookup("volumetric"),
        }
    }

    fn track_into(&mut self, changes: &mut Vec<FieldChangeSummary>, new: &IngredientFlags) {
        let current = self.entries();
        let incoming = new.entries();
        for ((name, old), (_, updated)) in current.iter().zip(incoming.iter()) {
            if old != updated {
                changes.push(FieldChangeSummary::new(name, old, updated));
            }
        }
        *self = *new;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidIngredient {
    pub id: u64,
    pub name: String,
    pub variant: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub flags: IngredientFlags,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidIngredientCreationInput {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub flags: IngredientFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidIngredientUpdateInput {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub flags: IngredientFlags,
}

impl Validate for ValidIngredientCreationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Validate for ValidIngredientUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Entity for ValidIngredient {
    const KIND: &'static str = "valid ingredient";

    type Scope = ();
    type CreationInput = ValidIngredientCreationInput;
    type UpdateInput = ValidIngredientUpdateInput;

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

    fn from_creation_input(id: u64, _scope: &(), input: &ValidIngredientCreationInput, _created_by: u64) -> Self {
        Self {
            id,
            name: input.name.clone(),
            variant: input.variant.clone(),
            description: input.description.clone(),
            warning: input.warning.clone(),
            icon_path: input.icon_path.clone(),
            flags: input.flags,
            timestamps: Timestamps::default(),
        }
    }

    fn update(&mut self, input: &ValidIngredientUpdateInput) -> Vec<FieldChangeSummary> {
        let mut changes = Vec::new();
        track(&mut changes, "name", &mut self.name, &input.name);
        track(&mut changes, "variant", &mut self.variant, &input.variant);
        track(&mut changes, "description", &mut self.description, &input.description);
        track(&mut changes, "warning", &mut self.warning, &input.warning);
        track(&mut changes, "icon_path", &mut self.icon_path, &input.icon_path);
        self.flags.track_into(&mut changes, &input.flags);
        changes
    }
}
