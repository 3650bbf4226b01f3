//! Preparation methods (chop, bake, whisk...) recognised by the service.

use super::changes::{track, FieldChangeSummary};
use super::{require_text, Entity, Timestamps, Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidPreparation {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub icon_path: String,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidPreparationCreationInput {
    pub name: String,
    pub description: String,
    pub icon_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidPreparationUpdateInput {
    pub name: String,
    pub description: String,
    pub icon_path: String,
}

impl Validate for ValidPreparationCreationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Validate for ValidPreparationUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Entity for ValidPreparation {
    const KIND: &'static str = "valid preparation";

    type Scope = ();
    type CreationInput = ValidPreparationCreationInput;
    type UpdateInput = ValidPreparationUpdateInput;

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

    fn from_creation_input(id: u64, _scope: &(), input: &ValidPreparationCreationInput, _created_by: u64) -> Self {
        Self {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            icon_path: input.icon_path.clone(),
            timestamps: Timestamps::default(),
        }
    }

    fn update(&mut self, input: &ValidPreparationUpdateInput) -> Vec<FieldChangeSummary> {
        let mut changes = Vec::new();
        track(&mut changes, "name", &mut self.name, &input.name);
        track(&mut changes, "description", &mut self.description, &input.description);
        track(&mut changes, "icon_path", &mut self.icon_path, &input.icon_path);
        changes
    }
}
