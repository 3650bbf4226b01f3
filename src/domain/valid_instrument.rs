//! Kitchen instruments recognised by the service.

use super::changes::{track, FieldChangeSummary};
use super::{require_text, Entity, Timestamps, Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidInstrument {
    pub id: u64,
    pub name: String,
    pub variant: String,
    pub description: String,
    pub icon_path: String,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidInstrumentCreationInput {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub icon_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidInstrumentUpdateInput {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub icon_path: String,
}

impl Validate for ValidInstrumentCreationInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Validate for ValidInstrumentUpdateInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

impl Entity for ValidInstrument {
    const KIND: &'static str = "valid instrument";

    type Scope = ();
    type CreationInput = ValidInstrumentCreationInput;
    type UpdateInput = ValidInstrumentUpdateInput;

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

    fn from_creation_input(id: u64, _scope: &(), input: &ValidInstrumentCreationInput, _created_by: u64) -> Self {
        Self {
            id,
            name: input.name.clone(),
            variant: input.variant.clone(),
            description: input.description.clone(),
            icon_path: input.icon_path.clone(),
            timestamps: Timestamps::default(),
        }
    }

    fn update(&mut self, input: &ValidInstrumentUpdateInput) -> Vec<FieldChangeSummary> {
        let mut changes = Vec::new();
        track(&mut changes, "name", &mut self.name, &input.name);
        track(&mut changes, "variant", &mut self.variant, &input.variant);
        track(&mut changes, "description", &mut self.description, &input.description);
        track(&mut changes, "icon_path", &mut self.icon_path, &input.icon_path);
        changes
    }
}
