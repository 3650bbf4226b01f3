//! Field-change summaries recorded for audit when an entity is updated.

use std::fmt::Display;

/// A single field whose value changed during an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChangeSummary {
    pub field_name: String,
    pub old_value: String,
    pub new_value: String,
}

impl FieldChangeSummary {
    pub fn new(field_name: &str, old_value: impl Display, new_value: impl Display) -> Self {
        Self {
            field_name: field_name.to_string(),
            old_value: old_value.to_string(),
            new_value: new_value.to_string(),
        }
    }
}

/// Overwrite `current` with `new` when they differ, recording the change.
pub(crate) fn track<T>(
    changes: &mut Vec<FieldChangeSummary>,
    field_name: &str,
    current: &mut T,
    new: &T,
) where
    T: PartialEq + Clone + Display,
{
    if current != new {
        changes.push(FieldChangeSummary::new(field_name, &*current, new));
        *current = new.clone();
    }
}

/// Same as [`track`] for nullable fields; `None` is summarised as an empty string.
pub(crate) fn track_optional<T>(
    changes: &mut Vec<FieldChangeSummary>,
    field_name: &str,
    current: &mut Option<T>,
    new: &Option<T>,
) where
    T: PartialEq + Clone + Display,
{
    if current != new {
        changes.push(FieldChangeSummary::new(
            field_name,
            display_optional(current),
            display_optional(new),
        ));
        *current = new.clone();
    }
}

fn display_optional<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_records_only_differences() {
        let mut changes = Vec::new();
        let mut name = "Toast".to_string();
        track(&mut changes, "name", &mut name, &"Toast".to_string());
        assert!(changes.is_empty());

        track(&mut changes, "name", &mut name, &"French Toast".to_string());
        assert_eq!(name, "French Toast");
        assert_eq!(changes, vec![FieldChangeSummary::new("name", "Toast", "French Toast")]);
    }

    #[test]
    fn test_track_optional_clears_value() {
        let mut changes = Vec::new();
        let mut temperature = Some(180u16);
        track_optional(&mut changes, "temperature_in_celsius", &mut temperature, &None);
        assert_eq!(temperature, None);
        assert_eq!(changes[0].old_value, "180");
        assert_eq!(changes[0].new_value, "");
    }
}
