//! Form field descriptors rendered by the editor and creator templates.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Checkbox,
}

/// One input in an editor or creator form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
}

impl FormField {
    fn new(key: &'static str, label: &'static str, kind: FieldKind, value: String) -> Self {
        Self {
            key,
            label,
            kind,
            value,
            required: false,
        }
    }

    pub fn text(key: &'static str, label: &'static str, value: &str) -> Self {
        Self::new(key, label, FieldKind::Text, value.to_string())
    }

    pub fn text_area(key: &'static str, label: &'static str, value: &str) -> Self {
        Self::new(key, label, FieldKind::TextArea, value.to_string())
    }

    pub fn number(key: &'static str, label: &'static str, value: impl ToString) -> Self {
        Self::new(key, label, FieldKind::Number, value.to_string())
    }

    /// Number input that renders empty for `None`.
    pub fn optional_number<T: ToString>(key: &'static str, label: &'static str, value: Option<T>) -> Self {
        Self::new(
            key,
            label,
            FieldKind::Number,
            value.map(|v| v.to_string()).unwrap_or_default(),
        )
    }

    pub fn checkbox(key: &'static str, label: &'static str, checked: bool) -> Self {
        Self::new(key, label, FieldKind::Checkbox, checked.to_string())
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }

    pub fn is_text_area(&self) -> bool {
        self.kind == FieldKind::TextArea
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Number => "number",
            _ => "text",
        }
    }

    pub fn checked(&self) -> bool {
        self.is_checkbox() && self.value == "true"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kinds() {
        let field = FormField::optional_number::<u16>("temperatureInCelsius", "Temperature", None);
        assert_eq!(field.value, "");
        assert_eq!(field.input_type(), "number");

        let field = FormField::checkbox("volumetric", "Volumetric", true);
        assert!(field.checked());
        assert!(!FormField::text("name", "Name", "x").required().checked());
    }
}
