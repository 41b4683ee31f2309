//! Text field types.

use super::FieldKind;
use crate::form::FormFieldDef;
use crate::validation::{MaxLengthValidator, RequiredValidator};
use crate::widgets::{BootstrapTextInput, BootstrapTextarea};

/// Creates a character field (text input with max length).
pub fn char_field(name: &str, label: &str, max_length: usize, required: bool) -> FormFieldDef {
    let mut field = FormFieldDef::new(name, label, BootstrapTextInput::new())
        .kind(FieldKind::Text)
        .attr("maxlength", max_length.to_string())
        .validator(MaxLengthValidator::new(max_length));

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}

/// Creates a text field (textarea).
pub fn text_field(name: &str, label: &str, rows: usize, required: bool) -> FormFieldDef {
    let mut field = FormFieldDef::new(name, label, BootstrapTextarea::new(rows)).kind(FieldKind::Text);

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_field() {
        let field = char_field("name", "Название", 150, true);
        assert_eq!(field.name, "name");
        assert!(field.required);
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.validators.len(), 2); // MaxLength + Required
        assert_eq!(field.attrs.get("maxlength").map(String::as_str), Some("150"));
    }

    #[test]
    fn test_text_field_optional() {
        let field = text_field("description", "Описание", 4, false);
        assert!(!field.required);
        assert!(field.validators.is_empty());
        assert_eq!(field.widget.input_type(), "textarea");
    }
}
