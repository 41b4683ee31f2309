//! Checkbox field types.

use super::FieldKind;
use crate::form::FormFieldDef;
use crate::widgets::BootstrapCheckbox;

/// Creates a boolean field (checkbox).
///
/// Unchecked boxes are not submitted by browsers, so the field is optional
/// and a missing value cleans to `false`.
pub fn boolean_field(name: &str, label: &str) -> FormFieldDef {
    FormFieldDef::new(name, label, BootstrapCheckbox::new().label(label)).kind(FieldKind::Boolean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_field() {
        let field = boolean_field("is_published", "Опубликовано");
        assert_eq!(field.name, "is_published");
        assert_eq!(field.kind, FieldKind::Boolean);
        assert!(!field.required);
    }
}
