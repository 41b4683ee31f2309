//! Select field types.

use super::FieldKind;
use crate::form::FormFieldDef;
use crate::validation::RequiredValidator;
use crate::widgets::BootstrapSelect;

/// Creates a choice field (select/dropdown) over integer keys.
pub fn choice_field(
    name: &str,
    label: &str,
    choices: Vec<(i64, String)>,
    required: bool,
) -> FormFieldDef {
    let widget = BootstrapSelect::new(
        choices
            .iter()
            .map(|(key, label)| (key.to_string(), label.clone()))
            .collect::<Vec<_>>(),
    );

    let mut field = FormFieldDef::new(name, label, widget).kind(FieldKind::Choice { choices });

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_field() {
        let choices = vec![(1, "Книги".to_string()), (2, "Инструменты".to_string())];
        let field = choice_field("category", "Категория", choices, false);
        assert_eq!(field.name, "category");
        assert!(!field.required);
        assert_eq!(field.widget.input_type(), "select");
        assert!(matches!(field.kind, FieldKind::Choice { ref choices } if choices.len() == 2));
    }
}
