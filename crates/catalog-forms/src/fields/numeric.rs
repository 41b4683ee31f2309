//! Numeric field types.

use super::FieldKind;
use crate::form::FormFieldDef;
use crate::validation::RequiredValidator;
use crate::widgets::BootstrapTextInput;

/// Creates a decimal field (number input).
///
/// The browser step defaults to the smallest unit allowed by
/// `decimal_places`.
pub fn decimal_field(
    name: &str,
    label: &str,
    max_digits: u32,
    decimal_places: u32,
    required: bool,
) -> FormFieldDef {
    let step = if decimal_places == 0 {
        "1".to_string()
    } else {
        format!("0.{}1", "0".repeat(decimal_places as usize - 1))
    };

    let mut field = FormFieldDef::new(name, label, BootstrapTextInput::number())
        .kind(FieldKind::Decimal {
            max_digits,
            decimal_places,
        })
        .attr("step", step);

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}
