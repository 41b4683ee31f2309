//! Form field definitions.
//!
//! Every field has a [`FieldKind`] that decides how the submitted string (or
//! file) is coerced into a [`FieldValue`]. The helper constructors in the
//! submodules pair a kind with a widget and the usual validators.

mod checkbox;
mod file;
mod numeric;
mod select;
mod text;

pub use checkbox::boolean_field;
pub use file::image_field;
pub use numeric::decimal_field;
pub use select::choice_field;
pub use text::{char_field, text_field};

use rust_decimal::Decimal;

use crate::data::FieldValue;

/// Message for a required field that was left empty.
pub const REQUIRED_MESSAGE: &str = "This field is required.";
/// Message for a value that does not parse as a number.
pub const INVALID_NUMBER_MESSAGE: &str = "Enter a number.";
/// Message for a choice key outside the offered choices.
pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
/// Message for an upload without a file name.
pub const NO_FILE_MESSAGE: &str = "No file was submitted. Check the encoding type on the form.";
/// Message for an upload with no content.
pub const EMPTY_FILE_MESSAGE: &str = "The submitted file is empty.";

/// How a submitted value is coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, trimmed.
    Text,
    /// A decimal number with digit limits.
    Decimal {
        /// Maximum number of digits in total.
        max_digits: u32,
        /// Maximum number of digits after the decimal point.
        decimal_places: u32,
    },
    /// A checkbox.
    Boolean,
    /// One of a fixed set of integer keys.
    Choice {
        /// Offered choices (key, label).
        choices: Vec<(i64, String)>,
    },
    /// An uploaded file.
    File,
}

impl FieldKind {
    /// Value stored for an optional field that was left empty.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            Self::Text => FieldValue::Text(String::new()),
            Self::Boolean => FieldValue::Bool(false),
            Self::Decimal { .. } | Self::Choice { .. } | Self::File => FieldValue::Empty,
        }
    }

    /// Coerces a non-empty, trimmed text value.
    ///
    /// Files and checkboxes are handled by the field itself; they never
    /// reach this method with a raw string.
    pub fn coerce(&self, raw: &str) -> Result<FieldValue, String> {
        match self {
            Self::Text => Ok(FieldValue::Text(raw.to_string())),
            Self::Decimal {
                max_digits,
                decimal_places,
            } => parse_decimal(raw, *max_digits, *decimal_places).map(FieldValue::Decimal),
            Self::Boolean => Ok(FieldValue::Bool(is_checked(raw))),
            Self::Choice { choices } => raw
                .parse::<i64>()
                .ok()
                .filter(|key| choices.iter().any(|(k, _)| k == key))
                .map(FieldValue::Choice)
                .ok_or_else(|| INVALID_CHOICE_MESSAGE.to_string()),
            Self::File => Err(NO_FILE_MESSAGE.to_string()),
        }
    }
}

/// Checkbox semantics: absent, blank, `false`, `0` and `off` are unchecked.
pub fn is_checked(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "false" | "0" | "off"
    )
}

fn parse_decimal(raw: &str, max_digits: u32, decimal_places: u32) -> Result<Decimal, String> {
    let value = raw
        .parse::<Decimal>()
        .map_err(|_| INVALID_NUMBER_MESSAGE.to_string())?;

    let (digits, decimals) = digit_counts(value);
    let whole_digits = digits - decimals;

    if digits > max_digits {
        return Err(format!(
            "Ensure that there are no more than {max_digits} digits in total."
        ));
    }
    if decimals > decimal_places {
        return Err(format!(
            "Ensure that there are no more than {decimal_places} decimal places."
        ));
    }
    if whole_digits > max_digits.saturating_sub(decimal_places) {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            max_digits.saturating_sub(decimal_places)
        ));
    }

    Ok(value)
}

/// Counts (total digits, digits after the point) the way they were written.
///
/// Zero written without a fraction has no digits; leading zeros after the
/// point count towards both totals.
fn digit_counts(value: Decimal) -> (u32, u32) {
    let mantissa = value.mantissa().unsigned_abs();
    let len = if mantissa == 0 { 1 } else { mantissa.ilog10() + 1 };
    let scale = value.scale();

    if scale == 0 {
        (if mantissa == 0 { 0 } else { len }, 0)
    } else if scale > len {
        (scale, scale)
    } else {
        (len, scale)
    }
}
