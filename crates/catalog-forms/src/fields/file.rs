//! File upload field types.

use super::FieldKind;
use crate::form::FormFieldDef;
use crate::validation::{FileExtensionValidator, RequiredValidator};
use crate::widgets::FileInput;

/// Creates an image upload field restricted to the given extensions.
///
/// The extension check runs as a field validator, before any custom clean
/// hook sees the file.
pub fn image_field<S: AsRef<str>>(
    name: &str,
    label: &str,
    allowed_extensions: &[S],
    extension_message: &str,
    required: bool,
) -> FormFieldDef {
    let mut field = FormFieldDef::new(name, label, FileInput::new().accept(allowed_extensions))
        .kind(FieldKind::File);

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field.validator(FileExtensionValidator::with_message(
        allowed_extensions,
        extension_message,
    ))
}
