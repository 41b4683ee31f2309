//! Forms bound to catalog records.
//!
//! Each form lists its fields explicitly, styles them from a static
//! presentation table and, where needed, registers clean hooks by field name.

mod moderator;
mod product;

pub use moderator::ProductModeratorForm;
pub use product::{
    ProductForm, IMAGE_EXTENSION_MESSAGE, NAME_MAX_LENGTH, NEGATIVE_PRICE_MESSAGE,
    PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS,
};

use catalog_forms::widgets::Presentation;

/// Product fields that no user-facing form exposes.
pub const EXCLUDED_FIELDS: &[&str] = &["owner", "created_at", "updated_at"];

fn presentation_for<'a>(
    table: &'a [(&str, Presentation)],
    field: &str,
) -> Option<&'a Presentation> {
    table
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, presentation)| presentation)
}
