//! Moderator form for products.

use catalog_forms::fields::boolean_field;
use catalog_forms::widgets::Presentation;
use catalog_forms::{full_clean, CleanedData, Form, FormData, FormFieldDef, Validation};
use tracing::debug;

use super::presentation_for;
use crate::models::Product;

const PRESENTATION: &[(&str, Presentation)] =
    &[("is_published", Presentation::class("form-check-input"))];

/// Form for users allowed to moderate products.
///
/// Only the publication flag is exposed; everything else submitted is
/// ignored.
#[derive(Debug)]
pub struct ProductModeratorForm {
    fields: Vec<FormFieldDef>,
}

impl ProductModeratorForm {
    /// Creates an empty moderator form.
    pub fn new() -> Self {
        let mut field = boolean_field("is_published", "Опубликовано");
        if let Some(presentation) = presentation_for(PRESENTATION, &field.name) {
            field = field.presentation(presentation);
        }
        Self {
            fields: vec![field],
        }
    }

    /// Creates a moderator form showing a product's current flag.
    pub fn for_instance(product: &Product) -> Self {
        let mut form = Self::new();
        for field in &mut form.fields {
            field.initial = Some(product.is_published.to_string());
        }
        form
    }

    /// Copies the cleaned publication flag onto a product.
    pub fn apply(cleaned: &CleanedData, product: &mut Product) {
        if let Some(is_published) = cleaned.boolean("is_published") {
            debug!(product = product.id, is_published, "Moderator changed publication");
            product.is_published = is_published;
        }
    }
}

impl Default for ProductModeratorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ProductModeratorForm {
    fn fields(&self) -> &[FormFieldDef] {
        &self.fields
    }

    fn validate(&self, data: &FormData) -> Validation {
        full_clean(&self.fields, &[], &(), data)
    }
}
