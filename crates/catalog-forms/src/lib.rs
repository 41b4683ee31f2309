//! # catalog-forms
//!
//! Form field definitions, validation and Bootstrap 5 widgets for the
//! product catalog.
//!
//! This crate provides:
//! - Explicit field definitions with type coercion and validators
//! - A clean-hook table for per-field custom rules
//! - Bootstrap 5 form widgets and rendering helpers
//! - Validation error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_forms::fields::{char_field, decimal_field};
//! use catalog_forms::{full_clean, CleanHook, FieldValue, FormBuilder, FormData};
//!
//! fn not_negative(_: &(), value: FieldValue) -> Result<FieldValue, String> {
//!     match value.as_decimal() {
//!         Some(price) if price.is_sign_negative() => Err("Price must not be negative.".into()),
//!         _ => Ok(value),
//!     }
//! }
//!
//! const HOOKS: &[CleanHook<()>] = &[("price", not_negative)];
//!
//! let fields = FormBuilder::new()
//!     .field(char_field("name", "Name", 150, true))
//!     .field(decimal_field("price", "Price", 10, 2, true))
//!     .build();
//!
//! let data = FormData::new().value("name", "Kettle").value("price", "-5");
//! let validation = full_clean(&fields, HOOKS, &(), &data);
//!
//! assert!(!validation.is_valid());
//! assert_eq!(validation.cleaned.text("name"), Some("Kettle"));
//! assert!(validation.errors.contains("price"));
//! ```
//!
//! ## Presentation
//!
//! ```rust
//! use catalog_forms::fields::char_field;
//! use catalog_forms::widgets::Presentation;
//!
//! const NAME: Presentation = Presentation::class("form-control mb-3 mt-1")
//!     .placeholder("Product name")
//!     .required();
//!
//! let field = char_field("name", "Name", 150, true).presentation(&NAME);
//! assert_eq!(field.attrs.get("placeholder").map(String::as_str), Some("Product name"));
//! ```
//!
//! ## Widgets
//!
//! Available widgets:
//! - `BootstrapTextInput` - Text and number inputs
//! - `BootstrapTextarea` - Multi-line text input
//! - `BootstrapSelect` - Dropdown select
//! - `BootstrapCheckbox` - Checkbox
//! - `FileInput` - File upload

mod data;
mod error;
pub mod fields;
mod form;
pub mod validation;
pub mod widgets;

pub use data::{CleanedData, FieldValue, FormData, UploadedFile};
pub use error::{FormError, Result, ValidationErrors};
pub use form::{
    full_clean, render_bootstrap_field, render_bootstrap_form, CleanFn, CleanHook, Form,
    FormBuilder, FormFieldDef, Validation,
};
