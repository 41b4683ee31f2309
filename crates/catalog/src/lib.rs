//! # catalog
//!
//! Product catalog records, validation settings and the forms used to edit
//! products.
//!
//! This crate provides:
//! - `Product` and `Category` records
//! - `CatalogSettings`, loaded from `catalog.toml` and `CATALOG_*` variables
//! - `ProductForm` for creating and editing products
//! - `ProductModeratorForm` for toggling publication
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use catalog::{CatalogSettings, Category, ProductForm};
//! use catalog_forms::{Form, FormData};
//!
//! let settings = Arc::new(
//!     CatalogSettings::new(&["jpg", "jpeg", "png"], &["spam"], 5 * 1024 * 1024).unwrap(),
//! );
//! let form = ProductForm::new(settings, &[Category::new(1, "Kitchen")]);
//!
//! let data = FormData::new()
//!     .value("name", "Cheap offer")
//!     .value("description", "great item")
//!     .value("price", "19.99");
//!
//! let cleaned = form.validate(&data).into_result().unwrap();
//! let product = ProductForm::build_product(&cleaned, Some(42));
//! assert_eq!(product.price.to_string(), "19.99");
//! assert_eq!(product.owner, Some(42));
//! ```

mod error;
pub mod forms;
mod models;
mod settings;

pub use error::{CatalogError, Result};
pub use forms::{ProductForm, ProductModeratorForm};
pub use models::{Category, Product, PRODUCT_UPLOAD_DIR};
pub use settings::{CatalogSettings, SettingsConfig, ENV_PREFIX, SETTINGS_FILE};
