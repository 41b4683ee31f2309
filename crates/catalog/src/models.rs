//! Catalog records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Directory, relative to the media root, where product images are stored.
pub const PRODUCT_UPLOAD_DIR: &str = "products";

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// Creates a new category.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }
}

/// A catalog item.
///
/// `id` is zero until the record has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Stored image path, relative to the media root.
    pub image: Option<String>,
    pub category: Option<i64>,
    pub price: Decimal,
    pub is_published: bool,
    pub owner: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an unsaved, unpublished product.
    pub fn new(name: impl Into<String>, price: Decimal, owner: Option<i64>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            image: None,
            category: None,
            price,
            is_published: false,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the record has been stored.
    pub const fn is_saved(&self) -> bool {
        self.id != 0
    }

    /// Storage path for an uploaded image.
    ///
    /// Only the final component of the client's file name is kept.
    pub fn image_path(file_name: &str) -> String {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name);
        format!("{PRODUCT_UPLOAD_DIR}/{base}")
    }
}
