//! Create/edit form for products.

use std::sync::Arc;

use catalog_forms::fields::{boolean_field, char_field, choice_field, decimal_field, image_field, text_field};
use catalog_forms::widgets::Presentation;
use catalog_forms::{full_clean, CleanHook, CleanedData, FieldValue, Form, FormData, FormFieldDef, Validation};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{presentation_for, EXCLUDED_FIELDS};
use crate::models::{Category, Product};
use crate::settings::CatalogSettings;

/// Maximum length of a product name.
pub const NAME_MAX_LENGTH: usize = 150;
/// Maximum number of digits of a price.
pub const PRICE_MAX_DIGITS: u32 = 10;
/// Digits after the decimal point of a price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Message for an image with a disallowed extension.
pub const IMAGE_EXTENSION_MESSAGE: &str = "Выберите файл в формате jpeg или png";
/// Message for a negative price.
pub const NEGATIVE_PRICE_MESSAGE: &str = "Цена не может быть отрицательной!";

const PRESENTATION: &[(&str, Presentation)] = &[
    (
        "name",
        Presentation::class("form-control mb-3 mt-1")
            .placeholder("Введите название товара")
            .required(),
    ),
    (
        "description",
        Presentation::class("form-control mb-3 mt-1").placeholder("Добавьте описание товара"),
    ),
    (
        "image",
        Presentation::class("form-control mb-5 mt-1").placeholder("Загрузите изображение товара"),
    ),
    ("category", Presentation::class("form-select mb-5 my-1")),
    (
        "price",
        Presentation::class("form-control mb-3 mt-1")
            .placeholder("Укажите цену товара с копейками")
            .required()
            .step("0.01"),
    ),
    ("is_published", Presentation::class("form-check-input")),
];

const HOOKS: &[CleanHook<CatalogSettings>] = &[
    ("name", clean_name),
    ("description", clean_description),
    ("price", clean_price),
    ("image", clean_image),
];

fn banned_word_check(
    settings: &CatalogSettings,
    value: FieldValue,
    location: &str,
) -> Result<FieldValue, String> {
    let text = value.as_text().unwrap_or_default();
    let banned = settings.banned_words();
    if banned.is_match(text) {
        debug!(location, found = ?banned.matches(text), "Banned word found");
        return Err(format!(
            "В {location} содержится запрещенное слово. Список запрещенных слов: {}",
            banned.joined()
        ));
    }
    Ok(value)
}

fn clean_name(settings: &CatalogSettings, value: FieldValue) -> Result<FieldValue, String> {
    banned_word_check(settings, value, "названии")
}

fn clean_description(settings: &CatalogSettings, value: FieldValue) -> Result<FieldValue, String> {
    banned_word_check(settings, value, "описании")
}

fn clean_price(_: &CatalogSettings, value: FieldValue) -> Result<FieldValue, String> {
    match value.as_decimal() {
        Some(price) if price < Decimal::ZERO => Err(NEGATIVE_PRICE_MESSAGE.to_string()),
        _ => Ok(value),
    }
}

fn clean_image(settings: &CatalogSettings, value: FieldValue) -> Result<FieldValue, String> {
    match value.as_file() {
        Some(file) if file.size > settings.max_upload_size() => Err(format!(
            "Размер файла не может превышать {}.",
            settings.max_upload_size_label()
        )),
        _ => Ok(value),
    }
}

/// Form for creating or editing a product.
///
/// Exposes every product field except the owner and the timestamps.
#[derive(Debug)]
pub struct ProductForm {
    settings: Arc<CatalogSettings>,
    fields: Vec<FormFieldDef>,
}

impl ProductForm {
    /// Creates an empty form offering the given categories.
    pub fn new(settings: Arc<CatalogSettings>, categories: &[Category]) -> Self {
        let choices = categories
            .iter()
            .map(|category| (category.id, category.name.clone()))
            .collect();

        let fields = vec![
            char_field("name", "Название", NAME_MAX_LENGTH, true),
            text_field("description", "Описание", 4, false),
            image_field(
                "image",
                "Изображение",
                settings.allowed_extensions(),
                IMAGE_EXTENSION_MESSAGE,
                false,
            ),
            choice_field("category", "Категория", choices, false),
            decimal_field("price", "Цена", PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES, true),
            boolean_field("is_published", "Опубликовано"),
        ]
        .into_iter()
        .map(|field| match presentation_for(PRESENTATION, &field.name) {
            Some(presentation) => field.presentation(presentation),
            None => field,
        })
        .collect();

        Self { settings, fields }
    }

    /// Creates a form pre-filled with an existing product's values.
    pub fn for_instance(
        settings: Arc<CatalogSettings>,
        categories: &[Category],
        product: &Product,
    ) -> Self {
        let mut form = Self::new(settings, categories);
        for field in &mut form.fields {
            let initial = match field.name.as_str() {
                "name" => Some(product.name.clone()),
                "description" => Some(product.description.clone()),
                "category" => product.category.map(|id| id.to_string()),
                "price" => Some(product.price.to_string()),
                "is_published" => Some(product.is_published.to_string()),
                _ => None,
            };
            field.initial = initial;
        }
        form
    }

    /// Copies cleaned values onto a product.
    ///
    /// An empty image keeps the stored one. Owner and timestamps are never
    /// touched.
    pub fn apply(cleaned: &CleanedData, product: &mut Product) {
        if let Some(name) = cleaned.text("name") {
            product.name = name.to_string();
        }
        if let Some(description) = cleaned.text("description") {
            product.description = description.to_string();
        }
        if let Some(file) = cleaned.file("image") {
            product.image = Some(Product::image_path(&file.name));
        }
        if let Some(category) = cleaned.get("category") {
            product.category = category.as_choice();
        }
        if let Some(price) = cleaned.decimal("price") {
            product.price = price;
        }
        if let Some(is_published) = cleaned.boolean("is_published") {
            product.is_published = is_published;
        }
        debug!(product = product.id, "Applied product form");
    }

    /// Creates a new product from cleaned values.
    pub fn build_product(cleaned: &CleanedData, owner: Option<i64>) -> Product {
        let mut product = Product::new(String::new(), Decimal::ZERO, owner);
        Self::apply(cleaned, &mut product);
        product
    }
}

impl Form for ProductForm {
    fn fields(&self) -> &[FormFieldDef] {
        &self.fields
    }

    fn validate(&self, data: &FormData) -> Validation {
        for field in EXCLUDED_FIELDS {
            if data.get(field).is_some() {
                warn!(field, "Ignoring submitted value for a field the form does not expose");
            }
        }
        full_clean(&self.fields, HOOKS, self.settings.as_ref(), data)
    }
}
