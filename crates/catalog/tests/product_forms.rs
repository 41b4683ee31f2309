//! End-to-end validation of the product forms.

use std::sync::Arc;

use catalog::forms::{IMAGE_EXTENSION_MESSAGE, NEGATIVE_PRICE_MESSAGE};
use catalog::{CatalogSettings, Category, Product, ProductForm, ProductModeratorForm};
use catalog_forms::{FieldValue, Form, FormData, UploadedFile, ValidationErrors};
use proptest::prelude::*;
use rust_decimal::Decimal;

const MB: u64 = 1024 * 1024;

fn settings() -> Arc<CatalogSettings> {
    Arc::new(
        CatalogSettings::new(
            &["jpg", "jpeg", "png"],
            &["spam", "казино", "обман"],
            5 * MB,
        )
        .unwrap(),
    )
}

fn categories() -> Vec<Category> {
    vec![Category::new(1, "Кухня"), Category::new(2, "Сад")]
}

fn form() -> ProductForm {
    ProductForm::new(settings(), &categories())
}

fn valid_data() -> FormData {
    FormData::new()
        .value("name", "Cheap offer")
        .value("description", "great item")
        .value("price", "19.99")
}

fn banned_message(location: &str) -> String {
    format!(
        "В {location} содержится запрещенное слово. Список запрещенных слов: spam, казино, обман"
    )
}

fn only_error(errors: &ValidationErrors, field: &str) -> Vec<String> {
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec![field],
        "unexpected errors: {errors}"
    );
    errors.get(field).cloned().unwrap_or_default()
}

#[test]
fn test_valid_submission_without_image() {
    let validation = form().validate(&valid_data());
    assert!(validation.is_valid(), "{}", validation.errors);

    let cleaned = validation.into_result().unwrap();
    assert_eq!(cleaned.text("name"), Some("Cheap offer"));
    assert_eq!(cleaned.text("description"), Some("great item"));
    assert_eq!(cleaned.decimal("price"), Some(Decimal::new(1999, 2)));
    assert_eq!(cleaned.get("image"), Some(&FieldValue::Empty));
    assert_eq!(cleaned.get("category"), Some(&FieldValue::Empty));
    assert_eq!(cleaned.boolean("is_published"), Some(false));
}

#[test]
fn test_banned_word_in_name() {
    let data = valid_data().value("name", "Best SPAM deal");
    let validation = form().validate(&data);

    assert_eq!(
        only_error(&validation.errors, "name"),
        vec![banned_message("названии")]
    );
    // the other fields are still cleaned
    assert_eq!(validation.cleaned.decimal("price"), Some(Decimal::new(1999, 2)));
    assert_eq!(validation.cleaned.text("description"), Some("great item"));
}

#[test]
fn test_banned_word_in_description() {
    let data = valid_data().value("description", "Это не обман");
    let validation = form().validate(&data);

    assert_eq!(
        only_error(&validation.errors, "description"),
        vec![banned_message("описании")]
    );
    assert_eq!(validation.cleaned.text("name"), Some("Cheap offer"));
}

#[test]
fn test_negative_price() {
    let data = valid_data().value("price", "-5");
    let validation = form().validate(&data);

    assert_eq!(
        only_error(&validation.errors, "price"),
        vec![NEGATIVE_PRICE_MESSAGE.to_string()]
    );
    assert_eq!(NEGATIVE_PRICE_MESSAGE, "Цена не может быть отрицательной!");
}

#[test]
fn test_zero_price_passes() {
    let data = valid_data().value("price", "0");
    let cleaned = form().validate(&data).into_result().unwrap();
    assert_eq!(cleaned.decimal("price"), Some(Decimal::ZERO));
}

#[test]
fn test_oversize_image() {
    let data = valid_data().file("image", UploadedFile::new("kettle.png", 6 * MB));
    let validation = form().validate(&data);

    assert_eq!(
        only_error(&validation.errors, "image"),
        vec!["Размер файла не может превышать 5МВ.".to_string()]
    );
}

#[test]
fn test_image_at_limit_passes() {
    let image = UploadedFile::new("kettle.JPG", 5 * MB).content_type("image/jpeg");
    let data = valid_data().file("image", image.clone());
    let cleaned = form().validate(&data).into_result().unwrap();
    assert_eq!(cleaned.file("image"), Some(&image));
}

#[test]
fn test_disallowed_extension() {
    let data = valid_data().file("image", UploadedFile::new("kettle.gif", 1024));
    let validation = form().validate(&data);

    assert_eq!(
        only_error(&validation.errors, "image"),
        vec![IMAGE_EXTENSION_MESSAGE.to_string()]
    );
}

#[test]
fn test_extension_checked_before_size() {
    let data = valid_data().file("image", UploadedFile::new("kettle.bmp", 6 * MB));
    let validation = form().validate(&data);

    assert_eq!(
        only_error(&validation.errors, "image"),
        vec![IMAGE_EXTENSION_MESSAGE.to_string()]
    );
}

#[test]
fn test_one_error_per_invalid_field() {
    let data = FormData::new()
        .value("name", "казино")
        .value("description", "spam")
        .value("price", "-1")
        .value("is_published", "on")
        .file("image", UploadedFile::new("kettle.png", 6 * MB));
    let validation = form().validate(&data);

    assert_eq!(
        validation.errors.fields().collect::<Vec<_>>(),
        vec!["description", "image", "name", "price"]
    );
    assert!(validation
        .errors
        .all_errors()
        .iter()
        .all(|(field, _)| validation.errors.get(field).map(Vec::len) == Some(1)));
    assert_eq!(validation.cleaned.boolean("is_published"), Some(true));
}

#[test]
fn test_required_fields() {
    let validation = form().validate(&FormData::new());

    assert_eq!(
        validation.errors.fields().collect::<Vec<_>>(),
        vec!["name", "price"]
    );
    assert_eq!(
        validation.errors.get("name"),
        Some(&vec!["This field is required.".to_string()])
    );
}

#[test]
fn test_category_choice() {
    let data = valid_data().value("category", "2");
    let cleaned = form().validate(&data).into_result().unwrap();
    assert_eq!(cleaned.choice("category"), Some(2));

    let data = valid_data().value("category", "99");
    let validation = form().validate(&data);
    assert_eq!(only_error(&validation.errors, "category").len(), 1);
}

#[test]
fn test_name_too_long() {
    let data = valid_data().value("name", "я".repeat(151));
    let validation = form().validate(&data);
    assert_eq!(
        only_error(&validation.errors, "name"),
        vec!["Ensure this value has at most 150 characters.".to_string()]
    );
}

#[test]
fn test_excluded_fields_are_ignored() {
    let data = valid_data()
        .value("owner", "13")
        .value("created_at", "2020-01-01T00:00:00Z");
    let cleaned = form().validate(&data).into_result().unwrap();

    assert!(!cleaned.contains("owner"));
    assert!(!cleaned.contains("created_at"));

    let mut product = Product::new("Old", Decimal::ONE, Some(7));
    let created_at = product.created_at;
    ProductForm::apply(&cleaned, &mut product);
    assert_eq!(product.owner, Some(7));
    assert_eq!(product.created_at, created_at);
    assert_eq!(product.name, "Cheap offer");
}

#[test]
fn test_apply_keeps_image_when_none_uploaded() {
    let mut product = Product::new("Old", Decimal::ONE, None);
    product.image = Some("products/old.png".to_string());

    let cleaned = form().validate(&valid_data()).into_result().unwrap();
    ProductForm::apply(&cleaned, &mut product);
    assert_eq!(product.image.as_deref(), Some("products/old.png"));

    let data = valid_data().file("image", UploadedFile::new("new.png", 100));
    let cleaned = form().validate(&data).into_result().unwrap();
    ProductForm::apply(&cleaned, &mut product);
    assert_eq!(product.image.as_deref(), Some("products/new.png"));
}

#[test]
fn test_build_product() {
    let data = valid_data().value("category", "1").value("is_published", "true");
    let cleaned = form().validate(&data).into_result().unwrap();
    let product = ProductForm::build_product(&cleaned, Some(5));

    assert!(!product.is_saved());
    assert_eq!(product.name, "Cheap offer");
    assert_eq!(product.category, Some(1));
    assert_eq!(product.price, Decimal::new(1999, 2));
    assert!(product.is_published);
    assert_eq!(product.owner, Some(5));
}

#[test]
fn test_urlencoded_submission() {
    let data = FormData::from_urlencoded("name=Cheap+offer&description=great+item&price=19.99")
        .unwrap();
    assert!(form().validate(&data).is_valid());
}

#[test]
fn test_render_bound_form() {
    let data = valid_data().value("price", "-5");
    let form = form();
    let validation = form.validate(&data);
    let html = form.as_bootstrap(Some(&data), &validation.errors, "/products/create/");

    assert!(html.contains("multipart/form-data"));
    assert!(html.contains("Введите название товара"));
    assert!(html.contains(r#"step="0.01""#));
    assert!(html.contains("form-select mb-5 my-1"));
    assert!(html.contains("Цена не может быть отрицательной!"));
    assert!(html.contains("is-invalid"));
    assert!(html.contains("Cheap offer"));
}

#[test]
fn test_render_edit_form() {
    let mut product = Product::new("Чайник", Decimal::new(2500, 2), None);
    product.category = Some(2);
    let form = ProductForm::for_instance(settings(), &categories(), &product);
    let html = form.as_bootstrap(None, &ValidationErrors::new(), "/products/1/update/");

    assert!(html.contains("Чайник"));
    assert!(html.contains(r#"value="25.00""#));
    assert!(html.contains(r#"value="2" selected"#));
}

#[test]
fn test_render_edit_form_after_unticking() {
    let mut product = Product::new("Чайник", Decimal::new(2500, 2), None);
    product.is_published = true;
    let form = ProductForm::for_instance(settings(), &categories(), &product);

    // the browser leaves out an unticked checkbox
    let data = valid_data().value("name", "казино");
    let validation = form.validate(&data);
    assert_eq!(validation.cleaned.boolean("is_published"), Some(false));

    let html = form.as_bootstrap(Some(&data), &validation.errors, "/products/1/update/");
    assert!(!html.contains(" checked"));
    assert!(html.contains(r#"value="19.99""#));
    assert!(!html.contains("Чайник"));
}

#[test]
fn test_hidden_file_name_has_no_extension() {
    for name in [".png", "photo.", "png"] {
        let data = valid_data().file("image", UploadedFile::new(name, 10));
        let validation = form().validate(&data);
        assert_eq!(
            only_error(&validation.errors, "image"),
            vec![IMAGE_EXTENSION_MESSAGE.to_string()],
            "{name}"
        );
    }
}

#[test]
fn test_moderator_publishes() {
    let data = FormData::new().value("is_published", "True");
    let validation = ProductModeratorForm::new().validate(&data);
    let cleaned = validation.into_result().unwrap();
    assert_eq!(cleaned.len(), 1);

    let mut product = Product::new("Чайник", Decimal::new(1999, 2), Some(3));
    product.description = "Медный".to_string();
    let before = product.clone();

    ProductModeratorForm::apply(&cleaned, &mut product);
    assert!(product.is_published);
    assert_eq!(
        Product {
            is_published: false,
            ..product
        },
        before
    );
}

#[test]
fn test_moderator_ignores_other_fields() {
    let data = FormData::new()
        .value("is_published", "on")
        .value("name", "казино")
        .value("price", "-100");
    let cleaned = ProductModeratorForm::new()
        .validate(&data)
        .into_result()
        .unwrap();

    let mut product = Product::new("Чайник", Decimal::ONE, None);
    ProductModeratorForm::apply(&cleaned, &mut product);
    assert_eq!(product.name, "Чайник");
    assert_eq!(product.price, Decimal::ONE);
    assert!(product.is_published);
}

proptest! {
    #[test]
    fn prop_negative_prices_fail(cents in -99_999_999i64..=-1) {
        let price = Decimal::new(cents, 2).to_string();
        let validation = form().validate(&valid_data().value("price", price));
        prop_assert_eq!(
            validation.errors.get("price"),
            Some(&vec![NEGATIVE_PRICE_MESSAGE.to_string()])
        );
    }

    #[test]
    fn prop_non_negative_prices_pass(cents in 0i64..=99_999_999) {
        let price = Decimal::new(cents, 2);
        let validation = form().validate(&valid_data().value("price", price.to_string()));
        prop_assert!(validation.is_valid(), "{}", validation.errors);
        prop_assert_eq!(validation.cleaned.decimal("price"), Some(price));
    }

    #[test]
    fn prop_banned_word_any_case(
        prefix in "[a-z ]{0,10}",
        word in prop::sample::select(vec!["spam", "казино", "обман"]),
        upper in prop::collection::vec(any::<bool>(), 6),
    ) {
        let cased: String = word
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, up)| if *up { c.to_uppercase().next().unwrap_or(c) } else { c })
            .collect();
        let name = format!("{prefix}{cased}");
        let validation = form().validate(&valid_data().value("name", name));
        prop_assert_eq!(
            validation.errors.get("name"),
            Some(&vec![banned_message("названии")])
        );
    }

    #[test]
    fn prop_clean_text_passes(name in "[b-df-hj-np-tv-z]{1,40}") {
        // consonants only, so none of the banned words can appear
        let validation = form().validate(&valid_data().value("name", name));
        prop_assert!(validation.is_valid(), "{}", validation.errors);
    }

    #[test]
    fn prop_image_size_limit(size in 1u64..=10 * MB) {
        let data = valid_data().file("image", UploadedFile::new("photo.png", size));
        let validation = form().validate(&data);
        prop_assert_eq!(validation.is_valid(), size <= 5 * MB);
    }

    #[test]
    fn prop_bad_extension_fails_regardless_of_size(
        size in 1u64..=10 * MB,
        ext in prop::sample::select(vec!["gif", "bmp", "webp", "exe", "tiff"]),
    ) {
        let data = valid_data().file("image", UploadedFile::new(format!("photo.{ext}"), size));
        let validation = form().validate(&data);
        prop_assert_eq!(
            validation.errors.get("image"),
            Some(&vec![IMAGE_EXTENSION_MESSAGE.to_string()])
        );
    }
}
