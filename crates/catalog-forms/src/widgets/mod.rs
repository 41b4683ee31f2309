//! Form widgets for rendering HTML inputs.

mod bootstrap;

pub use bootstrap::{
    BootstrapCheckbox, BootstrapSelect, BootstrapTextInput, BootstrapTextarea, FileInput,
};

use std::collections::BTreeMap;

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self {
            attrs: BTreeMap::new(),
        }
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Copies every attribute of `other` over this one.
    pub fn extend(&mut self, other: &Self) {
        for (key, value) in &other.attrs {
            self.set(key, value);
        }
    }

    /// Renders every attribute except `class` and `id`, each with a leading space.
    fn extra_html(&self) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| k.as_str() != "class" && k.as_str() != "id")
            .map(|(k, v)| format!(r#" {k}="{}""#, html_escape(v)))
            .collect()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Static presentation metadata for one field.
///
/// Forms declare a `&[(&str, Presentation)]` table; it is turned into widget
/// attributes once, when the field definitions are built. None of it takes
/// part in validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    /// CSS classes added to the input.
    pub class: &'static str,
    /// Placeholder text.
    pub placeholder: Option<&'static str>,
    /// Whether the browser should require a value.
    pub required: bool,
    /// Step for numeric inputs.
    pub step: Option<&'static str>,
}

impl Presentation {
    /// Creates presentation metadata with the given CSS classes.
    pub const fn class(class: &'static str) -> Self {
        Self {
            class,
            placeholder: None,
            required: false,
            step: None,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub const fn placeholder(self, placeholder: &'static str) -> Self {
        Self {
            placeholder: Some(placeholder),
            ..self
        }
    }

    /// Asks the browser to require a value.
    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Sets the step of a numeric input.
    #[must_use]
    pub const fn step(self, step: &'static str) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Converts the metadata into widget attributes.
    pub fn to_attrs(&self) -> WidgetAttrs {
        let mut attrs = WidgetAttrs::new();
        if !self.class.is_empty() {
            attrs.set("class", self.class);
        }
        if let Some(placeholder) = self.placeholder {
            attrs.set("placeholder", placeholder);
        }
        if self.required {
            attrs.set("required", "required");
        }
        if let Some(step) = self.step {
            attrs.set("step", step);
        }
        attrs
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }

    /// Whether the form must be submitted as `multipart/form-data`.
    fn needs_multipart(&self) -> bool {
        false
    }
}

/// Joins a widget's base classes with extra ones, skipping duplicates.
pub fn merge_classes(base: &str, extra: Option<&str>) -> String {
    let mut classes: Vec<&str> = base.split_whitespace().collect();
    for class in extra.unwrap_or_default().split_whitespace() {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes.join(" ")
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("class", "form-control")
            .with("id", "id_price")
            .with("step", "0.01");
        assert_eq!(attrs.extra_html(), r#" step="0.01""#);
    }

    #[test]
    fn test_widget_attrs_escapes_values() {
        let attrs = WidgetAttrs::new().with("placeholder", r#"say "hi""#);
        assert_eq!(attrs.extra_html(), r#" placeholder="say &quot;hi&quot;""#);
    }

    #[test]
    fn test_presentation_to_attrs() {
        const PRICE: Presentation = Presentation::class("form-control mb-3 mt-1")
            .placeholder("Укажите цену")
            .required()
            .step("0.01");

        let attrs = PRICE.to_attrs();
        assert_eq!(attrs.get("class").map(String::as_str), Some("form-control mb-3 mt-1"));
        assert_eq!(attrs.get("placeholder").map(String::as_str), Some("Укажите цену"));
        assert_eq!(attrs.get("required").map(String::as_str), Some("required"));
        assert_eq!(attrs.get("step").map(String::as_str), Some("0.01"));
    }

    #[test]
    fn test_presentation_class_only() {
        let attrs = Presentation::class("form-check-input").to_attrs();
        assert_eq!(attrs.attrs.len(), 1);
    }

    #[test]
    fn test_merge_classes() {
        assert_eq!(
            merge_classes("form-control", Some("form-control mb-3 mt-1")),
            "form-control mb-3 mt-1"
        );
        assert_eq!(merge_classes("form-select", None), "form-select");
        assert_eq!(merge_classes("a b", Some("c  a")), "a b c");
    }
}
