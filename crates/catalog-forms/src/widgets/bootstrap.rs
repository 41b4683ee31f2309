//! Bootstrap 5 form widgets.

use super::{html_escape, merge_classes, Widget, WidgetAttrs};
use crate::fields::is_checked;

fn widget_id(name: &str, attrs: &WidgetAttrs) -> String {
    attrs
        .get("id")
        .cloned()
        .unwrap_or_else(|| format!("id_{name}"))
}

/// Bootstrap 5 text input widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type (text, number, etc.).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl BootstrapTextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self {
            input_type: "number".to_string(),
            ..Default::default()
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .filter(|_| attrs.get("placeholder").is_none())
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        let id = widget_id(name, attrs);
        let class = merge_classes("form-control", attrs.get("class").map(String::as_str));
        let extra_attrs = attrs.extra_html();

        format!(
            r#"<input type="{}" class="{class}" id="{id}" name="{name}"{value_attr}{placeholder_attr}{extra_attrs}>"#,
            self.input_type
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 textarea widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self { rows: 4 }
    }
}

impl BootstrapTextarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        let id = widget_id(name, attrs);
        let class = merge_classes("form-control", attrs.get("class").map(String::as_str));
        let extra_attrs = attrs.extra_html();

        format!(
            r#"<textarea class="{class}" id="{id}" name="{name}" rows="{}"{extra_attrs}>{content}</textarea>"#,
            self.rows
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Available choices (value, label).
    pub choices: Vec<(String, String)>,
    /// Whether to include an empty option.
    pub include_blank: bool,
    /// Label for blank option.
    pub blank_label: String,
}

impl Default for BootstrapSelect {
    fn default() -> Self {
        Self {
            choices: Vec::new(),
            include_blank: true,
            blank_label: "---------".to_string(),
        }
    }
}

impl BootstrapSelect {
    /// Creates a new select with the given choices.
    pub fn new(choices: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            choices: choices
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Disables the blank option.
    #[must_use]
    pub fn no_blank(mut self) -> Self {
        self.include_blank = false;
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let id = widget_id(name, attrs);
        let class = merge_classes("form-select", attrs.get("class").map(String::as_str));
        let extra_attrs = attrs.extra_html();

        let mut options = String::new();

        if self.include_blank {
            options.push_str(&format!(
                r#"<option value="">{}</option>"#,
                html_escape(&self.blank_label)
            ));
        }

        for (opt_value, label) in &self.choices {
            let selected = value.is_some_and(|v| v == opt_value);
            let selected_attr = if selected { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(opt_value),
                html_escape(label)
            ));
        }

        format!(r#"<select class="{class}" id="{id}" name="{name}"{extra_attrs}>{options}</select>"#)
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Bootstrap 5 checkbox widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckbox {
    /// Label for the checkbox.
    pub label: Option<String>,
}

impl BootstrapCheckbox {
    /// Creates a new checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Widget for BootstrapCheckbox {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let id = widget_id(name, attrs);
        let checked = value.is_some_and(is_checked);
        let checked_attr = if checked { " checked" } else { "" };
        let class = merge_classes("form-check-input", attrs.get("class").map(String::as_str));
        let extra_attrs = attrs.extra_html();

        let label_html = self
            .label
            .as_ref()
            .map(|l| {
                format!(
                    r#"<label class="form-check-label" for="{}">{}</label>"#,
                    id,
                    html_escape(l)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<div class="form-check">
  <input class="{class}" type="checkbox" id="{id}" name="{name}" value="true"{checked_attr}{extra_attrs}>
  {label_html}
</div>"#
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// File upload widget.
///
/// Never re-renders a submitted value: browsers cannot prefill file inputs.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    /// Extensions offered by the browser's file picker.
    pub accept: Vec<String>,
}

impl FileInput {
    /// Creates a new file input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the file picker to the given extensions.
    #[must_use]
    pub fn accept<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.accept = extensions
            .iter()
            .map(|ext| format!(".{}", ext.as_ref().trim_start_matches('.')))
            .collect();
        self
    }
}

impl Widget for FileInput {
    fn render(&self, name: &str, _value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let id = widget_id(name, attrs);
        let class = merge_classes("form-control", attrs.get("class").map(String::as_str));
        let accept_attr = if self.accept.is_empty() {
            String::new()
        } else {
            format!(r#" accept="{}""#, html_escape(&self.accept.join(",")))
        };
        let extra_attrs = attrs.extra_html();

        format!(
            r#"<input type="file" class="{class}" id="{id}" name="{name}"{accept_attr}{extra_attrs}>"#
        )
    }

    fn input_type(&self) -> &str {
        "file"
    }

    fn needs_multipart(&self) -> bool {
        true
    }
}
