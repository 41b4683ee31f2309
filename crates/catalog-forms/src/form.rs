//! Form trait, the validation pipeline and form rendering.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};
use tracing::{debug, info};

use crate::data::{CleanedData, FieldValue, FormData, UploadedFile};
use crate::error::ValidationErrors;
use crate::fields::{is_checked, FieldKind, EMPTY_FILE_MESSAGE, NO_FILE_MESSAGE, REQUIRED_MESSAGE};
use crate::validation::Validator;
use crate::widgets::{Presentation, Widget, WidgetAttrs};

/// Definition of a form field.
pub struct FormFieldDef {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// How the submitted value is coerced.
    pub kind: FieldKind,
    /// Whether the field is required.
    pub required: bool,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Help text.
    pub help_text: Option<String>,
    /// Initial value.
    pub initial: Option<String>,
    /// Validators.
    pub validators: Vec<Box<dyn Validator>>,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
    /// Whether the field is disabled.
    pub disabled: bool,
}

impl std::fmt::Debug for FormFieldDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormFieldDef")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("help_text", &self.help_text)
            .field("initial", &self.initial)
            .field("attrs", &self.attrs)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl FormFieldDef {
    /// Creates a new text field definition.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Text,
            required: false,
            widget: Box::new(widget),
            help_text: None,
            initial: None,
            validators: Vec::new(),
            attrs: WidgetAttrs::new(),
            disabled: false,
        }
    }

    /// Sets how the submitted value is coerced.
    #[must_use]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Applies presentation metadata to the widget attributes.
    #[must_use]
    pub fn presentation(mut self, presentation: &Presentation) -> Self {
        self.attrs.extend(&presentation.to_attrs());
        self
    }

    /// Disables the field.
    ///
    /// A disabled field ignores submitted data and cleans its initial value.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn raw_value<'a>(&'a self, data: &'a FormData) -> Option<&'a str> {
        if self.disabled {
            self.initial.as_deref()
        } else {
            data.get(&self.name)
        }
    }

    fn run_validators(&self, value: &str) -> Result<(), String> {
        self.validators
            .iter()
            .try_for_each(|validator| validator.validate(value))
    }

    /// Coerces and validates this field's submitted value.
    ///
    /// The first failing step wins: required check, coercion, then the
    /// field's validators.
    pub fn clean(&self, data: &FormData) -> Result<FieldValue, String> {
        match self.kind {
            FieldKind::File => self.clean_file(data.get_file(&self.name)),
            FieldKind::Boolean => {
                let checked = self.raw_value(data).is_some_and(is_checked);
                if self.required && !checked {
                    return Err(REQUIRED_MESSAGE.to_string());
                }
                Ok(FieldValue::Bool(checked))
            }
            _ => {
                let raw = self.raw_value(data).map(str::trim).unwrap_or_default();
                if raw.is_empty() {
                    if self.required {
                        self.run_validators(raw)?;
                        return Err(REQUIRED_MESSAGE.to_string());
                    }
                    return Ok(self.kind.empty_value());
                }
                let value = self.kind.coerce(raw)?;
                self.run_validators(raw)?;
                Ok(value)
            }
        }
    }

    fn clean_file(&self, file: Option<&UploadedFile>) -> Result<FieldValue, String> {
        let Some(file) = file else {
            if self.required {
                self.run_validators("")?;
                return Err(REQUIRED_MESSAGE.to_string());
            }
            return Ok(FieldValue::Empty);
        };

        if file.name.is_empty() {
            return Err(NO_FILE_MESSAGE.to_string());
        }
        if file.size == 0 {
            return Err(EMPTY_FILE_MESSAGE.to_string());
        }
        debug!(
            field = %self.name,
            extension = ?file.extension(),
            size = file.size,
            "Cleaning upload"
        );
        self.run_validators(&file.name)?;

        Ok(FieldValue::File(file.clone()))
    }
}

/// A custom clean hook for a single field.
///
/// Hooks run after the field's own cleaning succeeded and receive the form's
/// context (settings, lookups) plus the cleaned value. They may return a
/// transformed value.
pub type CleanFn<C> = fn(&C, FieldValue) -> Result<FieldValue, String>;

/// An entry of a form's clean-hook table.
pub type CleanHook<C> = (&'static str, CleanFn<C>);

/// Outcome of validating one submission.
///
/// Valid fields keep their cleaned value even when other fields fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Values of the fields that passed.
    pub cleaned: CleanedData,
    /// Messages of the fields that failed.
    pub errors: ValidationErrors,
}

impl Validation {
    /// Returns whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into the cleaned data, or the errors if any field failed.
    pub fn into_result(self) -> Result<CleanedData, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.cleaned)
        } else {
            Err(self.errors)
        }
    }
}

/// Validates every field in declaration order.
///
/// Each field is cleaned on its own; when that succeeds and `hooks` has an
/// entry for the field, the hook runs on the cleaned value. A failure in one
/// field never stops the others.
pub fn full_clean<C>(
    fields: &[FormFieldDef],
    hooks: &[CleanHook<C>],
    ctx: &C,
    data: &FormData,
) -> Validation {
    let mut validation = Validation::default();

    for field in fields {
        let hook = hooks
            .iter()
            .find(|(name, _)| *name == field.name)
            .map(|(_, hook)| *hook);

        let result = field.clean(data).and_then(|value| match hook {
            Some(hook) => hook(ctx, value),
            None => Ok(value),
        });

        match result {
            Ok(value) => validation.cleaned.insert(field.name.as_str(), value),
            Err(message) => {
                debug!(field = %field.name, message = %message, "Field failed validation");
                validation.errors.add(&field.name, message);
            }
        }
    }

    info!(
        fields = fields.len(),
        invalid = validation.errors.len(),
        "Validated form submission"
    );

    validation
}

/// Trait for form types.
pub trait Form {
    /// Returns the field definitions for this form.
    fn fields(&self) -> &[FormFieldDef];

    /// Validates submitted data.
    fn validate(&self, data: &FormData) -> Validation;

    /// Renders the form as Bootstrap 5 HTML.
    ///
    /// Submitted values are re-rendered when `data` is given; otherwise the
    /// fields' initial values are shown.
    fn as_bootstrap(
        &self,
        data: Option<&FormData>,
        errors: &ValidationErrors,
        action: &str,
    ) -> String {
        render_bootstrap_form(
            self.fields(),
            data.map(FormData::values),
            errors,
            action,
            "POST",
        )
    }
}

/// Renders a form field with Bootstrap 5 styling.
///
/// `value` is shown as is; resolving it against submitted data or the
/// field's initial value is the caller's job.
pub fn render_bootstrap_field(
    field: &FormFieldDef,
    value: Option<&str>,
    errors: &[String],
) -> String {
    let id = format!("id_{}", field.name);
    let has_errors = !errors.is_empty();

    let required_marker = if field.required { " *" } else { "" };
    let label_text = format!("{}{}", field.label, required_marker);

    // Prepare widget attrs
    let mut attrs = field.attrs.clone();
    attrs.set("id", &id);

    if has_errors {
        let current_class = attrs.get("class").cloned().unwrap_or_default();
        attrs.set("class", format!("{current_class} is-invalid").trim());
    }

    if field.disabled {
        attrs.set("disabled", "disabled");
    }

    if field.required {
        attrs.set("required", "required");
    }

    let widget_html = field.widget.render(&field.name, value, &attrs);

    let label_el = html! {
        label.for_(#id).class("form-label") { #label_text }
    };

    let help_text = field.help_text.clone();

    html! { div.class("mb-3") }
        .raw(label_el.render())
        .raw(&widget_html)
        .children(errors, |error, div: Element<Div>| {
            div.class("invalid-feedback").text(error)
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Renders a complete form with Bootstrap 5 styling.
///
/// A bound form (`values` is `Some`) shows exactly what was submitted: a
/// missing value renders empty, or unchecked for a checkbox. An unbound form
/// shows the initial values. Disabled fields always show their initial value.
pub fn render_bootstrap_form(
    fields: &[FormFieldDef],
    values: Option<&HashMap<String, String>>,
    errors: &ValidationErrors,
    action: &str,
    method: &str,
) -> String {
    let mut form = html! {
        form.action(#action).method(#method)
    };

    if fields.iter().any(|field| field.widget.needs_multipart()) {
        form = form.attr("enctype", "multipart/form-data");
    }

    // Non-field errors
    if let Some(form_errors) = errors.get("__all__") {
        form = form.child::<Div, _>(|d| {
            d.class("alert alert-danger")
                .attr("role", "alert")
                .child::<Ul, _>(|ul| {
                    ul.class("mb-0")
                        .children(form_errors.iter(), |e, li: Element<Li>| li.text(e))
                })
        });
    }

    // Render each field inside a wrapper div
    for field in fields {
        let value = match values {
            Some(values) if !field.disabled => values.get(&field.name).map(String::as_str),
            _ => field.initial.as_deref(),
        };
        let field_errors = errors.get(&field.name).cloned().unwrap_or_default();
        let field_html = render_bootstrap_field(field, value, &field_errors);
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }

    // Submit button
    form = form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                "Submit"
            }
        };
        d.raw(btn.render())
    });

    form.render()
}

/// A simple form builder for creating forms programmatically.
#[derive(Debug, Default)]
pub struct FormBuilder {
    fields: Vec<FormFieldDef>,
}

impl FormBuilder {
    /// Creates a new form builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, field: FormFieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the field definitions.
    pub fn build(self) -> Vec<FormFieldDef> {
        self.fields
    }
}
