//! Submitted form data and cleaned values.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::validation::file_extension;

/// Metadata of a file uploaded with a form.
///
/// The file contents stay with the storage layer; validation only needs the
/// client-side name and the size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// File name as sent by the client.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Content type as sent by the client.
    pub content_type: Option<String>,
}

impl UploadedFile {
    /// Creates a new uploaded file description.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: None,
        }
    }

    /// Sets the content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the lower-cased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }
}

/// Values submitted with a form: text inputs and uploaded files.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a text value.
    #[must_use]
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder method to add an uploaded file.
    #[must_use]
    pub fn file(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
        self.insert_file(key, file);
        self
    }

    /// Inserts a text value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Inserts an uploaded file.
    pub fn insert_file(&mut self, key: impl Into<String>, file: UploadedFile) {
        self.files.insert(key.into(), file);
    }

    /// Returns a text value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns an uploaded file.
    pub fn get_file(&self, key: &str) -> Option<&UploadedFile> {
        self.files.get(key)
    }

    /// Returns all text values, e.g. for re-rendering a bound form.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Parses an `application/x-www-form-urlencoded` body.
    ///
    /// When a key repeats, the last value wins.
    pub fn from_urlencoded(body: &str) -> Result<Self> {
        let mut data = Self::new();
        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            data.insert(urlencoding_decode(key)?, urlencoding_decode(value)?);
        }
        Ok(data)
    }
}

/// Decodes a urlencoded component, treating `+` as a space.
fn urlencoding_decode(s: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(s.len());
    let mut iter = s.bytes();

    while let Some(b) = iter.next() {
        match b {
            b'%' => {
                let hi = iter.next();
                let lo = iter.next();
                let byte = hi
                    .zip(lo)
                    .and_then(|(hi, lo)| {
                        let hex = [hi, lo];
                        std::str::from_utf8(&hex)
                            .ok()
                            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                    })
                    .ok_or_else(|| FormError::ParseError(format!("invalid escape in {s:?}")))?;
                bytes.push(byte);
            }
            b'+' => bytes.push(b' '),
            other => bytes.push(other),
        }
    }

    String::from_utf8(bytes)
        .map_err(|_| FormError::ParseError(format!("invalid UTF-8 in {s:?}")))
}

/// A value after type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// An optional field that was left empty.
    Empty,
    /// Text from a char or text field.
    Text(String),
    /// A decimal number.
    Decimal(Decimal),
    /// A checkbox state.
    Bool(bool),
    /// The key of a selected choice.
    Choice(i64),
    /// An uploaded file.
    File(UploadedFile),
}

impl FieldValue {
    /// Returns whether the value is empty.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the decimal, if this is a decimal value.
    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a checkbox value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the choice key, if this is a choice value.
    pub const fn as_choice(&self) -> Option<i64> {
        match self {
            Self::Choice(key) => Some(*key),
            _ => None,
        }
    }

    /// Returns the uploaded file, if this is a file value.
    pub const fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }
}

/// Field values that passed validation, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CleanedData {
    values: BTreeMap<String, FieldValue>,
}

impl CleanedData {
    /// Creates an empty set of cleaned values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cleaned value.
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    /// Returns a cleaned value.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Returns whether a field has a cleaned value.
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Returns the number of cleaned fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether nothing was cleaned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a cleaned text value.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Returns a cleaned decimal value.
    pub fn decimal(&self, field: &str) -> Option<Decimal> {
        self.get(field).and_then(FieldValue::as_decimal)
    }

    /// Returns a cleaned checkbox state.
    pub fn boolean(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    /// Returns a cleaned choice key.
    pub fn choice(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_choice)
    }

    /// Returns a cleaned upload.
    pub fn file(&self, field: &str) -> Option<&UploadedFile> {
        self.get(field).and_then(FieldValue::as_file)
    }

    /// Iterates over the cleaned values in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
