//! Form field validators.

use std::path::Path;

use regex::{RegexSet, RegexSetBuilder};

/// Trait for field validators.
pub trait Validator: Send + Sync {
    /// Validates a value and returns an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Returns the error message for this validator.
    fn message(&self) -> &str;
}

/// Validator that requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max_length: usize,
    message: String,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            message: format!("Ensure this value has at most {max_length} characters."),
        }
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            max_length,
            message: message.into(),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        // Cyrillic text is multi-byte, so count characters rather than bytes.
        if value.chars().count() > self.max_length {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Validator for the extension of an uploaded file name.
///
/// Extensions are compared case-insensitively and without the leading dot.
#[derive(Debug, Clone)]
pub struct FileExtensionValidator {
    allowed: Vec<String>,
    message: String,
}

impl FileExtensionValidator {
    /// Creates a new FileExtensionValidator with default message.
    pub fn new<S: AsRef<str>>(allowed: &[S]) -> Self {
        let allowed = normalize_extensions(allowed);
        let message = format!(
            "File extension is not allowed. Allowed extensions are: {}.",
            allowed.join(", ")
        );
        Self { allowed, message }
    }

    /// Creates a new FileExtensionValidator with custom message.
    pub fn with_message<S: AsRef<str>>(allowed: &[S], message: impl Into<String>) -> Self {
        Self {
            allowed: normalize_extensions(allowed),
            message: message.into(),
        }
    }

    /// Returns the allowed extensions.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

fn normalize_extensions<S: AsRef<str>>(allowed: &[S]) -> Vec<String> {
    allowed
        .iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Returns the lower-cased extension of a file name, without the dot.
///
/// Follows path semantics: a leading dot marks a hidden file, not an
/// extension, so `.png` and `photo.` have none.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

impl Validator for FileExtensionValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match file_extension(value) {
            Some(extension) if self.allowed.contains(&extension) => Ok(()),
            _ => Err(self.message.clone()),
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// A list of case-insensitive patterns that text must not contain.
///
/// Patterns are searched anywhere in the value, not anchored. The source
/// pattern strings are kept in order so they can be listed back to users.
#[derive(Debug, Clone)]
pub struct ForbiddenPatterns {
    patterns: Vec<String>,
    set: RegexSet,
}

impl ForbiddenPatterns {
    /// Compiles the patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        let set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()?;
        Ok(Self { patterns, set })
    }

    /// Returns whether the text contains any of the patterns.
    pub fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    /// Returns the patterns found in the text, in declaration order.
    pub fn matches(&self, text: &str) -> Vec<&str> {
        self.set
            .matches(text)
            .into_iter()
            .map(|idx| self.patterns[idx].as_str())
            .collect()
    }

    /// Returns the pattern strings in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns the patterns joined with `", "`.
    pub fn joined(&self) -> String {
        self.patterns.join(", ")
    }
}
