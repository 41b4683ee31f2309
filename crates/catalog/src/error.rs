//! Error types for the catalog.

use thiserror::Error;

/// Catalog-specific errors.
///
/// Form validation failures are not errors: they are returned as
/// [`catalog_forms::ValidationErrors`] inside a [`catalog_forms::Validation`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Settings could not be read or extracted.
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),

    /// A banned-word pattern does not compile.
    #[error("invalid banned word pattern {pattern:?}: {source}")]
    BannedWord {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The banned-word patterns compile one by one but not as a set.
    #[error("banned word patterns cannot be compiled together: {0}")]
    BannedWordSet(#[source] regex::Error),

    /// A setting has an unusable value.
    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },
}

impl From<figment::Error> for CatalogError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
