//! Validation settings for product forms.
//!
//! Settings are read once at startup and shared read-only between requests:
//!
//! ```text
//! defaults  <-  catalog.toml  <-  CATALOG_* environment variables
//! ```
//!
//! ```toml
//! allowed_extensions = ["jpg", "jpeg", "png"]
//! banned_words = ["казино", "криптовалюта"]
//! max_upload_size = 5242880
//! ```

use std::path::Path;

use catalog_forms::validation::ForbiddenPatterns;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, Result};

/// Default settings file, relative to the working directory.
pub const SETTINGS_FILE: &str = "catalog.toml";
/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "CATALOG_";

const MIB: u64 = 1024 * 1024;
const KIB: u64 = 1024;

/// Settings as written in configuration sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Permitted image file extensions.
    #[serde(default = "defaults::allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Case-insensitive regex patterns forbidden in product texts.
    #[serde(default = "defaults::banned_words")]
    pub banned_words: Vec<String>,

    /// Maximum image size in bytes.
    #[serde(default = "defaults::max_upload_size")]
    pub max_upload_size: u64,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: defaults::allowed_extensions(),
            banned_words: defaults::banned_words(),
            max_upload_size: defaults::max_upload_size(),
        }
    }
}

mod defaults {
    pub fn allowed_extensions() -> Vec<String> {
        ["jpg", "jpeg", "png"].map(String::from).to_vec()
    }

    pub fn banned_words() -> Vec<String> {
        [
            "казино",
            "криптовалюта",
            "крипта",
            "биржа",
            "дешево",
            "бесплатно",
            "обман",
            "полиция",
            "радар",
        ]
        .map(String::from)
        .to_vec()
    }

    pub const fn max_upload_size() -> u64 {
        5 * super::MIB
    }
}

/// Names the offending pattern when a single one fails to compile; set-level
/// failures such as the size limit are reported as such.
fn banned_word_error(patterns: &[String], source: regex::Error) -> CatalogError {
    match patterns.iter().find(|pattern| Regex::new(pattern).is_err()) {
        Some(pattern) => CatalogError::BannedWord {
            pattern: pattern.clone(),
            source,
        },
        None => CatalogError::BannedWordSet(source),
    }
}

/// Validated, compiled settings.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    allowed_extensions: Vec<String>,
    banned_words: ForbiddenPatterns,
    max_upload_size: u64,
}

impl CatalogSettings {
    /// Builds settings from explicit values.
    pub fn new<E, W>(allowed_extensions: &[E], banned_words: &[W], max_upload_size: u64) -> Result<Self>
    where
        E: AsRef<str>,
        W: AsRef<str>,
    {
        Self::from_config(SettingsConfig {
            allowed_extensions: allowed_extensions
                .iter()
                .map(|ext| ext.as_ref().to_string())
                .collect(),
            banned_words: banned_words.iter().map(|w| w.as_ref().to_string()).collect(),
            max_upload_size,
        })
    }

    /// Validates configured values and compiles the banned-word patterns.
    pub fn from_config(config: SettingsConfig) -> Result<Self> {
        if config.max_upload_size == 0 {
            return Err(CatalogError::InvalidSetting {
                name: "max_upload_size",
                message: "must be greater than zero".to_string(),
            });
        }

        let allowed_extensions: Vec<String> = config
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if allowed_extensions.is_empty() {
            return Err(CatalogError::InvalidSetting {
                name: "allowed_extensions",
                message: "at least one extension is required".to_string(),
            });
        }

        let banned_words = ForbiddenPatterns::new(&config.banned_words)
            .map_err(|source| banned_word_error(&config.banned_words, source))?;

        Ok(Self {
            allowed_extensions,
            banned_words,
            max_upload_size: config.max_upload_size,
        })
    }

    /// Loads settings from `catalog.toml` and `CATALOG_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(SETTINGS_FILE)
    }

    /// Loads settings from the given TOML file and `CATALOG_*` variables.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // merge semantic: bottom overrides top
        let config: SettingsConfig = Figment::from(Serialized::defaults(SettingsConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        let settings = Self::from_config(config)?;
        info!(
            path = %path.display(),
            allowed_extensions = ?settings.allowed_extensions,
            banned_words = settings.banned_words.patterns().len(),
            max_upload_size = settings.max_upload_size,
            "Loaded catalog settings"
        );
        Ok(settings)
    }

    /// Permitted image extensions, lower-case and without the dot.
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Compiled banned-word patterns.
    pub const fn banned_words(&self) -> &ForbiddenPatterns {
        &self.banned_words
    }

    /// Maximum image size in bytes.
    pub const fn max_upload_size(&self) -> u64 {
        self.max_upload_size
    }

    /// Human-readable upload limit, e.g. `5МВ`.
    pub fn max_upload_size_label(&self) -> String {
        let bytes = self.max_upload_size;
        if bytes % MIB == 0 {
            format!("{}МВ", bytes / MIB)
        } else if bytes % KIB == 0 {
            format!("{}КВ", bytes / KIB)
        } else {
            format!("{bytes} байт")
        }
    }
}
