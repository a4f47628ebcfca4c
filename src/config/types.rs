use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::l10n::{
    DEFAULT_FALLBACK,
    LanguageTag,
};
use crate::store::DEFAULT_SEPARATOR;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "directories[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file '{}': {source}", .path.display())]
    IoError { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse configuration file '{}': {source}", .path.display())]
    ParseError { path: PathBuf, source: serde_json::Error },
}

/// Renders one numbered line per validation error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct L10nSettings {
    /// Locale directories, later entries override earlier ones.
    /// Relative paths are resolved against the workspace root.
    pub directories: Vec<PathBuf>,

    /// Preference string in `Accept-Language` form (e.g. `"fr-CA, en;q=0.8"`).
    pub languages: String,

    /// Language always loaded at the lowest priority.
    pub fallback_language: String,

    pub key_separator: String,
}

impl L10nSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid fallback language tag
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.fallback_language.is_empty() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The fallback language cannot be empty. Example: \"en\"",
            ));
        } else if LanguageTag::parse_exact(&self.fallback_language).is_none() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                format!(
                    "Invalid language tag '{}'. Expected a language code with an optional region, e.g. \"en\" or \"en-US\"",
                    self.fallback_language
                ),
            ));
        }

        if self.directories.is_empty() {
            errors.push(ValidationError::new(
                "directories",
                "At least one directory is required. Example: [\"locales\"]",
            ));
        }

        for (index, directory) in self.directories.iter().enumerate() {
            if directory.as_os_str().is_empty() {
                errors.push(ValidationError::new(
                    format!("directories[{index}]"),
                    "The directory cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for L10nSettings {
    fn default() -> Self {
        Self {
            directories: vec![PathBuf::from("locales")],
            languages: String::new(),
            fallback_language: DEFAULT_FALLBACK.to_string(),
            key_separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
