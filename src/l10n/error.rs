use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving messages.
///
/// Missing keys and missing locale files are not errors. These variants
/// cover locale data that is present but unusable.
#[derive(Error, Debug)]
pub enum L10nError {
    /// The dictionary holds something other than a string at a message key
    #[error("Message reference is not a string: '{key}'")]
    NotAString { key: String },

    /// A locale file exists but could not be read
    #[error("Failed to read locale file {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    /// A locale file is not valid JSON
    #[error("Failed to parse locale file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },

    /// A locale file's top level is not an object
    #[error("Locale file {} must contain a JSON object at the top level", .path.display())]
    NotAMapping { path: PathBuf },
}
