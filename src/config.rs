//! Settings for hosts that build a [`Translator`](crate::Translator) from a workspace.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    L10nSettings,
    ValidationError,
};
