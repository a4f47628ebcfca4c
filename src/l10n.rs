//! Cascading localization resolver.

mod error;
mod languages;
mod substitute;
mod translator;

pub use error::L10nError;
pub use languages::{
    LanguageChain,
    LanguageTag,
};
pub use substitute::{
    COUNT_TOKEN,
    substitute,
};
pub use translator::{
    DEFAULT_FALLBACK,
    Translator,
};
