//! dotpath-l10n
//!
//! Dot-path addressable data store and a cascading localization resolver built on it.
//!
//! - [`store::Bag`]: nested values addressed as `a.b.c`
//! - [`Translator`]: language preference chains, layered JSON dictionaries, plural forms
//! - [`cache`]: expiring entries for hosts that cache resolved values

pub mod cache;
pub mod config;
pub mod l10n;
pub mod store;

pub use l10n::{
    L10nError,
    Translator,
};
pub use store::Bag;
