//! Hierarchical data store addressed by separator-delimited key paths.

mod bag;
mod path;

pub use bag::Bag;
pub use path::{
    DEFAULT_SEPARATOR,
    KeyPath,
};
