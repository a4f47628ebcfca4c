//! Cache entries and the pluggable cache interface.
//!
//! The localization resolver does not cache anything itself. These types are
//! for hosts that keep resolved values around between requests.

mod backend;
mod entry;

pub use backend::{
    Cache,
    MemoryCache,
};
pub use entry::CacheEntry;
