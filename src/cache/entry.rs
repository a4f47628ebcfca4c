//! Value, timestamp and time-to-live triple.

use std::time::{
    SystemTime,
    UNIX_EPOCH,
};

use serde_json::Value;

/// Current Unix time in seconds.
#[must_use]
fn unix_now() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0.0, |elapsed| elapsed.as_secs_f64())
}

/// A cached value with the time it was recorded and how long it lives.
///
/// A `ttl` of `0` never expires. `null` and `""` count as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Cached payload.
    value: Value,
    /// Unix timestamp in seconds.
    recorded_at: f64,
    /// Lifetime in seconds, `0` = unbounded.
    ttl: u64,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(value: impl Into<Value>, ttl: u64) -> Self {
        Self::with_timestamp(value, unix_now(), ttl)
    }

    #[must_use]
    pub fn with_timestamp(value: impl Into<Value>, recorded_at: f64, ttl: u64) -> Self {
        Self { value: value.into(), recorded_at, ttl }
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    #[must_use]
    pub const fn recorded_at(&self) -> f64 {
        self.recorded_at
    }

    #[must_use]
    pub const fn ttl(&self) -> u64 {
        self.ttl
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(unix_now())
    }

    /// Returns true when the lifetime has run out at `now` (Unix seconds).
    #[must_use]
    #[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
    pub fn is_expired_at(&self, now: f64) -> bool {
        self.ttl != 0 && self.recorded_at + (self.ttl as f64) < now
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(unix_now())
    }

    #[must_use]
    pub fn is_valid_at(&self, now: f64) -> bool {
        !self.is_empty() && !self.is_expired_at(now)
    }

    /// Encodes the entry as the JSON array `[value, recordedAt, ttl]`.
    #[must_use]
    pub fn serialize(&self) -> String {
        serde_json::json!([self.value, self.recorded_at, self.ttl]).to_string()
    }

    /// Decodes an entry produced by [`CacheEntry::serialize`].
    ///
    /// Empty, malformed or wrong-arity input yields `None` so that a corrupt
    /// record behaves like a cache miss.
    #[must_use]
    pub fn deserialize(input: &str) -> Option<Self> {
        match serde_json::from_str::<(Value, f64, u64)>(input) {
            Ok((value, recorded_at, ttl)) => Some(Self { value, recorded_at, ttl }),
            Err(e) => {
                tracing::debug!("Discarding undecodable cache record: {e}");
                None
            }
        }
    }
}
