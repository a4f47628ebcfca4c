//! Path-addressable data store.

use serde_json::{
    Map,
    Value,
};

use super::path::{
    DEFAULT_SEPARATOR,
    KeyPath,
};

/// A tree of JSON values addressed by key paths.
///
/// Objects are branches, every other value is a leaf. The root is always an
/// object. `null` is the absence marker: a stored `null` reads as absent.
///
/// # Examples
/// ```
/// use dotpath_l10n::store::Bag;
/// use serde_json::json;
///
/// let mut bag = Bag::new();
/// bag.set("app.window.title", "Editor").set("app.window.width", 800);
///
/// assert_eq!(bag.get("app.window.title"), Some(&json!("Editor")));
/// assert!(bag.exists("app.window"));
///
/// bag.clear("app.window.title");
/// assert!(!bag.exists("app.window.title"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Bag {
    /// Root node, always a `Value::Object`.
    root: Value,
    /// Key path separator.
    separator: String,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for Bag {
    fn from(map: Map<String, Value>) -> Self {
        Self { root: Value::Object(map), separator: DEFAULT_SEPARATOR.to_string() }
    }
}

impl Bag {
    /// Creates an empty store using `.` as the separator.
    #[must_use]
    pub fn new() -> Self {
        Self::from(Map::new())
    }

    /// Replaces the key path separator. An empty separator is ignored.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if separator.is_empty() {
            tracing::warn!("Ignoring empty key separator, keeping {:?}", self.separator);
        } else {
            self.separator = separator;
        }
        self
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Returns true when a non-null node (leaf or branch) exists at `path`.
    ///
    /// Never creates structure.
    #[must_use]
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Resolves `path` without creating missing nodes.
    ///
    /// Returns `None` when any segment is missing, when a leaf is met before
    /// the path ends, or when the node holds `null`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        KeyPath::new(path, &self.separator)
            .segments()
            .try_fold(&self.root, |node, segment| node.as_object()?.get(segment))
            .filter(|value| !value.is_null())
    }

    /// Resolves `path` for writing and returns a live reference into the tree.
    ///
    /// Missing intermediate objects are created. A leaf met before the path
    /// ends is replaced by an empty object so the walk can continue. A missing
    /// terminal node is created as `null`.
    ///
    /// # Examples
    /// ```
    /// use dotpath_l10n::store::Bag;
    /// use serde_json::json;
    ///
    /// let mut bag = Bag::new();
    /// *bag.get_mut("counter.hits") = json!(1);
    /// if let Some(hits) = bag.get_mut("counter.hits").as_i64() {
    ///     *bag.get_mut("counter.hits") = json!(hits + 1);
    /// }
    /// assert_eq!(bag.get("counter.hits"), Some(&json!(2)));
    /// ```
    pub fn get_mut(&mut self, path: &str) -> &mut Value {
        let mut node = &mut self.root;
        for segment in KeyPath::new(path, &self.separator).segments() {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node = &mut node[segment];
        }
        node
    }

    /// Writes `value` at `path`, creating or promoting nodes as [`Bag::get_mut`] does.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        *self.get_mut(path) = value.into();
        self
    }

    /// Removes the terminal key of `path`.
    ///
    /// The parent walk never creates nodes. A missing parent makes this a
    /// no-op. Emptied parents are kept.
    pub fn clear(&mut self, path: &str) -> &mut Self {
        self.remove(path);
        self
    }

    /// Removes the terminal key of `path` and returns the removed node.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let key_path = KeyPath::new(path, &self.separator);
        let (parents, last) = key_path.split_last();

        let mut node = &mut self.root;
        for segment in parents {
            node = node.get_mut(segment)?;
        }
        node.as_object_mut()?.remove(last)
    }

    /// Deep-merges `incoming` into the root.
    ///
    /// Keys from `incoming` win at the same path, unless both sides hold an
    /// object there, in which case the two objects are merged recursively.
    pub fn merge(&mut self, incoming: Map<String, Value>) -> &mut Self {
        merge_value(&mut self.root, Value::Object(incoming));
        self
    }

    /// Returns true when the root holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.as_object().is_none_or(Map::is_empty)
    }

    /// Drops every key.
    pub fn reset(&mut self) {
        self.root = Value::Object(Map::new());
    }

    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.root
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }
}

/// Recursive associative merge, `incoming` wins on conflicts.
fn merge_value(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target, incoming) => *target = incoming,
    }
}
