//! Key path splitting.

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// A key path such as `common.buttons.save`, borrowed from the caller.
///
/// Every segment addresses one level of the tree. Empty segments are kept,
/// so `"a..b"` addresses a key named `""` below `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath<'a> {
    /// The unsplit path text.
    raw: &'a str,
    /// Segment separator, never empty.
    separator: &'a str,
}

impl<'a> KeyPath<'a> {
    /// Creates a key path. An empty `separator` falls back to [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub const fn new(raw: &'a str, separator: &'a str) -> Self {
        let separator = if separator.is_empty() { DEFAULT_SEPARATOR } else { separator };
        Self { raw, separator }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Iterates the segments from the root downwards.
    pub fn segments(&self) -> std::str::Split<'a, &'a str> {
        self.raw.split(self.separator)
    }

    /// Splits into the parent segments and the terminal segment.
    ///
    /// # Examples
    /// ```
    /// use dotpath_l10n::store::KeyPath;
    ///
    /// let path = KeyPath::new("a.b.c", ".");
    /// let (parents, last) = path.split_last();
    /// assert_eq!(parents.collect::<Vec<_>>(), vec!["a", "b"]);
    /// assert_eq!(last, "c");
    /// ```
    #[must_use]
    pub fn split_last(&self) -> (impl Iterator<Item = &'a str> + use<'a>, &'a str) {
        let separator = self.separator;
        match self.raw.rsplit_once(separator) {
            Some((parent, last)) => (Some(parent.split(separator)).into_iter().flatten(), last),
            None => (None.into_iter().flatten(), self.raw),
        }
    }
}
