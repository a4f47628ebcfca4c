//! Message dictionary with lazy cascading loads.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use super::error::L10nError;
use super::languages::{
    LanguageChain,
    LanguageTag,
};
use super::substitute::{
    COUNT_TOKEN,
    substitute,
};
use crate::config::L10nSettings;
use crate::store::Bag;

/// Language used when no fallback is configured.
pub const DEFAULT_FALLBACK: &str = "en";

/// Extension of dictionary files inside a locale directory.
const DICTIONARY_EXTENSION: &str = "json";

/// Whether the dictionary reflects the current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// Nothing loaded yet, or the configuration changed since the last load.
    Unloaded,
    /// Locale files have been merged into the dictionary.
    Loaded,
}

/// Resolves message keys against dictionaries loaded from locale directories.
///
/// Dictionaries are JSON files named `<tag>.json`. They are loaded on the
/// first lookup, least preferred language first, so that the most preferred
/// language wins for every key it defines. Within one language, directories
/// listed later override earlier ones.
///
/// Changing the directories, the preference string or the fallback drops the
/// loaded dictionary; the next lookup loads again.
///
/// # Examples
/// ```no_run
/// use dotpath_l10n::Translator;
///
/// let mut translator = Translator::new();
/// translator.set_directories(["locales"]).set_languages("de-AT, en;q=0.5");
///
/// let text = translator.translate("farewell", &[("{name}", "Ann")])?;
/// let count = translator.choice("inbox.unread", 3, &[])?;
/// # Ok::<(), dotpath_l10n::L10nError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    /// Loaded messages.
    dictionary: Bag,
    /// Locale directories in override order.
    directories: Vec<PathBuf>,
    /// Raw preference string as given by the caller.
    preference: String,
    /// Least preferred language, always part of `chain`.
    fallback: String,
    /// Parsed preference chain.
    chain: LanguageChain,
    /// Load guard.
    state: LoadState,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Creates a translator with no directories and fallback `en`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dictionary: Bag::new(),
            directories: Vec::new(),
            preference: String::new(),
            fallback: DEFAULT_FALLBACK.to_string(),
            chain: LanguageChain::parse("", DEFAULT_FALLBACK),
            state: LoadState::Unloaded,
        }
    }

    /// Creates a translator from validated settings.
    #[must_use]
    pub fn from_settings(settings: &L10nSettings) -> Self {
        let mut translator = Self::new().with_key_separator(&settings.key_separator);
        translator
            .set_directories(settings.directories.iter().cloned())
            .set_fallback(&settings.fallback_language)
            .set_languages(&settings.languages);
        translator
    }

    /// Uses `separator` instead of `.` between key segments.
    #[must_use]
    pub fn with_key_separator(mut self, separator: &str) -> Self {
        self.dictionary = Bag::new().with_separator(separator);
        self.state = LoadState::Unloaded;
        self
    }

    pub fn set_directories<I, P>(&mut self, directories: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.directories = directories.into_iter().map(Into::into).collect();
        self.invalidate("directories changed");
        self
    }

    /// Appends a directory that overrides every directory already configured.
    pub fn add_directory(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        self.directories.push(directory.into());
        self.invalidate("directory added");
        self
    }

    /// Sets the preference string, e.g. an `Accept-Language` header value.
    pub fn set_languages(&mut self, preference: &str) -> &mut Self {
        preference.clone_into(&mut self.preference);
        self.chain = LanguageChain::parse(&self.preference, &self.fallback);
        self.invalidate("language preference changed");
        self
    }

    /// Sets the language loaded at the lowest priority.
    ///
    /// The tag is stored in canonical form (`EN-gb` becomes `en-GB`) so that
    /// it always appears in [`Translator::languages`]. A string that is not a
    /// language tag is ignored and the previous fallback stays.
    pub fn set_fallback(&mut self, fallback: &str) -> &mut Self {
        let Some(tag) = LanguageTag::parse_exact(fallback.trim()) else {
            tracing::warn!(
                "Ignoring invalid fallback language {:?}, keeping {:?}",
                fallback,
                self.fallback
            );
            return self;
        };

        self.fallback = tag.to_string();
        self.chain = LanguageChain::parse(&self.preference, &self.fallback);
        self.invalidate("fallback language changed");
        self
    }

    /// Preference chain, most preferred first.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        self.chain.tags()
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// The in-memory dictionary. Empty until the first lookup.
    #[must_use]
    pub const fn dictionary(&self) -> &Bag {
        &self.dictionary
    }

    /// Drops the dictionary so that the next lookup reloads it.
    fn invalidate(&mut self, reason: &str) {
        if self.state == LoadState::Loaded {
            tracing::debug!(reason, "Invalidating loaded dictionary");
        }
        self.dictionary.reset();
        self.state = LoadState::Unloaded;
    }

    /// Loads every dictionary file for the preference chain, once.
    ///
    /// # Errors
    /// Returns an error when a locale file exists but cannot be read, is not
    /// JSON, or does not hold an object. The translator stays unloaded.
    pub fn load(&mut self) -> Result<(), L10nError> {
        if self.state == LoadState::Loaded {
            return Ok(());
        }

        tracing::debug!(
            languages = ?self.chain.tags(),
            directories = ?self.directories,
            "Loading dictionaries"
        );

        let mut dictionary = Bag::new().with_separator(self.dictionary.separator());
        let mut merged = 0_usize;
        for tag in self.chain.least_preferred_first() {
            for directory in &self.directories {
                let path = directory.join(format!("{tag}.{DICTIONARY_EXTENSION}"));
                if !path.is_file() {
                    tracing::debug!("Locale file not found: {:?}", path);
                    continue;
                }
                dictionary.merge(read_dictionary(&path)?);
                merged += 1;
                tracing::debug!("Merged locale file: {:?}", path);
            }
        }

        self.dictionary = dictionary;
        self.state = LoadState::Loaded;
        tracing::debug!(files = merged, "Dictionaries loaded");
        Ok(())
    }

    /// Resolves `key` to its message, loading first if needed.
    ///
    /// `Ok(None)` means the key is absent.
    fn lookup(&mut self, key: &str) -> Result<Option<&str>, L10nError> {
        self.load()?;
        match self.dictionary.get(key) {
            None => Ok(None),
            Some(Value::String(message)) => Ok(Some(message.as_str())),
            Some(_) => Err(L10nError::NotAString { key: key.to_string() }),
        }
    }

    /// Returns true when a message or message group exists at `key`.
    ///
    /// # Errors
    /// Propagates load errors.
    pub fn has(&mut self, key: &str) -> Result<bool, L10nError> {
        self.load()?;
        Ok(self.dictionary.exists(key))
    }

    /// Translates `key`, then applies `substitutions`.
    ///
    /// An absent key is used as the message itself.
    ///
    /// # Errors
    /// - [`L10nError::NotAString`] when `key` holds something other than a string
    /// - load errors
    pub fn translate(
        &mut self,
        key: &str,
        substitutions: &[(&str, &str)],
    ) -> Result<String, L10nError> {
        let message = self.lookup(key)?.unwrap_or(key);
        Ok(substitute(message, substitutions))
    }

    /// Picks the plural form of `key` for `count` and substitutes `#` with it.
    ///
    /// The message is split on `|`. The first form whose zero-based index is
    /// at least `count` is used, and the last form covers every larger count:
    /// with `"none|one|# many"`, count `0` picks `none`, `1` picks `one`, and
    /// `2` or more pick `# many`.
    ///
    /// # Errors
    /// Same as [`Translator::translate`].
    pub fn choice(
        &mut self,
        key: &str,
        count: i64,
        substitutions: &[(&str, &str)],
    ) -> Result<String, L10nError> {
        let message = self.lookup(key)?.unwrap_or(key);
        let form = select_plural_form(message, count);

        let count_text = count.to_string();
        let mut all = substitutions.to_vec();
        all.push((COUNT_TOKEN, count_text.as_str()));
        Ok(substitute(form, &all))
    }

    /// Writes `message` at `key`, on top of whatever the locale files define.
    ///
    /// Loads first so a later lazy load cannot overwrite the addition. The
    /// addition is dropped when the configuration changes.
    ///
    /// # Errors
    /// Propagates load errors.
    pub fn add(&mut self, key: &str, message: impl Into<Value>) -> Result<&mut Self, L10nError> {
        self.load()?;
        self.dictionary.set(key, message);
        Ok(self)
    }
}

/// Scans `|`-separated forms and stops at the first index `>= count`.
fn select_plural_form(message: &str, count: i64) -> &str {
    let mut selected = message;
    for (index, form) in message.split('|').enumerate() {
        selected = form;
        if i64::try_from(index).is_ok_and(|index| count <= index) {
            break;
        }
    }
    selected
}

/// Reads one locale file into a mapping.
fn read_dictionary(path: &Path) -> Result<Map<String, Value>, L10nError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        tracing::warn!("Failed to read locale file {:?}: {}", path, source);
        L10nError::Io { path: path.to_path_buf(), source }
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| {
        tracing::warn!("Failed to parse locale file {:?}: {}", path, source);
        L10nError::Parse { path: path.to_path_buf(), source }
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => {
            tracing::warn!("Locale file {:?} is not a JSON object", path);
            Err(L10nError::NotAMapping { path: path.to_path_buf() })
        }
    }
}
