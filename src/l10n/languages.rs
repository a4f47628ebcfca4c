//! `Accept-Language` style preference parsing.

use std::collections::HashSet;
use std::fmt;

/// A `language(-REGION)?` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    /// Lower-cased language code, two or more word characters.
    language: String,
    /// Upper-cased region code.
    region: Option<String>,
}

/// Returns true for the characters a regex `\w` matches.
const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Leading run of word characters.
fn word_prefix(s: &str) -> &str {
    let end = s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    s.split_at(end).0
}

impl LanguageTag {
    /// Parses `en`, `en-US`, `pt-br` and similar.
    ///
    /// Only the leading `language(-region)?` part of `token` is used: the
    /// language needs two or more word characters, the region two or more
    /// after a `-`. Anything after that is ignored, so `zh-Hant-TW` reads as
    /// `zh-HANT` and `en-a` as `en`. Returns `None` when the token does not
    /// start with a language code.
    ///
    /// # Examples
    /// ```
    /// use dotpath_l10n::l10n::LanguageTag;
    ///
    /// let tag = LanguageTag::parse("pt-br").unwrap();
    /// assert_eq!(tag.to_string(), "pt-BR");
    /// assert_eq!(tag.language(), "pt");
    /// assert_eq!(LanguageTag::parse("zh-Hant-TW").unwrap().to_string(), "zh-HANT");
    /// assert!(LanguageTag::parse("x").is_none());
    /// ```
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let language = word_prefix(token);
        if language.len() < 2 {
            return None;
        }

        let region = token
            .strip_prefix(language)
            .and_then(|rest| rest.strip_prefix('-'))
            .map(word_prefix)
            .filter(|region| region.len() >= 2);

        Some(Self {
            language: language.to_ascii_lowercase(),
            region: region.map(str::to_ascii_uppercase),
        })
    }

    /// Like [`LanguageTag::parse`], but the whole token must be the tag.
    ///
    /// Used for configured languages, where trailing text is a mistake.
    #[must_use]
    pub fn parse_exact(token: &str) -> Option<Self> {
        Self::parse(token).filter(|tag| tag.to_string().len() == token.len())
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => f.write_str(&self.language),
        }
    }
}

/// Ordered, de-duplicated language tags, most preferred first.
///
/// Built from a preference string plus a fallback tag. Every regional tag is
/// followed by its generic language, and the fallback is always present.
/// Quality weights are ignored: listing order decides preference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageChain {
    /// Tags in preference order.
    tags: Vec<String>,
}

impl LanguageChain {
    /// Builds the chain for `raw` (e.g. `"fr-CA, en;q=0.8, de"`) and `fallback`.
    ///
    /// Tokens that are not language tags are skipped. Duplicates keep their
    /// first position, so a fallback already listed by the caller stays
    /// where the caller put it.
    ///
    /// # Examples
    /// ```
    /// use dotpath_l10n::l10n::LanguageChain;
    ///
    /// let chain = LanguageChain::parse("fr-CA, en;q=0.8, de", "en");
    /// assert_eq!(chain.tags(), ["fr-CA", "fr", "en", "de"]);
    /// ```
    #[must_use]
    pub fn parse(raw: &str, fallback: &str) -> Self {
        let cleaned: String =
            format!("{raw},{fallback}").chars().filter(|c| !c.is_whitespace()).collect();

        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for token in cleaned.split(',') {
            // Drop `;q=0.8` and any other parameters.
            let token = token.split(';').next().unwrap_or_default();
            if token.is_empty() {
                continue;
            }
            let Some(tag) = LanguageTag::parse(token) else {
                tracing::debug!(token, "Skipping malformed language tag");
                continue;
            };

            if tag.region.is_some() {
                let specific = tag.to_string();
                if seen.insert(specific.clone()) {
                    tags.push(specific);
                }
            }
            if seen.insert(tag.language.clone()) {
                tags.push(tag.language);
            }
        }

        Self { tags }
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Iterates from the least preferred tag to the most preferred one.
    ///
    /// This is the merge order: later tags override earlier ones.
    pub fn least_preferred_first(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().rev().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case("en", Some("en"))]
    #[case("EN", Some("en"))]
    #[case("en-us", Some("en-US"))]
    #[case("en-US", Some("en-US"))]
    #[case("zh-Hant", Some("zh-HANT"))]
    #[case("kok", Some("kok"))]
    #[case("es-419", Some("es-419"))]
    #[case("e", None)]
    #[case("*", None)]
    #[case("en-", Some("en"))]
    #[case("en-a", Some("en"))]
    #[case("-US", None)]
    #[case("zh-Hant-TW", Some("zh-HANT"))]
    #[case("en.US", Some("en"))]
    #[case("de_DE-at", Some("de_de-AT"))]
    #[case("x-klingon", None)]
    fn parse_language_tag(#[case] token: &str, #[case] expected: Option<&str>) {
        let parsed = LanguageTag::parse(token).map(|tag| tag.to_string());
        assert_eq!(parsed.as_deref(), expected);
    }

    #[rstest]
    #[case("en", Some("en"))]
    #[case("en-gb", Some("en-GB"))]
    #[case("en-", None)]
    #[case("zh-Hant-TW", None)]
    #[case("en US", None)]
    fn parse_exact_rejects_trailing_text(#[case] token: &str, #[case] expected: Option<&str>) {
        let parsed = LanguageTag::parse_exact(token).map(|tag| tag.to_string());
        assert_eq!(parsed.as_deref(), expected);
    }

    #[rstest]
    fn preference_order_and_fallback() {
        let chain = LanguageChain::parse("fr-CA, en;q=0.8, de", "en");

        assert_that!(chain.tags(), elements_are![eq("fr-CA"), eq("fr"), eq("en"), eq("de")]);
    }

    #[rstest]
    fn fallback_is_appended_last_when_not_listed() {
        let chain = LanguageChain::parse("de-AT,fr", "en");

        assert_that!(chain.tags(), elements_are![eq("de-AT"), eq("de"), eq("fr"), eq("en")]);
    }

    #[rstest]
    fn regional_fallback_brings_generic_language() {
        let chain = LanguageChain::parse("", "en-GB");

        assert_that!(chain.tags(), elements_are![eq("en-GB"), eq("en")]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[case::commas(",, ,")]
    #[case::wildcard("*")]
    #[case::garbage("!!, ?, x")]
    fn only_fallback_survives(#[case] raw: &str) {
        let chain = LanguageChain::parse(raw, "en");

        assert_that!(chain.tags(), elements_are![eq("en")]);
    }

    #[rstest]
    fn quality_weights_are_ignored() {
        let chain = LanguageChain::parse("de;q=0.1, fr;q=0.9", "en");

        assert_that!(chain.tags(), elements_are![eq("de"), eq("fr"), eq("en")]);
    }

    #[rstest]
    fn whitespace_inside_tokens_is_stripped() {
        let chain = LanguageChain::parse(" en - us ,\tja ", "en");

        assert_that!(chain.tags(), elements_are![eq("en-US"), eq("en"), eq("ja")]);
    }

    #[rstest]
    fn duplicates_keep_first_position() {
        let chain = LanguageChain::parse("en-US, fr, en-US, en, fr-FR", "fr");

        assert_that!(
            chain.tags(),
            elements_are![eq("en-US"), eq("en"), eq("fr"), eq("fr-FR")]
        );
    }

    #[rstest]
    fn long_tags_contribute_their_prefix() {
        let chain = LanguageChain::parse("zh-Hant-TW, en-a", "en");

        assert_that!(chain.tags(), elements_are![eq("zh-HANT"), eq("zh"), eq("en")]);
    }

    #[rstest]
    fn least_preferred_first_reverses() {
        let chain = LanguageChain::parse("en-US", "en");

        let order: Vec<&str> = chain.least_preferred_first().collect();
        assert_eq!(order, vec!["en", "en-US"]);
        assert!(chain.contains("en-US"));
        assert!(!chain.contains("fr"));
    }
}
