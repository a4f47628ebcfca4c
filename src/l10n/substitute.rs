//! Placeholder substitution.

use std::collections::HashMap;

/// Token replaced by the count in plural messages.
pub const COUNT_TOKEN: &str = "#";

/// Replaces every occurrence of each token in `message` with its replacement.
///
/// Tokens are matched literally. The message is scanned once from left to
/// right and at each position the longest matching token wins, so replaced
/// text is never scanned again. When a token is listed twice the later
/// replacement is used. Empty tokens are ignored.
///
/// # Examples
/// ```
/// use dotpath_l10n::l10n::substitute;
///
/// let text = substitute("Bye {name}", &[("{name}", "Ann")]);
/// assert_eq!(text, "Bye Ann");
/// ```
#[must_use]
pub fn substitute(message: &str, substitutions: &[(&str, &str)]) -> String {
    let mut replacements: HashMap<&str, &str> = HashMap::new();
    for &(token, replacement) in substitutions {
        if !token.is_empty() {
            replacements.insert(token, replacement);
        }
    }
    if replacements.is_empty() {
        return message.to_string();
    }

    let mut tokens: Vec<(&str, &str)> = replacements.into_iter().collect();
    tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let mut result = String::with_capacity(message.len());
    let mut rest = message;
    'scan: while !rest.is_empty() {
        for (token, replacement) in &tokens {
            if let Some(after) = rest.strip_prefix(token) {
                result.push_str(replacement);
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            result.push(c);
        }
        rest = chars.as_str();
    }
    result
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::no_tokens("Hello", &[], "Hello")]
    #[case::single("Bye {name}", &[("{name}", "Ann")], "Bye Ann")]
    #[case::repeated("{x} and {x}", &[("{x}", "y")], "y and y")]
    #[case::several(":a + :b", &[(":a", "1"), (":b", "2")], "1 + 2")]
    #[case::absent_token("Hi", &[("{name}", "Ann")], "Hi")]
    #[case::longest_wins(":name is :names", &[(":name", "A"), (":names", "B")], "A is B")]
    #[case::no_rescan("{a}", &[("{a}", "{b}"), ("{b}", "x")], "{b}")]
    #[case::later_duplicate_wins("#", &[("#", "1"), ("#", "2")], "2")]
    #[case::empty_token_ignored("abc", &[("", "x")], "abc")]
    #[case::multibyte("こんにちは {name}さん", &[("{name}", "太郎")], "こんにちは 太郎さん")]
    fn substitutes_tokens(
        #[case] message: &str,
        #[case] substitutions: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        assert_eq!(substitute(message, substitutions), expected);
    }
}
