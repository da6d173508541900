//! Filename sanitization.

use super::constants::ILLEGAL_FILENAME_CHARS;

/// Remove characters that cannot appear in a file name.
///
/// Strips `/ ? < > \ : * | "`, turns non-breaking spaces into ordinary
/// spaces, then removes every character of `disallowed` (taken literally).
///
/// # Examples
/// ```
/// # use marksnip::utils::sanitize_filename;
/// assert_eq!(
///     sanitize_filename("Test/File:Name*With?Illegal<Chars>", None),
///     "TestFileNameWithIllegalChars"
/// );
/// assert_eq!(sanitize_filename("a [b] #c", Some("[]#^")), "a b c");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str, disallowed: Option<&str>) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .filter(|c| disallowed.is_none_or(|set| !set.contains(*c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nbsp_becomes_space() {
        assert_eq!(sanitize_filename("Hello\u{a0}World", None), "Hello World");
    }

    #[test]
    fn disallowed_applies_after_nbsp_conversion() {
        assert_eq!(sanitize_filename("a\u{a0}b", Some(" ")), "ab");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert_eq!(sanitize_filename("a.b+c(d)", Some(".+()")), "abcd");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(sanitize_filename("", Some("[]")), "");
    }
}
