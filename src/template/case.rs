//! Case transforms applied by `{key:kebab}`-style placeholders.

/// Placeholder suffixes and the transform each one applies.
pub(super) const CASE_TRANSFORMS: [(&str, fn(&str) -> String); 4] = [
    ("kebab", kebab_case),
    ("snake", snake_case),
    ("camel", camel_case),
    ("pascal", pascal_case),
];

/// Spaces become `-`, then lower-case.
pub fn kebab_case(value: &str) -> String {
    value.replace(' ', "-").to_lowercase()
}

/// Spaces become `_`, then lower-case.
pub fn snake_case(value: &str) -> String {
    value.replace(' ', "_").to_lowercase()
}

/// Each space-prefixed character upper-cased with the space removed; leading character lower-cased.
pub fn camel_case(value: &str) -> String {
    map_first_char(&join_words(value), false)
}

/// Like [`camel_case`] but the leading character is upper-cased.
pub fn pascal_case(value: &str) -> String {
    map_first_char(&join_words(value), true)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

// A space followed by whitespace is dropped together with that whitespace.
// A space before a line break is kept.
fn join_words(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ' ' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some(next) if !is_line_terminator(next) => {
                chars.next();
                if !next.is_whitespace() {
                    out.extend(next.to_uppercase());
                }
            }
            _ => out.push(c),
        }
    }

    out
}

fn map_first_char(value: &str, upper: bool) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if !is_line_terminator(first) => {
            let mut out = String::with_capacity(value.len());
            if upper {
                out.extend(first.to_uppercase());
            } else {
                out.extend(first.to_lowercase());
            }
            out.push_str(chars.as_str());
            out
        }
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms() {
        assert_eq!(kebab_case("Test Article Title"), "test-article-title");
        assert_eq!(snake_case("Test Article Title"), "test_article_title");
        assert_eq!(camel_case("Test Article Title"), "testArticleTitle");
        assert_eq!(pascal_case("test article title"), "TestArticleTitle");
    }

    #[test]
    fn camel_double_space_swallows_both() {
        assert_eq!(camel_case("a  b"), "ab");
    }

    #[test]
    fn camel_keeps_trailing_space_and_line_breaks() {
        assert_eq!(camel_case("one two "), "oneTwo ");
        assert_eq!(camel_case("one \ntwo"), "one \ntwo");
    }
}
